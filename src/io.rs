use std::collections::VecDeque;

/// What the machine should do after an output instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    /// Keep executing.
    #[default]
    Continue,
    /// Return from `evaluate()` right after this output. The machine stays
    /// resumable.
    Suspend,
}

impl From<bool> for Flow {
    fn from(suspend: bool) -> Self {
        if suspend { Flow::Suspend } else { Flow::Continue }
    }
}

/// The input source and output sink of a [`Computer`](crate::computer::Computer).
///
/// Implementors hold whatever state the host needs (robot position, game
/// score, ...) as plain fields. Both callbacks default to `None`, which
/// means "not supplied": a program that executes the corresponding
/// instruction fails with a missing-input or missing-output error.
pub trait Io {
    /// Next value for an input instruction.
    fn input(&mut self) -> Option<i64> {
        None
    }

    /// Receive a value from an output instruction.
    fn output(&mut self, value: i64) -> Option<Flow> {
        let _ = value;
        None
    }
}

/// Supplies neither input nor output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoIo;

impl Io for NoIo {}

impl<T: Io + ?Sized> Io for &mut T {
    fn input(&mut self) -> Option<i64> {
        (**self).input()
    }

    fn output(&mut self, value: i64) -> Option<Flow> {
        (**self).output(value)
    }
}

/// Queued inputs and collected outputs.
///
/// Running out of queued inputs counts as a missing input.
#[derive(Clone, Debug, Default)]
pub struct Queue {
    pub inputs: VecDeque<i64>,
    pub outputs: Vec<i64>,
    /// Suspend after every output instead of running on.
    pub suspend: bool,
}

impl Queue {
    pub fn new(inputs: impl IntoIterator<Item = i64>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Like [`Queue::new`], but suspending after each output.
    pub fn suspending(inputs: impl IntoIterator<Item = i64>) -> Self {
        Self {
            suspend: true,
            ..Self::new(inputs)
        }
    }

    pub fn push(&mut self, value: i64) {
        self.inputs.push_back(value);
    }

    /// Take all outputs collected so far.
    pub fn drain(&mut self) -> Vec<i64> {
        std::mem::take(&mut self.outputs)
    }
}

impl Io for Queue {
    fn input(&mut self) -> Option<i64> {
        self.inputs.pop_front()
    }

    fn output(&mut self, value: i64) -> Option<Flow> {
        self.outputs.push(value);
        Some(Flow::from(self.suspend))
    }
}

/// Adapts a pair of closures into [`Io`]. `true` from the output closure
/// requests suspension.
pub struct Callbacks<I, O> {
    input: Option<I>,
    output: Option<O>,
}

impl<I, O> Callbacks<I, O>
where
    I: FnMut() -> i64,
    O: FnMut(i64) -> bool,
{
    pub fn new(input: I, output: O) -> Self {
        Self {
            input: Some(input),
            output: Some(output),
        }
    }
}

impl<I: FnMut() -> i64> Callbacks<I, fn(i64) -> bool> {
    pub fn input_only(input: I) -> Self {
        Self {
            input: Some(input),
            output: None,
        }
    }
}

impl<O: FnMut(i64) -> bool> Callbacks<fn() -> i64, O> {
    pub fn output_only(output: O) -> Self {
        Self {
            input: None,
            output: Some(output),
        }
    }
}

impl<I, O> Io for Callbacks<I, O>
where
    I: FnMut() -> i64,
    O: FnMut(i64) -> bool,
{
    fn input(&mut self) -> Option<i64> {
        self.input.as_mut().map(|f| f())
    }

    fn output(&mut self, value: i64) -> Option<Flow> {
        self.output.as_mut().map(|f| Flow::from(f(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_io_supplies_nothing() {
        let mut io = NoIo;
        assert_eq!(io.input(), None);
        assert_eq!(io.output(5), None);
    }

    #[test]
    fn test_queue_order() {
        let mut io = Queue::new([1, 2]);
        io.push(3);
        assert_eq!(io.input(), Some(1));
        assert_eq!(io.input(), Some(2));
        assert_eq!(io.input(), Some(3));
        assert_eq!(io.input(), None);
    }

    #[test]
    fn test_queue_flow() {
        let mut io = Queue::new([]);
        assert_eq!(io.output(1), Some(Flow::Continue));
        let mut io = Queue::suspending([]);
        assert_eq!(io.output(1), Some(Flow::Suspend));
        assert_eq!(io.drain(), vec![1]);
        assert!(io.outputs.is_empty());
    }

    #[test]
    fn test_callbacks() {
        let mut seen = Vec::new();
        {
            let mut io = Callbacks::new(|| 42, |v: i64| {
                seen.push(v);
                v > 10
            });
            assert_eq!(io.input(), Some(42));
            assert_eq!(io.output(3), Some(Flow::Continue));
            assert_eq!(io.output(11), Some(Flow::Suspend));
        }
        assert_eq!(seen, vec![3, 11]);
    }

    #[test]
    fn test_callbacks_one_sided() {
        let mut io = Callbacks::input_only(|| 1);
        assert_eq!(io.input(), Some(1));
        assert_eq!(io.output(1), None);

        let mut io = Callbacks::output_only(|_: i64| false);
        assert_eq!(io.input(), None);
        assert_eq!(io.output(1), Some(Flow::Continue));
    }
}
