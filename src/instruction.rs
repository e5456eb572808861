/// The closed Intcode instruction set.
///
/// Opcodes are the two low decimal digits of an instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    /// `p3 = p1 + p2`
    Add,
    /// `p3 = p1 * p2`
    Multiply,
    /// `p1 = input()`
    Input,
    /// `output(p1)`, possibly suspending.
    Output,
    /// `if p1 != 0 { ip = p2 }`
    JumpIfTrue,
    /// `if p1 == 0 { ip = p2 }`
    JumpIfFalse,
    /// `p3 = (p1 < p2) as i64`
    LessThan,
    /// `p3 = (p1 == p2) as i64`
    Equals,
    /// `base += p1`
    AdjustBase,
    Halt,
}

impl Opcode {
    /// Words occupied by the instruction, including the instruction word.
    pub fn width(self) -> u64 {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 4,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 3,
            Opcode::Input | Opcode::Output | Opcode::AdjustBase => 2,
            Opcode::Halt => 1,
        }
    }
}

impl TryFrom<i64> for Opcode {
    type Error = i64;

    fn try_from(code: i64) -> Result<Self, i64> {
        Ok(match code {
            1 => Opcode::Add,
            2 => Opcode::Multiply,
            3 => Opcode::Input,
            4 => Opcode::Output,
            5 => Opcode::JumpIfTrue,
            6 => Opcode::JumpIfFalse,
            7 => Opcode::LessThan,
            8 => Opcode::Equals,
            9 => Opcode::AdjustBase,
            99 => Opcode::Halt,
            other => return Err(other),
        })
    }
}

/// How a parameter slot is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// The slot holds an address.
    #[default]
    Position,
    /// The slot holds the value itself.
    Immediate,
    /// The slot holds an offset from the relative base.
    Relative,
}

impl TryFrom<i64> for Mode {
    type Error = i64;

    fn try_from(digit: i64) -> Result<Self, i64> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            other => Err(other),
        }
    }
}

/// A decoded instruction word.
///
/// Given the word `ABCDE`, `DE` is the opcode and `C`, `B`, `A` are the
/// modes of parameters 1, 2 and 3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub modes: [Mode; 3],
}

impl Instruction {
    /// Decode `word`, or `None` if its opcode or the mode digit of a
    /// parameter the opcode takes is unknown. Digits of parameters the
    /// opcode does not take are ignored and read as position mode.
    pub fn decode(word: i64) -> Option<Self> {
        if word < 0 {
            return None;
        }
        let opcode = Opcode::try_from(word % 100).ok()?;
        let params = opcode.width() - 1;
        let mut modes = [Mode::Position; 3];
        let mut place = 100;
        for (i, mode) in modes.iter_mut().enumerate() {
            if (i as u64) < params {
                *mode = Mode::try_from(word / place % 10).ok()?;
            }
            place *= 10;
        }
        Some(Self { opcode, modes })
    }

    /// Mode of 1-indexed parameter `param`.
    pub fn mode(&self, param: u64) -> Mode {
        self.modes[(param - 1) as usize]
    }
}
