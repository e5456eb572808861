use std::collections::HashMap;
use std::fmt::Write;

use tracing::debug;

use crate::computer::Computer;
use crate::error::{Error, Result};
use crate::io::{Flow, Io};
use crate::program::Program;

/// Panel colour. Every panel starts black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    fn code(self) -> i64 {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }
}

impl TryFrom<i64> for Color {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            _ => Err(Error::InvalidOutput {
                value,
                reason: "paint colour must be 0 or 1",
            }),
        }
    }
}

/// Heading of the robot. `y` grows upwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// `(x, y)` one panel further in this direction.
    pub fn step(self, (x, y): (i64, i64)) -> (i64, i64) {
        match self {
            Direction::Up => (x, y + 1),
            Direction::Left => (x - 1, y),
            Direction::Down => (x, y - 1),
            Direction::Right => (x + 1, y),
        }
    }
}

/// Panels painted at least once, with their final colour.
#[derive(Clone, Debug, Default)]
pub struct Hull {
    pub panels: HashMap<(i64, i64), Color>,
}

impl Hull {
    /// Number of panels painted at least once.
    pub fn painted(&self) -> usize {
        self.panels.len()
    }

    pub fn color(&self, position: (i64, i64)) -> Color {
        self.panels.get(&position).copied().unwrap_or_default()
    }

    /// Draw the painted area, top row first. White is `#`, black is `.`.
    pub fn render(&self) -> String {
        let Some(bounds) = self.bounds() else {
            return String::new();
        };
        let ((min_x, min_y), (max_x, max_y)) = bounds;
        let mut out = String::new();
        for y in (min_y..=max_y).rev() {
            for x in min_x..=max_x {
                out.push(match self.color((x, y)) {
                    Color::White => '#',
                    Color::Black => '.',
                });
            }
            let _ = writeln!(out);
        }
        out
    }

    fn bounds(&self) -> Option<((i64, i64), (i64, i64))> {
        let xs = self.panels.keys().map(|&(x, _)| x);
        let ys = self.panels.keys().map(|&(_, y)| y);
        Some(((xs.clone().min()?, ys.clone().min()?), (xs.max()?, ys.max()?)))
    }
}

/// The painting robot: camera on input, paint-and-turn commands on output.
///
/// The program emits a colour and then a turn (0 left, 1 right). The robot
/// suspends the machine after each complete pair so the driver can act on it.
#[derive(Debug)]
pub struct Robot {
    pub position: (i64, i64),
    pub direction: Direction,
    pub hull: Hull,
    /// Start panel colour, reported until the panel is first painted.
    start: Color,
    pending: Option<i64>,
    command: Option<(i64, i64)>,
}

impl Robot {
    pub fn new(start: Color) -> Self {
        Self {
            position: (0, 0),
            direction: Direction::Up,
            hull: Hull::default(),
            start,
            pending: None,
            command: None,
        }
    }

    /// Colour under the robot.
    pub fn camera(&self) -> Color {
        match self.hull.panels.get(&self.position) {
            Some(&color) => color,
            None if self.position == (0, 0) => self.start,
            None => Color::Black,
        }
    }

    /// Paint the current panel, turn, and move forward one panel.
    pub fn apply(&mut self, color: i64, turn: i64) -> Result<()> {
        let color = Color::try_from(color)?;
        self.direction = match turn {
            0 => self.direction.turn_left(),
            1 => self.direction.turn_right(),
            value => {
                return Err(Error::InvalidOutput {
                    value,
                    reason: "turn must be 0 or 1",
                });
            }
        };
        self.hull.panels.insert(self.position, color);
        self.position = self.direction.step(self.position);
        Ok(())
    }
}

impl Io for Robot {
    fn input(&mut self) -> Option<i64> {
        Some(self.camera().code())
    }

    fn output(&mut self, value: i64) -> Option<Flow> {
        match self.pending.take() {
            None => {
                self.pending = Some(value);
                Some(Flow::Continue)
            }
            Some(color) => {
                self.command = Some((color, value));
                Some(Flow::Suspend)
            }
        }
    }
}

/// Drive `computer` until it halts, applying each paint-and-turn command.
pub fn drive(computer: &mut Computer<Robot>) -> Result<()> {
    while !computer.has_halted() {
        computer.evaluate()?;
        let robot = computer.io_mut();
        if let Some((color, turn)) = robot.command.take() {
            robot.apply(color, turn)?;
        }
    }
    debug!(painted = computer.io().hull.painted(), "robot finished");
    Ok(())
}

/// Run the robot program with the start panel coloured `start`.
pub fn paint(program: &Program, start: Color) -> Result<Hull> {
    let mut computer = Computer::new(program, Robot::new(start));
    drive(&mut computer)?;
    Ok(computer.into_io().hull)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A program that reads the camera into address 100 + i before the
    /// i-th command and then emits `commands` in order.
    fn scripted(commands: &[(i64, i64)]) -> Program {
        let mut words = Vec::new();
        for (i, &(color, turn)) in commands.iter().enumerate() {
            words.extend([3, 100 + i as i64, 104, color, 104, turn]);
        }
        words.push(99);
        Program::from(words)
    }

    const EXAMPLE: [(i64, i64); 7] = [(1, 0), (0, 0), (1, 0), (1, 0), (0, 1), (1, 0), (1, 0)];

    #[test]
    fn test_turns() {
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
        for d in [Direction::Up, Direction::Left, Direction::Down, Direction::Right] {
            assert_eq!(d.turn_left().turn_right(), d);
            assert_eq!(d.turn_left().turn_left().turn_left().turn_left(), d);
        }
        assert_eq!(Direction::Down.step((0, 0)), (0, -1));
    }

    #[test]
    fn test_example_paints_six_panels() {
        let hull = paint(&scripted(&EXAMPLE), Color::Black).unwrap();
        assert_eq!(hull.painted(), 6);
        assert_eq!(hull.color((0, 0)), Color::Black);
        assert_eq!(hull.color((1, 1)), Color::White);
    }

    #[test]
    fn test_camera_feeds_program() {
        let mut computer = Computer::new(&scripted(&EXAMPLE), Robot::new(Color::Black));
        drive(&mut computer).unwrap();
        // Back on the start panel, now white, before the fifth command.
        assert_eq!(computer.memory().to_vec(107)[100..], [0i64, 0, 0, 0, 1, 0, 0]);
        let robot = computer.io();
        assert_eq!(robot.position, (0, 1));
        assert_eq!(robot.direction, Direction::Left);
    }

    #[test]
    fn test_start_white() {
        let mut computer = Computer::new(&scripted(&[(0, 1)]), Robot::new(Color::White));
        drive(&mut computer).unwrap();
        assert_eq!(computer.memory().get(100), 1);
        assert_eq!(computer.io().hull.color((0, 0)), Color::Black);
    }

    #[test]
    fn test_render() {
        let hull = paint(&scripted(&EXAMPLE), Color::Black).unwrap();
        assert_eq!(hull.render(), "..#\n..#\n##.\n");
        assert_eq!(Hull::default().render(), "");
    }

    #[test]
    fn test_invalid_turn() {
        let result = paint(&scripted(&[(1, 2)]), Color::Black);
        assert!(matches!(result, Err(Error::InvalidOutput { value: 2, .. })));
    }

    #[test]
    fn test_invalid_color() {
        let result = paint(&scripted(&[(7, 0)]), Color::Black);
        assert!(matches!(result, Err(Error::InvalidOutput { value: 7, .. })));
    }
}
