use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write;

use tracing::debug;

use crate::computer::Computer;
use crate::error::{Error, Result};
use crate::io::{Flow, Io};
use crate::program::Program;

/// Address the game reads to decide whether coins are required.
const COIN_ADDRESS: u64 = 0;
/// Value at [`COIN_ADDRESS`] that enables free play.
const FREE_PLAY: i64 = 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Block,
    Paddle,
    Ball,
}

impl Tile {
    fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Block => '+',
            Tile::Paddle => '-',
            Tile::Ball => 'o',
        }
    }
}

impl TryFrom<i64> for Tile {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        Ok(match value {
            0 => Tile::Empty,
            1 => Tile::Wall,
            2 => Tile::Block,
            3 => Tile::Paddle,
            4 => Tile::Ball,
            _ => {
                return Err(Error::InvalidOutput {
                    value,
                    reason: "tile id must be between 0 and 4",
                });
            }
        })
    }
}

/// Options for a game session.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArcadeConfig {
    /// Patch memory so the game runs without coins.
    pub free_play: bool,
}

/// The arcade cabinet: a screen fed by `(x, y, tile)` output triples and a
/// joystick that follows the ball.
///
/// The triple `(-1, 0, n)` sets the score display to `n` instead of
/// drawing a tile.
#[derive(Debug, Default)]
pub struct Cabinet {
    pub screen: HashMap<(i64, i64), Tile>,
    pub score: i64,
    pub ball_x: Option<i64>,
    pub paddle_x: Option<i64>,
    buffer: Vec<i64>,
    error: Option<Error>,
}

impl Cabinet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of block tiles currently on screen.
    pub fn blocks(&self) -> usize {
        self.screen.values().filter(|&&t| t == Tile::Block).count()
    }

    /// Joystick position: -1 left, 0 neutral, 1 right.
    pub fn joystick(&self) -> i64 {
        match (self.ball_x, self.paddle_x) {
            (Some(ball), Some(paddle)) => match ball.cmp(&paddle) {
                Ordering::Less => -1,
                Ordering::Equal => 0,
                Ordering::Greater => 1,
            },
            _ => 0,
        }
    }

    fn draw(&mut self, x: i64, y: i64, id: i64) -> Result<()> {
        if (x, y) == (-1, 0) {
            self.score = id;
            return Ok(());
        }
        let tile = Tile::try_from(id)?;
        match tile {
            Tile::Ball => self.ball_x = Some(x),
            Tile::Paddle => self.paddle_x = Some(x),
            _ => {}
        }
        self.screen.insert((x, y), tile);
        Ok(())
    }

    /// Draw the screen, one text row per tile row.
    pub fn render(&self) -> String {
        let max_x = self.screen.keys().map(|&(x, _)| x).max().unwrap_or(-1);
        let max_y = self.screen.keys().map(|&(_, y)| y).max().unwrap_or(-1);
        let mut out = String::new();
        for y in 0..=max_y {
            for x in 0..=max_x {
                out.push(self.screen.get(&(x, y)).copied().unwrap_or_default().glyph());
            }
            let _ = writeln!(out);
        }
        out
    }
}

impl Io for Cabinet {
    fn input(&mut self) -> Option<i64> {
        Some(self.joystick())
    }

    fn output(&mut self, value: i64) -> Option<Flow> {
        self.buffer.push(value);
        if let [x, y, id] = self.buffer[..] {
            self.buffer.clear();
            if let Err(err) = self.draw(x, y, id) {
                // Stop the machine; the driver reports the error.
                self.error = Some(err);
                return Some(Flow::Suspend);
            }
        }
        Some(Flow::Continue)
    }
}

/// Run the game to completion and return the final cabinet state.
pub fn play(program: &Program, config: ArcadeConfig) -> Result<Cabinet> {
    let mut computer = Computer::new(program, Cabinet::new());
    if config.free_play {
        computer.memory_mut().set(COIN_ADDRESS, FREE_PLAY);
    }
    while !computer.has_halted() {
        computer.evaluate()?;
        if let Some(err) = computer.io_mut().error.take() {
            return Err(err);
        }
    }
    let cabinet = computer.into_io();
    debug!(score = cabinet.score, blocks = cabinet.blocks(), "game over");
    Ok(cabinet)
}
