use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::instruction::{Instruction, Mode, Opcode};
use crate::io::{Flow, Io, NoIo, Queue};
use crate::memory::Memory;
use crate::program::Program;

/// An Intcode machine.
///
/// State is memory, the instruction pointer, the relative base and the
/// most recently fetched instruction. Values enter and leave only through
/// the [`Io`] state holder `T`.
///
/// Execution is driven by [`Computer::evaluate`], which runs until the
/// program halts or until the output sink asks to suspend. A suspended
/// machine resumes at the instruction after the output on the next call.
/// Halting is permanent.
#[derive(Debug)]
pub struct Computer<T = NoIo> {
    memory: Memory,
    ip: u64,
    base: i64,
    instruction: Option<Instruction>,
    halted: bool,
    poisoned: bool,
    io: T,
}

impl<T: Io> Computer<T> {
    pub fn new(program: &Program, io: T) -> Self {
        Self {
            memory: Memory::from(program),
            ip: 0,
            base: 0,
            instruction: None,
            halted: false,
            poisoned: false,
            io,
        }
    }

    /// Build from a path or inline program text, see [`Program::source`].
    pub fn from_source(source: &str, io: T) -> Result<Self> {
        Ok(Self::new(&Program::source(source)?, io))
    }

    pub fn io(&self) -> &T {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut T {
        &mut self.io
    }

    pub fn into_io(self) -> T {
        self.io
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Direct access for seeding memory between runs.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn ip(&self) -> u64 {
        self.ip
    }

    pub fn relative_base(&self) -> i64 {
        self.base
    }

    /// True once opcode 99 has been fetched.
    pub fn has_halted(&self) -> bool {
        self.halted
    }

    /// Decode the word at `ip` without advancing it.
    pub fn fetch(&mut self) -> Result<Instruction> {
        let word = self.memory.get(self.ip);
        let instruction = Instruction::decode(word).ok_or(Error::UnknownOpcode {
            value: word,
            address: self.ip,
        })?;
        if instruction.opcode == Opcode::Halt {
            self.halted = true;
        }
        self.instruction = Some(instruction);
        Ok(instruction)
    }

    /// Address that 1-indexed parameter `param` of the current instruction
    /// refers to. Immediate parameters refer to their own slot.
    fn address(&self, param: u64) -> Result<u64> {
        let mode = self
            .instruction
            .map_or(Mode::Position, |inst| inst.mode(param));
        let slot = self.ip + param;
        let address = match mode {
            Mode::Immediate => return Ok(slot),
            Mode::Position => self.memory.get(slot),
            Mode::Relative => self.base.wrapping_add(self.memory.get(slot)),
        };
        self.check_address(address)
    }

    fn check_address(&self, address: i64) -> Result<u64> {
        u64::try_from(address).map_err(|_| Error::NegativeAddress {
            address,
            ip: self.ip,
        })
    }

    /// Value of parameter `param`, resolved through its mode.
    pub fn read(&self, param: u64) -> Result<i64> {
        Ok(self.memory.get(self.address(param)?))
    }

    /// Store `value` at the address parameter `param` resolves to.
    pub fn write(&mut self, param: u64, value: i64) -> Result<()> {
        let address = self.address(param)?;
        self.memory.set(address, value);
        Ok(())
    }

    /// Run until halt or until the output sink returns [`Flow::Suspend`].
    ///
    /// Calling this on a halted machine does nothing. Any error leaves the
    /// machine unusable; later calls return [`Error::Poisoned`].
    pub fn evaluate(&mut self) -> Result<()> {
        if self.poisoned {
            return Err(Error::Poisoned);
        }
        if self.halted {
            return Ok(());
        }
        let result = self.execute();
        if let Err(ref err) = result {
            debug!(ip = self.ip, %err, "machine stopped");
            self.poisoned = true;
        }
        result
    }

    fn execute(&mut self) -> Result<()> {
        loop {
            let inst = self.fetch()?;
            trace!(ip = self.ip, base = self.base, ?inst, "execute");
            let mut suspend = false;
            let jump = match inst.opcode {
                Opcode::Halt => {
                    debug!(ip = self.ip, "halted");
                    return Ok(());
                }
                Opcode::Add => {
                    let value = self.read(1)?.wrapping_add(self.read(2)?);
                    self.write(3, value)?;
                    None
                }
                Opcode::Multiply => {
                    let value = self.read(1)?.wrapping_mul(self.read(2)?);
                    self.write(3, value)?;
                    None
                }
                Opcode::Input => {
                    let value = self
                        .io
                        .input()
                        .ok_or(Error::MissingInput { address: self.ip })?;
                    self.write(1, value)?;
                    None
                }
                Opcode::Output => {
                    let value = self.read(1)?;
                    let flow = self
                        .io
                        .output(value)
                        .ok_or(Error::MissingOutput { address: self.ip })?;
                    suspend = flow == Flow::Suspend;
                    None
                }
                Opcode::JumpIfTrue => {
                    let cond = self.read(1)?;
                    let target = self.read(2)?;
                    if cond != 0 { Some(target) } else { None }
                }
                Opcode::JumpIfFalse => {
                    let cond = self.read(1)?;
                    let target = self.read(2)?;
                    if cond == 0 { Some(target) } else { None }
                }
                Opcode::LessThan => {
                    let value = (self.read(1)? < self.read(2)?) as i64;
                    self.write(3, value)?;
                    None
                }
                Opcode::Equals => {
                    let value = (self.read(1)? == self.read(2)?) as i64;
                    self.write(3, value)?;
                    None
                }
                Opcode::AdjustBase => {
                    self.base = self.base.wrapping_add(self.read(1)?);
                    None
                }
            };

            self.ip = match jump {
                Some(target) => self.check_address(target)?,
                None => self.ip + inst.opcode.width(),
            };

            if suspend {
                debug!(ip = self.ip, "suspended after output");
                return Ok(());
            }
        }
    }
}

/// Run `program` to completion, feeding `inputs` in order, and return
/// everything it printed.
pub fn run(program: &Program, inputs: impl IntoIterator<Item = i64>) -> Result<Vec<i64>> {
    let mut computer = Computer::new(program, Queue::new(inputs));
    computer.evaluate()?;
    Ok(computer.into_io().outputs)
}
