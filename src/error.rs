use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while loading or running an Intcode program.
#[derive(Debug, Error)]
pub enum Error {
    /// A token of the program text is not a base-10 integer.
    #[error("malformed program: token {index} ({token:?}) is not an integer")]
    Parse { index: usize, token: String },

    /// The program file could not be read.
    #[error("cannot read program: {0}")]
    Io(#[from] std::io::Error),

    /// The word at `address` does not decode to a known instruction.
    #[error("unknown instruction {value} at address {address}")]
    UnknownOpcode { value: i64, address: u64 },

    /// An input instruction ran but no input was supplied.
    #[error("input instruction at address {address} but no input is available")]
    MissingInput { address: u64 },

    /// An output instruction ran but no output sink was supplied.
    #[error("output instruction at address {address} but no output sink is attached")]
    MissingOutput { address: u64 },

    /// A parameter resolved to an address below zero.
    #[error("negative address {address} for instruction at {ip}")]
    NegativeAddress { address: i64, ip: u64 },

    /// The machine failed earlier and cannot be resumed.
    #[error("machine stopped after a fatal error")]
    Poisoned,

    /// A host received an output value it has no meaning for.
    #[error("invalid output {value}: {reason}")]
    InvalidOutput { value: i64, reason: &'static str },
}
