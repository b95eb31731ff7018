use std::io;
use std::path::PathBuf;

/// Everything that can stop the machine.
///
/// An unrecognized opcode is deliberately not in here, it decodes to
/// `Instruction::Unknown` and execution carries on.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to initialize frontend: {0}")]
    Initialization(String),

    #[error("could not read ROM {path:?}: {source}")]
    RomRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("cannot fetch instruction at {pc:#06x}, program counter is outside of memory")]
    Decode { pc: u16 },

    #[error("memory access out of bounds at {address:#06x}")]
    MemoryOutOfBounds { address: usize },

    #[error("write to read-only font memory at {address:#06x}")]
    ReadOnlyMemory { address: usize },

    #[error("call stack overflow, capacity is {capacity}")]
    StackOverflow { capacity: usize },

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("frontend error: {0}")]
    Frontend(String),
}

pub type Result<T> = std::result::Result<T, Error>;
