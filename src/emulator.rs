//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod config;
pub mod display;
pub mod error;
mod executor;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod rom;
pub mod scheduler;
pub mod stack;
pub mod timers;
pub mod trace;

pub use config::{Config, Quirks, Rgba};
pub use error::{Error, Result};
pub use machine::{Execution, Machine};
pub use scheduler::{Emulator, RunState};
