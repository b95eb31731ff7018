//! An optional hook that sees every executed instruction.

use crate::emulator::instruction::Instruction;
use crate::emulator::opcode::Opcode;

/// One executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    /// Where the instruction was fetched from.
    pub address: u16,
    pub opcode: Opcode,
    pub instruction: Instruction,
    /// Program counter after execution.
    pub pc: u16,
    pub index: u16,
    pub registers: [u8; 16],
}

pub trait Tracer {
    fn trace(&mut self, event: &TraceEvent);
}

/// Writes every instruction to the `trace` log level.
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&mut self, event: &TraceEvent) {
        log::trace!(
            "{:#06x}: {} {:<16} pc={:#06x} i={:#06x} v={:02x?}",
            event.address,
            event.opcode,
            event.instruction.to_string(),
            event.pc,
            event.index,
            event.registers
        );
    }
}
