use crate::emulator::error::{Error, Result};
use crate::emulator::opcode::Opcode;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;

/// Bytes per font glyph.
pub const GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// The 4K address space. The font lives at the bottom and cannot be
/// overwritten, programs are loaded at 0x200.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Create zeroed memory with the font loaded.
    pub fn new() -> Memory {
        let mut bytes = [0; MEM_SIZE];
        bytes[..FONT.len()].copy_from_slice(&FONT);
        Memory { bytes }
    }

    /// Copy a program into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Error::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.bytes
            .get(address)
            .copied()
            .ok_or(Error::MemoryOutOfBounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        if address < FONT.len() {
            return Err(Error::ReadOnlyMemory { address });
        }
        let byte = self
            .bytes
            .get_mut(address)
            .ok_or(Error::MemoryOutOfBounds { address })?;
        *byte = value;
        Ok(())
    }

    /// Borrow `len` bytes starting at `address`.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        let end = address + len;
        if end > MEM_SIZE {
            return Err(Error::MemoryOutOfBounds { address: end - 1 });
        }
        Ok(&self.bytes[address..end])
    }

    /// Read the big-endian instruction word at `pc`.
    pub fn fetch(&self, pc: u16) -> Result<Opcode> {
        let address = pc as usize;
        if address + 1 >= MEM_SIZE {
            return Err(Error::Decode { pc });
        }
        Ok(Opcode::from_bytes(self.bytes[address], self.bytes[address + 1]))
    }

    /// Address of the built-in glyph for a hex digit.
    pub fn font_address(digit: u8) -> u16 {
        digit as u16 * GLYPH_SIZE
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
