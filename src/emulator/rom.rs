use crate::emulator::error::{Error, Result};
use crate::emulator::memory::MAX_PROGRAM_SIZE;
use std::path::Path;

/// Read a ROM file, refusing anything that does not fit above 0x200.
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let program = std::fs::read(path).map_err(|source| Error::RomRead {
        path: path.to_path_buf(),
        source,
    })?;
    if program.len() > MAX_PROGRAM_SIZE {
        return Err(Error::RomTooLarge {
            size: program.len(),
            max: MAX_PROGRAM_SIZE,
        });
    }
    log::info!("Read {} bytes from {:?}", program.len(), path);
    Ok(program)
}
