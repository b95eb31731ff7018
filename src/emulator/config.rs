use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const FRAMES_PER_SECOND: u32 = 60;

/// Time slice for one batch of instructions, one render and one timer tick.
pub const FRAME_BUDGET: Duration = Duration::from_micros(16_670);

/// Behaviour that differs between historical interpreters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quirks {
    /// 8XY1, 8XY2 and 8XY3 set VF to 0.
    pub logic_resets_vf: bool,
    /// 8XY6 and 8XYE shift VY into VX instead of shifting VX in place.
    pub shift_reads_vy: bool,
}

/// Settings read by the scheduler and the frontends. Never changed by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub instructions_per_second: u32,
    pub scale_factor: u32,
    pub foreground: Rgba,
    pub background: Rgba,
    pub quirks: Quirks,
    /// Sleep away the rest of each frame budget.
    pub throttle: bool,
}

impl Config {
    pub fn instructions_per_frame(&self) -> u32 {
        self.instructions_per_second / FRAMES_PER_SECOND
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instructions_per_second: 700,
            scale_factor: 1,
            foreground: Rgba(0xFFFF_FFFF),
            background: Rgba(0x0000_00FF),
            quirks: Quirks::default(),
            throttle: true,
        }
    }
}

/// A colour packed as 0xRRGGBBAA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba(pub u32);

impl Rgba {
    pub fn r(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn b(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn a(&self) -> u8 {
        self.0 as u8
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRgbaError(String);

impl fmt::Display for ParseRgbaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid colour {:?}, expected RRGGBB or RRGGBBAA in hex", self.0)
    }
}

impl std::error::Error for ParseRgbaError {}

/// Parses `RRGGBB` or `RRGGBBAA`, optionally prefixed by `#` or `0x`.
impl FromStr for Rgba {
    type Err = ParseRgbaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseRgbaError(s.to_string());
        let hex = s.trim_start_matches('#').trim_start_matches("0x");
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(error());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| error())?;
        match hex.len() {
            6 => Ok(Rgba((value << 8) | 0xFF)),
            8 => Ok(Rgba(value)),
            _ => Err(error()),
        }
    }
}
