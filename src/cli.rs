//! Command line options shared by the frontends.

use crate::emulator::{Config, Quirks, Rgba};
use std::path::PathBuf;
use structopt::StructOpt;

/// The program options.
#[derive(StructOpt, Debug)]
pub struct Opt {
    /// Instructions executed per second
    #[structopt(long, default_value = "700")]
    pub ips: u32,

    /// Size of one CHIP-8 pixel
    #[structopt(long, default_value = "1")]
    pub scale: u32,

    /// Colour of lit pixels, RRGGBB or RRGGBBAA
    #[structopt(long, default_value = "FFFFFFFF")]
    pub fg: Rgba,

    /// Colour of unlit pixels, RRGGBB or RRGGBBAA
    #[structopt(long, default_value = "000000FF")]
    pub bg: Rgba,

    /// Make 8XY1, 8XY2 and 8XY3 reset VF
    #[structopt(long)]
    pub vf_reset: bool,

    /// Make 8XY6 and 8XYE shift VY into VX
    #[structopt(long)]
    pub shift_vy: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    pub input: PathBuf,
}

impl Opt {
    pub fn config(&self) -> Config {
        Config {
            instructions_per_second: self.ips,
            scale_factor: self.scale.max(1),
            foreground: self.fg,
            background: self.bg,
            quirks: Quirks {
                logic_resets_vf: self.vf_reset,
                shift_reads_vy: self.shift_vy,
            },
            throttle: true,
        }
    }
}
