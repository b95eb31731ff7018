use structopt::StructOpt;

use chip8_vm::cli::Opt;
use chip8_vm::emulator::input::DummyInput;
use chip8_vm::emulator::output::DummyOutput;
use chip8_vm::emulator::rom::read_rom;
use chip8_vm::emulator::trace::LogTracer;
use chip8_vm::emulator::{Config, Emulator, Result};

/// Run a program without input or a screen, then print what it drew.
#[derive(StructOpt)]
struct HeadlessOpt {
    /// Number of 60 Hz frames to run
    #[structopt(long, default_value = "600")]
    frames: u32,

    /// Sleep out every frame instead of running flat out
    #[structopt(long)]
    realtime: bool,

    #[structopt(flatten)]
    opt: Opt,
}

fn run(headless: HeadlessOpt) -> Result<()> {
    let config = Config {
        throttle: headless.realtime,
        ..headless.opt.config()
    };
    log::info!("Executing {:?}", &headless.opt.input);
    let program = read_rom(&headless.opt.input)?;

    let mut emulator = Emulator::with_io(config, DummyInput, DummyOutput::new());
    emulator.machine_mut().set_tracer(Box::new(LogTracer));
    emulator.load(&program)?;

    for _ in 0..headless.frames {
        emulator.run_frame()?;
    }

    print!("{}", emulator.machine().display());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(error) = run(HeadlessOpt::from_args()) {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
