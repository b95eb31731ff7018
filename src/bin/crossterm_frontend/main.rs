use structopt::StructOpt;

use chip8_vm::cli::Opt;
use chip8_vm::emulator::rom::read_rom;
use chip8_vm::emulator::trace::LogTracer;
use chip8_vm::emulator::{Emulator, Result};

mod crossterm_io;
mod key_buffer;
use crossterm_io::{CrosstermInput, CrosstermOutput};

fn run(opt: Opt) -> Result<()> {
    let config = opt.config();
    log::info!("Executing {:?}", &opt.input);
    let program = read_rom(&opt.input)?;

    let output = CrosstermOutput::new(&config)?;
    let mut emulator = Emulator::with_io(config, CrosstermInput::new(), output);
    if log::log_enabled!(log::Level::Trace) {
        emulator.machine_mut().set_tracer(Box::new(LogTracer));
    }

    // Load instructions into emulator memory, then start execution
    emulator.load(&program)?;
    emulator.run()
}

fn main() {
    env_logger::init();

    // Get configuration, a missing ROM path exits with usage
    let opt = Opt::from_args();

    if let Err(error) = run(opt) {
        log::error!("{}", error);
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}
