use crate::emulator::config::{Config, FRAME_BUDGET};
use crate::emulator::error::Result;
use crate::emulator::input::{DummyInput, EmulatorInput, InputEvent};
use crate::emulator::machine::Machine;
use crate::emulator::output::{DummyOutput, EmulatorOutput};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Quit,
}

/// A machine hooked up to an input and an output device, driven one 60 Hz frame at a time.
pub struct Emulator<I: EmulatorInput, O: EmulatorOutput> {
    machine: Machine,
    config: Config,
    state: RunState,

    input: I,
    output: O,
}

impl<I: EmulatorInput, O: EmulatorOutput> Emulator<I, O> {
    /// Create a new emulator with input and output
    pub fn with_io(config: Config, input: I, output: O) -> Emulator<I, O> {
        Emulator {
            machine: Machine::new(config.quirks),
            config,
            state: RunState::Running,
            input,
            output,
        }
    }

    /// Swap in a prepared machine, e.g. one with a fixed seed or a tracer.
    pub fn with_machine(mut self, machine: Machine) -> Self {
        self.machine = machine;
        self
    }

    /// Copy a program into memory at 0x200.
    pub fn load(&mut self, program: &[u8]) -> Result<()> {
        self.machine.load(program)
    }

    /// Run frames until quit is requested.
    pub fn run(&mut self) -> Result<()> {
        while self.state != RunState::Quit {
            self.run_frame()?;
        }
        log::info!("Quitting");
        Ok(())
    }

    /// Poll input, then, unless paused or quitting, execute one batch of instructions,
    /// wait out the frame, render and tick the timers.
    pub fn run_frame(&mut self) -> Result<()> {
        self.poll_input()?;
        if self.state != RunState::Running {
            return Ok(());
        }

        let start = Instant::now();
        for _ in 0..self.config.instructions_per_frame() {
            self.machine.step()?;
        }
        if self.config.throttle {
            std::thread::sleep(remaining_budget(start.elapsed()));
        }

        self.output.render(self.machine.display())?;
        self.output.sound(self.machine.timers().sound_active());
        self.machine.tick_timers();
        Ok(())
    }

    fn poll_input(&mut self) -> Result<()> {
        for event in self.input.poll()? {
            match event {
                InputEvent::KeyDown(key) => self.machine.keypad_mut().press(key),
                InputEvent::KeyUp(key) => self.machine.keypad_mut().release(key),
                InputEvent::TogglePause => self.toggle_pause(),
                InputEvent::Quit => self.state = RunState::Quit,
            }
        }
        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.state = match self.state {
            RunState::Running => {
                log::info!("======= EMULATOR PAUSED =======");
                RunState::Paused
            }
            RunState::Paused => {
                log::info!("Resuming");
                RunState::Running
            }
            RunState::Quit => RunState::Quit,
        };
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine {
        &mut self.machine
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

impl Emulator<DummyInput, DummyOutput> {
    /// Create a new emulator with dummy input and output
    pub fn new() -> Emulator<DummyInput, DummyOutput> {
        Emulator::with_io(Config::default(), DummyInput, DummyOutput::new())
    }
}

impl Default for Emulator<DummyInput, DummyOutput> {
    fn default() -> Self {
        Self::new()
    }
}

/// What is left of the frame budget after spending `elapsed` on instructions.
pub fn remaining_budget(elapsed: Duration) -> Duration {
    FRAME_BUDGET.checked_sub(elapsed).unwrap_or_default()
}
