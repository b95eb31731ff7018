use crate::emulator::display::Display;
use crate::emulator::error::Result;

/// Represents an output device that shows the screen once per frame.
pub trait EmulatorOutput {
    fn render(&mut self, display: &Display) -> Result<()>;

    /// Called every frame with whether the sound timer is running.
    fn sound(&mut self, _active: bool) {}
}

/// A simple output device that keeps the last frame it was given.
pub struct DummyOutput {
    last_frame: Option<Display>,
    frames: usize,
    beeping_frames: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            last_frame: None,
            frames: 0,
            beeping_frames: 0,
        }
    }

    pub fn last_frame(&self) -> Option<&Display> {
        self.last_frame.as_ref()
    }

    /// Number of frames rendered so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn beeping_frames(&self) -> usize {
        self.beeping_frames
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn render(&mut self, display: &Display) -> Result<()> {
        self.last_frame = Some(display.clone());
        self.frames += 1;
        Ok(())
    }

    fn sound(&mut self, active: bool) {
        if active {
            self.beeping_frames += 1;
        }
    }
}
