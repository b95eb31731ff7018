use crate::emulator::error::Result;

/// Something that happened on the input device since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u8),
    KeyUp(u8),
    TogglePause,
    Quit,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF,
/// plus the quit and pause controls.
pub trait EmulatorInput {
    /// Drain the events that arrived since the last call. Must not block.
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        Ok(Vec::new())
    }
}

/// Hands out a prepared list of events, one batch per poll.
/// Once the script runs out it stays quiet.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: std::collections::VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new<F>(frames: F) -> ScriptedInput
    where
        F: IntoIterator<Item = Vec<InputEvent>>,
    {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn push(&mut self, events: Vec<InputEvent>) {
        self.frames.push_back(events);
    }
}

impl EmulatorInput for ScriptedInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}
