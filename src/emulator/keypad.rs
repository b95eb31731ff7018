pub const NUM_KEYS: usize = 16;

/// The hex keypad, 0x0 to 0xF. Written by the input poller,
/// only read by the executor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    /// Keys outside 0x0..=0xF are ignored.
    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(state) = self.keys.get_mut(key as usize) {
            *state = pressed;
        }
    }

    /// A key outside 0x0..=0xF is never pressed.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest-indexed key that is currently down.
    pub fn lowest_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&pressed| pressed).map(|i| i as u8)
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }
}
