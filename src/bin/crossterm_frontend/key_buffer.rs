use chip8_vm::emulator::keypad::NUM_KEYS;
use std::time::{Duration, Instant};

/// Terminals only report key presses, never releases.
/// A `KeyBuffer` treats a key as held until `timeout` has passed since its last press,
/// which keyboard auto-repeat keeps refreshing while the key is down.
pub struct KeyBuffer {
    timeout: Duration,
    last_pressed: [Option<Instant>; NUM_KEYS],
}

impl KeyBuffer {
    /// Create a new `KeyBuffer` that releases keys `timeout` after their last press.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            last_pressed: [None; NUM_KEYS],
        }
    }

    /// Record a keypress. Returns true if the key was not already held.
    pub fn push(&mut self, key: u8, now: Instant) -> bool {
        match self.last_pressed.get_mut(key as usize) {
            Some(slot) => slot.replace(now).is_none(),
            None => false,
        }
    }

    /// Release every key whose last press is older than the timeout.
    pub fn expire(&mut self, now: Instant) -> Vec<u8> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        for (key, slot) in self.last_pressed.iter_mut().enumerate() {
            if let Some(pressed_at) = *slot {
                if now.duration_since(pressed_at) >= timeout {
                    *slot = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn first_push_presses() {
        let mut kb = KeyBuffer::new(Duration::from_millis(100));
        let now = Instant::now();
        assert!(kb.push(0x5, now));
        assert!(!kb.push(0x5, now));
        assert!(!kb.push(0x10, now));
    }

    #[test]
    fn keys_are_released_after_the_timeout() {
        let mut kb = KeyBuffer::new(Duration::from_millis(100));
        let start = Instant::now();
        kb.push(0x1, start);
        kb.push(0x2, start + Duration::from_millis(60));

        assert!(kb.expire(start + Duration::from_millis(50)).is_empty());
        assert_eq!(vec![0x1], kb.expire(start + Duration::from_millis(120)));
        assert_eq!(vec![0x2], kb.expire(start + Duration::from_millis(200)));
        assert!(kb.expire(start + Duration::from_millis(300)).is_empty());
    }

    #[test]
    fn repeated_presses_keep_a_key_held() {
        let mut kb = KeyBuffer::new(Duration::from_millis(100));
        let start = Instant::now();
        kb.push(0x3, start);
        kb.push(0x3, start + Duration::from_millis(80));
        assert!(kb.expire(start + Duration::from_millis(150)).is_empty());
        assert!(!kb.push(0x3, start + Duration::from_millis(400)));
    }
}
