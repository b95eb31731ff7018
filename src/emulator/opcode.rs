use std::fmt;

/// A single 16-bit instruction word, with accessors
/// for the standard named bit-fields.
///
/// ```text
///  family  x     y     n
/// [ 1111 | 1111 | 1111 | 1111 ]
///        [     nnn          ]
///               [    nn     ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(u16);

impl Opcode {
    pub fn new(value: u16) -> Opcode {
        Opcode(value)
    }

    /// Combine two bytes, big-endian, as they are stored in memory.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode(((high as u16) << 8) | low as u16)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    /// The top nibble, which selects the instruction family.
    pub fn family(&self) -> u8 {
        ((self.0 >> 12) & 0xF) as u8
    }

    pub fn x(&self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub fn y(&self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub fn n(&self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    pub fn nn(&self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(&self) -> u16 {
        self.0 & 0x0FFF
    }

    /// All four nibbles, most significant first.
    pub fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }
}

impl From<u16> for Opcode {
    fn from(value: u16) -> Self {
        Opcode(value)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_bytes_is_big_endian() {
        assert_eq!(Opcode::new(0x1234), Opcode::from_bytes(0x12, 0x34));
        assert_eq!(Opcode::new(0xF0F0), Opcode::from_bytes(0xF0, 0xF0));
        assert_eq!(Opcode::new(0x00FF), Opcode::from_bytes(0x00, 0xFF));
    }

    #[test]
    fn get_components() {
        let opcode = Opcode::new(0xABCD);
        assert_eq!(0xA, opcode.family());
        assert_eq!(0xB, opcode.x());
        assert_eq!(0xC, opcode.y());
        assert_eq!(0xD, opcode.n());
        assert_eq!(0xCD, opcode.nn());
        assert_eq!(0xBCD, opcode.nnn());
        assert_eq!((0xA, 0xB, 0xC, 0xD), opcode.nibbles());
    }

    #[test]
    fn displays_as_four_hex_digits() {
        assert_eq!("00E0", Opcode::new(0x00E0).to_string());
        assert_eq!("D01F", Opcode::new(0xD01F).to_string());
    }

    proptest! {
        #[test]
        fn fields_match_bitmasks(word in any::<u16>()) {
            let opcode = Opcode::new(word);
            prop_assert_eq!(opcode.nnn(), word & 0x0FFF);
            prop_assert_eq!(opcode.nn() as u16, word & 0x00FF);
            prop_assert_eq!(opcode.n() as u16, word & 0x000F);
            prop_assert_eq!(opcode.x() as u16, (word >> 8) & 0xF);
            prop_assert_eq!(opcode.y() as u16, (word >> 4) & 0xF);
            prop_assert_eq!(opcode.family() as u16, (word >> 12) & 0xF);
        }

        #[test]
        fn bytes_round_trip(high in any::<u8>(), low in any::<u8>()) {
            let opcode = Opcode::from_bytes(high, low);
            prop_assert_eq!(opcode.raw() >> 8, high as u16);
            prop_assert_eq!(opcode.nn(), low);
        }
    }
}
