// src/meter/mod.rs

//! Device-side frame construction, the inverse of the host decoder.
//!
//! Lets a harness emulate a meter on the wire: pick digits, decimal
//! position, sign, mode flags and unit, and get the 10-byte frame the real
//! hardware would send.

use crate::common::{
    digit::DIGIT_CODES,
    frame::{RawFrame, PAYLOAD_LEN},
    reading::ModeFlags,
    unit::{BaseUnit, UnitPrefix},
};
use core::fmt;

/// Error from [`FrameBuilder::build`] when an input cannot be represented.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameBuildError {
    /// A display digit was outside 0..=9.
    DigitOutOfRange(u8),
    /// Decimal places outside 0..=3.
    DecimalOutOfRange(u8),
}

impl fmt::Display for FrameBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameBuildError::DigitOutOfRange(digit) => {
                write!(f, "display digit {} is not in 0..=9", digit)
            }
            FrameBuildError::DecimalOutOfRange(places) => {
                write!(f, "{} decimal places exceed the 4-digit display", places)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FrameBuildError {}

/// Builds raw frames field by field.
///
/// Defaults to "0000": no decimal point, positive, no flags, bare unit.
#[derive(Debug, Clone, Default)]
pub struct FrameBuilder {
    digits: [u8; 4],
    decimal_places: u8,
    negative: bool,
    flags: ModeFlags,
    prefix: Option<UnitPrefix>,
    base_unit: Option<BaseUnit>,
}

impl FrameBuilder {
    pub fn new() -> Self {
        FrameBuilder::default()
    }

    /// Display digits, most significant first.
    pub fn digits(mut self, digits: [u8; 4]) -> Self {
        self.digits = digits;
        self
    }

    /// Number of digits shown after the decimal point (0..=3).
    ///
    /// Three decimal places share a wire bit with the `u` prefix; a frame
    /// built with either decodes as carrying both.
    pub fn decimal_places(mut self, places: u8) -> Self {
        self.decimal_places = places;
        self
    }

    pub fn negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    pub fn flags(mut self, flags: ModeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn prefix(mut self, prefix: UnitPrefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    pub fn base_unit(mut self, base: BaseUnit) -> Self {
        self.base_unit = Some(base);
        self
    }

    /// Emits the frame, validating the display fields first.
    pub fn build(self) -> Result<RawFrame, FrameBuildError> {
        for &digit in &self.digits {
            if digit > 9 {
                return Err(FrameBuildError::DigitOutOfRange(digit));
            }
        }
        if self.decimal_places > 3 {
            return Err(FrameBuildError::DecimalOutOfRange(self.decimal_places));
        }

        // Digit bytes: segment code plus the marker in bit 7.
        let [d3, d2, d1, d0] = self.digits;
        let mut digit3 = DIGIT_CODES[d3 as usize];
        let mut digit2 = DIGIT_CODES[d2 as usize];
        let mut digit1 = DIGIT_CODES[d1 as usize];
        let mut digit0 = DIGIT_CODES[d0 as usize];
        match self.decimal_places {
            1 => digit0 |= 0x80,
            2 => digit1 |= 0x80,
            3 => digit2 |= 0x80,
            _ => {}
        }
        if self.negative {
            digit3 |= 0x80;
        }

        // Interleave the digit bytes back into the overlapped nibble layout;
        // payload[i] is frame byte i + 2.
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0] = (digit3 & 0xf0) | flags_nibble(self.flags);
        payload[1] = (digit2 & 0xf0) | (digit3 & 0x0f);
        payload[2] = (digit1 & 0xf0) | (digit2 & 0x0f);
        payload[3] = (digit0 & 0xf0) | (digit1 & 0x0f);
        payload[4] = digit0 & 0x0f;

        match self.prefix {
            Some(UnitPrefix::Nano) => payload[4] |= 1 << 7,
            Some(UnitPrefix::Micro) => payload[1] |= 1 << 7, // aliases the /1000 marker
            Some(UnitPrefix::Milli) => payload[5] |= 1 << 7,
            Some(UnitPrefix::Kilo) => payload[5] |= 1 << 1,
            Some(UnitPrefix::Mega) => payload[5] |= 1 << 5,
            None => {}
        }
        match self.base_unit {
            Some(BaseUnit::Ohm) => payload[4] |= 1 << 6,
            Some(BaseUnit::Percent) => payload[5] |= 1 << 6,
            Some(BaseUnit::Farad) => payload[5] |= 1 << 2,
            Some(BaseUnit::Fahrenheit) => payload[6] |= 1 << 7,
            Some(BaseUnit::Celsius) => payload[6] |= 1 << 6,
            Some(BaseUnit::Ampere) => payload[6] |= 1 << 3,
            Some(BaseUnit::Volt) => payload[6] |= 1 << 2,
            Some(BaseUnit::Hertz) => payload[6] |= 1 << 1,
            None => {}
        }

        Ok(RawFrame::from_payload(payload))
    }
}

fn flags_nibble(flags: ModeFlags) -> u8 {
    let mut nibble = 0u8;
    if flags.usb {
        nibble |= 1 << 0;
    }
    if flags.auto_range {
        nibble |= 1 << 1;
    }
    if flags.dc {
        nibble |= 1 << 2;
    }
    if flags.ac {
        nibble |= 1 << 3;
    }
    nibble
}
