// src/common/reading.rs

use super::digit::{segment_digit, SEGMENT_MASK};
use super::error::FrameDecodeError;
use super::frame::RawFrame;
use super::unit::{BaseUnit, Unit, UnitPrefix};
use core::fmt;

/// Measurement mode indicators, one status bit each.
///
/// The bits are independent on the wire and not mutually exclusive, so all
/// four are plain booleans.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ModeFlags {
    pub ac: bool,
    pub dc: bool,
    pub auto_range: bool,
    pub usb: bool,
}

/// One decoded display snapshot: what the meter showed when the frame was
/// sent.
///
/// Derived purely from the frame content; immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Signed measurement value with decimal point and sign applied.
    pub value: f32,
    /// Magnitude prefix(es) and base unit.
    pub unit: Unit,
    /// Measurement mode indicators.
    pub flags: ModeFlags,
}

#[inline]
const fn bit(byte: u8, n: u8) -> bool {
    byte & (1 << n) != 0
}

impl Reading {
    /// Decodes a validated frame into a reading.
    ///
    /// Pure function of the frame; may be called concurrently on independent
    /// frames.
    pub fn from_frame(frame: &RawFrame) -> Result<Self, FrameDecodeError> {
        let raw = frame.as_bytes();

        let flags = ModeFlags {
            usb: bit(raw[2], 0),
            auto_range: bit(raw[2], 1),
            dc: bit(raw[2], 2),
            ac: bit(raw[2], 3),
        };

        // Digit bytes straddle the frame: each combines the high nibble of
        // one byte with the low nibble of the next. Bit 7 of each is the
        // decimal-point/sign marker, not part of the segment code.
        let digit3 = (raw[2] & 0xf0) | (raw[3] & 0x0f);
        let digit2 = (raw[3] & 0xf0) | (raw[4] & 0x0f);
        let digit1 = (raw[4] & 0xf0) | (raw[5] & 0x0f);
        let digit0 = (raw[5] & 0xf0) | (raw[6] & 0x0f);

        let mut magnitude: u32 = 0;
        for (i, &code) in [digit3, digit2, digit1, digit0].iter().enumerate() {
            let position = (3 - i) as u8;
            let digit = segment_digit(code).ok_or(FrameDecodeError::InvalidDigitPattern {
                pattern: code & SEGMENT_MASK,
                position,
            })?;
            magnitude = magnitude * 10 + u32::from(digit);
        }

        // Decimal markers are cumulative and applied in wire order (by 10,
        // then 100, then 1000) before sign negation; the order matters for
        // float rounding.
        let mut value = magnitude as f32;
        if bit(digit0, 7) {
            value /= 10.0;
        }
        if bit(digit1, 7) {
            value /= 100.0;
        }
        if bit(digit2, 7) {
            value /= 1000.0;
        }
        if bit(digit3, 7) {
            value = -value;
        }

        let mut unit = Unit::new();
        // Prefix bits, in wire evaluation order. frame[3] bit 7 doubles as
        // the Digit2 decimal marker, so a /1000 reading always carries "u".
        if bit(raw[6], 7) {
            unit.push_prefix(UnitPrefix::Nano);
        }
        if bit(raw[3], 7) {
            unit.push_prefix(UnitPrefix::Micro);
        }
        if bit(raw[7], 7) {
            unit.push_prefix(UnitPrefix::Milli);
        }
        if bit(raw[7], 1) {
            unit.push_prefix(UnitPrefix::Kilo);
        }
        if bit(raw[7], 5) {
            unit.push_prefix(UnitPrefix::Mega);
        }

        // Base unit tests form an override chain; the last matching bit wins.
        if bit(raw[6], 6) {
            unit.set_base(BaseUnit::Ohm);
        }
        if bit(raw[7], 6) {
            unit.set_base(BaseUnit::Percent);
        }
        if bit(raw[7], 2) {
            unit.set_base(BaseUnit::Farad);
        }
        if bit(raw[8], 7) {
            unit.set_base(BaseUnit::Fahrenheit);
        }
        if bit(raw[8], 6) {
            unit.set_base(BaseUnit::Celsius);
        }
        if bit(raw[8], 3) {
            unit.set_base(BaseUnit::Ampere);
        }
        if bit(raw[8], 2) {
            unit.set_base(BaseUnit::Volt);
        }
        if bit(raw[8], 1) {
            unit.set_base(BaseUnit::Hertz);
        }

        Ok(Reading { value, unit, flags })
    }
}

impl RawFrame {
    /// Decodes this frame into a reading. See [`Reading::from_frame`].
    pub fn decode(&self) -> Result<Reading, FrameDecodeError> {
        Reading::from_frame(self)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, self.unit)
        }
    }
}

/// Decodes a captured byte sequence into a reading.
///
/// The decode entry point for hosts that do their own framing; validates
/// length and sync word before field extraction.
pub fn decode(bytes: &[u8]) -> Result<Reading, FrameDecodeError> {
    let frame = RawFrame::from_bytes(bytes)?;
    Reading::from_frame(&frame)
}
