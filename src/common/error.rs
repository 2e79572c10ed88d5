// src/common/error.rs

use core::fmt;

/// Top-level error for frame reception and streaming decode.
#[derive(Debug, thiserror::Error)]
pub enum Pt4390Error<E = ()>
where
    E: core::fmt::Debug, // Still need Debug for the generic Io error
{
    /// Underlying I/O error from the byte-source implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// No byte arrived within the per-byte read deadline.
    #[error("read timed out waiting for the next byte")]
    Timeout,

    /// The byte source closed before a full frame arrived.
    #[error("byte source closed before a full frame arrived")]
    StreamClosed,

    /// A complete frame arrived but failed to decode.
    #[error("frame decode failed: {0}")]
    Decode(#[from] FrameDecodeError),
}

// No manual Display impl needed - thiserror handles it.

/// Error produced while decoding a single frame.
///
/// Every variant is recoverable at the call site: the caller decides whether
/// to skip the frame and resynchronize or to abort the pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameDecodeError {
    /// Wrong length or bad sync bytes. `sync` holds the first two bytes
    /// observed, zero-padded when fewer were available.
    MalformedFrame { len: usize, sync: [u8; 2] },
    /// A digit's 7-bit segment code matches none of the ten valid patterns.
    /// `position` is the digit index, 0 (least significant) to 3.
    InvalidDigitPattern { pattern: u8, position: u8 },
}

impl fmt::Display for FrameDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameDecodeError::MalformedFrame { len, sync } => write!(
                f,
                "malformed frame: {} bytes, leading {:#04x} {:#04x}",
                len, sync[0], sync[1]
            ),
            FrameDecodeError::InvalidDigitPattern { pattern, position } => write!(
                f,
                "invalid digit pattern {:#04x} at digit position {}",
                pattern, position
            ),
        }
    }
}

// Implement the Error trait; core::error::Error is available in no_std and is
// required by thiserror's `#[from]` on Pt4390Error.
impl core::error::Error for FrameDecodeError {}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayString;
    use core::fmt::Write;

    #[test]
    fn test_decode_error_display_names_the_offending_byte() {
        let mut out = ArrayString::<64>::new();
        let err = FrameDecodeError::InvalidDigitPattern { pattern: 0x0e, position: 3 };
        write!(out, "{}", err).unwrap();
        assert_eq!(out.as_str(), "invalid digit pattern 0x0e at digit position 3");
    }

    #[test]
    fn test_malformed_display_reports_length_and_sync() {
        let mut out = ArrayString::<64>::new();
        let err = FrameDecodeError::MalformedFrame { len: 10, sync: [0xb5, 0xa5] };
        write!(out, "{}", err).unwrap();
        assert_eq!(out.as_str(), "malformed frame: 10 bytes, leading 0xb5 0xa5");
    }

    #[test]
    fn test_decode_error_converts_into_transport_error() {
        let err = FrameDecodeError::MalformedFrame { len: 0, sync: [0, 0] };
        let wrapped: Pt4390Error<()> = err.into();
        assert!(matches!(wrapped, Pt4390Error::Decode(e) if e == err));
    }
}
