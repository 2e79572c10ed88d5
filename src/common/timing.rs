// src/common/timing.rs

use core::time::Duration;

// The meter streams frames continuously; there is no command/response
// exchange and therefore no protocol-level timing beyond the byte cadence.

/// The meter transmits at 4800 baud, 8 data bits, no parity, 1 stop bit.
pub const BAUD_RATE: u32 = 4800;

// === Byte Timing at 4800 Baud (8N1) ===
// 1 start bit + 8 data bits + 1 stop bit = 10 bits per byte
// Time per bit = 1 / 4800 s = 0.2083... ms
// Time per byte = 10 / 4800 s = 2.083... ms

/// Nominal duration of a single bit at 4800 baud.
pub const BIT_DURATION: Duration = Duration::from_nanos(208_333);

/// Nominal duration of a single byte (10 bits total) at 4800 baud.
pub const BYTE_DURATION: Duration = Duration::from_micros(2_083);

/// Nominal wire time of one full 10-byte frame.
pub const FRAME_DURATION: Duration = Duration::from_micros(20_833);

// === Receiver Defaults ===

/// Default per-byte read deadline for the blocking receiver. Generous
/// against the frame cadence, so a healthy meter never trips it.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Backoff between `WouldBlock` polls in the blocking receiver.
pub const POLL_INTERVAL: Duration = Duration::from_micros(100);
