// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;

/// Abstraction for the byte source the meter is attached to.
///
/// The meter only ever talks, so there is no write half.
pub trait Pt4390Serial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(Some(byte))` if a byte was read, `Ok(None)` once the
    /// source is permanently closed, or `Err(nb::Error::WouldBlock)` if no
    /// byte is available yet. Other errors are returned as
    /// `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<Option<u8>, Self::Error>;
}

/// Monotonic instant used for read deadlines.
///
/// Blanket-implemented for anything comparable that advances by `Duration`.
pub trait Pt4390Instant: Copy + Ord + Add<Duration, Output = Self> {}

impl<T> Pt4390Instant for T where T: Copy + Ord + Add<Duration, Output = T> {}

/// Timer/delay operations the blocking receiver needs.
pub trait Pt4390Timer {
    /// Monotonic clock type.
    type Instant: Pt4390Instant;

    /// The current instant.
    fn now(&self) -> Self::Instant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1_000));
    }
}

/// Abstraction for asynchronous byte sources (requires the 'async' feature).
#[cfg(feature = "async")]
#[allow(async_fn_in_trait)]
pub trait Pt4390SerialAsync {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Reads a single byte, suspending until one arrives.
    ///
    /// Resolves to `Ok(None)` once the source is permanently closed.
    /// Dropping the future is how callers cancel a pending read.
    async fn read_byte(&mut self) -> Result<Option<u8>, Self::Error>;
}

// --- embedded-io adapters ---

/// Wraps a blocking [`embedded_io::Read`] plus a clock as a receiver
/// interface.
///
/// A blocking reader never reports `WouldBlock`; a zero-length read maps to
/// end-of-stream. The clock half only matters if the reader enforces its own
/// read timeout by returning short of a byte.
#[cfg(feature = "impl-io")]
#[derive(Debug)]
pub struct IoByteSource<R, C> {
    reader: R,
    clock: C,
}

#[cfg(feature = "impl-io")]
impl<R, C> IoByteSource<R, C> {
    pub fn new(reader: R, clock: C) -> Self {
        IoByteSource { reader, clock }
    }

    /// Gives the parts back to the caller.
    pub fn release(self) -> (R, C) {
        (self.reader, self.clock)
    }
}

#[cfg(feature = "impl-io")]
impl<R: embedded_io::Read, C> Pt4390Serial for IoByteSource<R, C> {
    type Error = R::Error;

    fn read_byte(&mut self) -> nb::Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.reader.read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }
}

#[cfg(feature = "impl-io")]
impl<R, C: Pt4390Timer> Pt4390Timer for IoByteSource<R, C> {
    type Instant = C::Instant;

    fn now(&self) -> Self::Instant {
        self.clock.now()
    }

    fn delay_us(&mut self, us: u32) {
        self.clock.delay_us(us);
    }
}

/// Wraps an [`embedded_io_async::Read`] as an async byte source.
#[cfg(feature = "impl-io-async")]
#[derive(Debug)]
pub struct AsyncIoByteSource<R>(pub R);

#[cfg(feature = "impl-io-async")]
impl<R: embedded_io_async::Read> Pt4390SerialAsync for AsyncIoByteSource<R> {
    type Error = R::Error;

    async fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.0.read(&mut buf).await? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}
