// src/mock_serial.rs

//! Scripted serial interface used by the receiver tests.

use crate::common::hal_traits::{Pt4390Serial, Pt4390Timer};
use core::convert::Infallible;
use core::ops::Add;
use core::time::Duration;
use heapless::Deque;

/// One scripted event served to the receiver.
#[derive(Debug, Copy, Clone)]
pub enum ScriptStep {
    /// Serve one byte.
    Byte(u8),
    /// Report `WouldBlock` once.
    NotReady,
}

/// Microsecond tick of the mock clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(u64);

impl Add<Duration> for MockInstant {
    type Output = MockInstant;

    fn add(self, rhs: Duration) -> MockInstant {
        MockInstant(self.0 + rhs.as_micros() as u64)
    }
}

/// Deterministic stand-in for a serial port plus monotonic clock.
///
/// Bytes are served from a scripted queue. Once it runs dry the source
/// either reports closure or keeps yielding `WouldBlock`, depending on how
/// it was built. The clock only advances when the receiver sleeps, which
/// makes the timeout paths reproducible.
#[derive(Debug)]
pub struct MockInterface {
    script: Deque<ScriptStep, 128>,
    now_us: u64,
    close_when_empty: bool,
}

impl MockInterface {
    fn scripted(bytes: &[u8], close_when_empty: bool) -> Self {
        let mut script = Deque::new();
        for &byte in bytes {
            script.push_back(ScriptStep::Byte(byte)).unwrap();
        }
        MockInterface { script, now_us: 0, close_when_empty }
    }

    /// Serves `bytes`, then reports the source as closed.
    pub fn closed_after(bytes: &[u8]) -> Self {
        Self::scripted(bytes, true)
    }

    /// Serves `bytes`, then yields `WouldBlock` forever.
    pub fn starved_after(bytes: &[u8]) -> Self {
        Self::scripted(bytes, false)
    }

    /// Appends a step to the script.
    pub fn push(&mut self, step: ScriptStep) {
        self.script.push_back(step).unwrap();
    }
}

impl Pt4390Serial for MockInterface {
    type Error = Infallible;

    fn read_byte(&mut self) -> nb::Result<Option<u8>, Infallible> {
        match self.script.pop_front() {
            Some(ScriptStep::Byte(byte)) => Ok(Some(byte)),
            Some(ScriptStep::NotReady) => Err(nb::Error::WouldBlock),
            None if self.close_when_empty => Ok(None),
            None => Err(nb::Error::WouldBlock),
        }
    }
}

impl Pt4390Timer for MockInterface {
    type Instant = MockInstant;

    fn now(&self) -> MockInstant {
        MockInstant(self.now_us)
    }

    fn delay_us(&mut self, us: u32) {
        self.now_us += u64::from(us);
    }
}

#[cfg(feature = "async")]
impl crate::common::hal_traits::Pt4390SerialAsync for MockInterface {
    type Error = Infallible;

    // `NotReady` steps are skipped rather than yielding `Poll::Pending`; an
    // exhausted script always reads as a closed source here.
    async fn read_byte(&mut self) -> Result<Option<u8>, Infallible> {
        loop {
            match self.script.pop_front() {
                Some(ScriptStep::Byte(byte)) => return Ok(Some(byte)),
                Some(ScriptStep::NotReady) => continue,
                None => return Ok(None),
            }
        }
    }
}
