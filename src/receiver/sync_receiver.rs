// src/receiver/sync_receiver.rs

use crate::common::{
    error::Pt4390Error,
    frame::{RawFrame, PAYLOAD_LEN, SYNC_WORD},
    hal_traits::{Pt4390Serial, Pt4390Timer},
    reading::Reading,
    timing,
};
use core::time::Duration;

/// Pulls frames out of a byte stream, blocking the caller until one arrives.
#[derive(Debug)]
pub struct FrameReceiver<IF>
where
    IF: Pt4390Serial + Pt4390Timer,
{
    interface: IF,
    read_timeout: Duration,
}

impl<IF> FrameReceiver<IF>
where
    IF: Pt4390Serial + Pt4390Timer,
{
    /// Creates a receiver with the default per-byte read timeout.
    pub fn new(interface: IF) -> Self {
        Self::with_timeout(interface, timing::DEFAULT_READ_TIMEOUT)
    }

    /// Creates a receiver with a caller-chosen per-byte read timeout.
    pub fn with_timeout(interface: IF, read_timeout: Duration) -> Self {
        FrameReceiver { interface, read_timeout }
    }

    /// Gives the interface back to the caller.
    pub fn release(self) -> IF {
        self.interface
    }

    /// Blocks until the next complete frame has been captured.
    ///
    /// Hunts for the sync word with a two-byte sliding window, then reads
    /// the 8 payload bytes. A sync word appearing inside payload bytes is
    /// indistinguishable from a real frame boundary and is accepted as one;
    /// this ambiguity is inherent to the wire format.
    pub fn next_frame(&mut self) -> Result<RawFrame, Pt4390Error<IF::Error>> {
        let mut window = [0u8; 2];
        loop {
            let byte = self.next_byte()?;
            window[0] = window[1];
            window[1] = byte;
            if window == SYNC_WORD {
                break;
            }
        }

        let mut payload = [0u8; PAYLOAD_LEN];
        for slot in payload.iter_mut() {
            *slot = self.next_byte()?;
        }
        Ok(RawFrame::from_payload(payload))
    }

    /// Captures and decodes the next frame in one step.
    ///
    /// A decode failure is returned like any other error; the caller is free
    /// to call again and resynchronize on the following frame.
    pub fn next_reading(&mut self) -> Result<Reading, Pt4390Error<IF::Error>> {
        let frame = self.next_frame()?;
        Ok(Reading::from_frame(&frame)?)
    }

    /// Polls the interface for one byte until it arrives, the source closes,
    /// or the read deadline passes.
    fn next_byte(&mut self) -> Result<u8, Pt4390Error<IF::Error>> {
        let deadline = self.interface.now() + self.read_timeout;
        loop {
            match self.interface.read_byte() {
                Ok(Some(byte)) => return Ok(byte),
                Ok(None) => return Err(Pt4390Error::StreamClosed),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(Pt4390Error::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL.as_micros() as u32);
                }
                Err(nb::Error::Other(e)) => return Err(Pt4390Error::Io(e)),
            }
        }
    }
}
