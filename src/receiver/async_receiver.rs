// src/receiver/async_receiver.rs

use crate::common::{
    error::Pt4390Error,
    frame::{RawFrame, PAYLOAD_LEN, SYNC_WORD},
    hal_traits::Pt4390SerialAsync,
    reading::Reading,
};

/// Async twin of [`FrameReceiver`](super::FrameReceiver).
///
/// There is no deadline here: the byte source owns timeout and cancellation
/// policy, and closing it resolves a pending read as end-of-stream.
#[derive(Debug)]
pub struct AsyncFrameReceiver<IF>
where
    IF: Pt4390SerialAsync,
{
    interface: IF,
}

impl<IF> AsyncFrameReceiver<IF>
where
    IF: Pt4390SerialAsync,
{
    pub fn new(interface: IF) -> Self {
        AsyncFrameReceiver { interface }
    }

    /// Gives the interface back to the caller.
    pub fn release(self) -> IF {
        self.interface
    }

    /// Suspends until the next complete frame has been captured.
    ///
    /// Same sliding-window hunt as the blocking receiver, including the
    /// inherent acceptance of a sync word that happens to sit inside payload
    /// bytes.
    pub async fn next_frame(&mut self) -> Result<RawFrame, Pt4390Error<IF::Error>> {
        let mut window = [0u8; 2];
        loop {
            let byte = self.next_byte().await?;
            window[0] = window[1];
            window[1] = byte;
            if window == SYNC_WORD {
                break;
            }
        }

        let mut payload = [0u8; PAYLOAD_LEN];
        for slot in payload.iter_mut() {
            *slot = self.next_byte().await?;
        }
        Ok(RawFrame::from_payload(payload))
    }

    /// Captures and decodes the next frame in one step.
    pub async fn next_reading(&mut self) -> Result<Reading, Pt4390Error<IF::Error>> {
        let frame = self.next_frame().await?;
        Ok(Reading::from_frame(&frame)?)
    }

    async fn next_byte(&mut self) -> Result<u8, Pt4390Error<IF::Error>> {
        match self.interface.read_byte().await {
            Ok(Some(byte)) => Ok(byte),
            Ok(None) => Err(Pt4390Error::StreamClosed),
            Err(e) => Err(Pt4390Error::Io(e)),
        }
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_serial::MockInterface;
    use core::future::Future;
    use core::pin::pin;
    use core::task::{Context, Poll, Waker};

    // The mock resolves every read immediately, so a noop waker is enough to
    // drive these futures to completion.
    fn block_on<F: Future>(fut: F) -> F::Output {
        let mut fut = pin!(fut);
        let mut cx = Context::from_waker(Waker::noop());
        loop {
            if let Poll::Ready(out) = fut.as_mut().poll(&mut cx) {
                return out;
            }
        }
    }

    const PAYLOAD: [u8; 8] = [0x00, 0x55, 0x1b, 0x2f, 0x07, 0x00, 0x00, 0x00];

    #[test]
    fn test_captures_and_decodes_frame() {
        let mut bytes = heapless::Vec::<u8, 16>::new();
        bytes.extend_from_slice(&[0x07, 0xa5, 0xa5]).unwrap();
        bytes.extend_from_slice(&PAYLOAD).unwrap();
        let mut receiver = AsyncFrameReceiver::new(MockInterface::closed_after(&bytes));
        let reading = block_on(receiver.next_reading()).unwrap();
        assert_eq!(reading.value, 1234.0);
    }

    #[test]
    fn test_closed_source_reports_end_of_stream() {
        let mut receiver =
            AsyncFrameReceiver::new(MockInterface::closed_after(&[0xa5, 0xa5, 0x01]));
        assert!(matches!(
            block_on(receiver.next_frame()),
            Err(Pt4390Error::StreamClosed)
        ));
    }
}
