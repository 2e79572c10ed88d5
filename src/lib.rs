// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(feature = "std")]
extern crate std;

pub mod common;
pub mod meter;
pub mod receiver;

#[cfg(test)]
pub(crate) mod mock_serial;

// Re-export key types for convenience
pub use common::{decode, FrameDecodeError, Pt4390Error, RawFrame, Reading};
pub use receiver::FrameReceiver;
