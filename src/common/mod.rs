// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod digit;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod reading;
pub mod timing;
pub mod unit;

// --- Re-export key types/traits/functions for easier access ---

// From digit.rs
pub use digit::segment_digit;

// From error.rs
pub use error::{FrameDecodeError, Pt4390Error};

// From frame.rs
pub use frame::{RawFrame, FRAME_LEN, PAYLOAD_LEN, SYNC_WORD};

// From hal_traits.rs
pub use hal_traits::{Pt4390Instant, Pt4390Serial, Pt4390Timer}; // Core sync traits

// From reading.rs
pub use reading::{decode, ModeFlags, Reading};

// From unit.rs
pub use unit::{BaseUnit, Unit, UnitPrefix};

// --- Feature-gated re-exports ---

// Async trait (from hal_traits.rs)
#[cfg(feature = "async")]
pub use hal_traits::Pt4390SerialAsync;

// embedded-io adapters (from hal_traits.rs)
#[cfg(feature = "impl-io")]
pub use hal_traits::IoByteSource;
#[cfg(feature = "impl-io-async")]
pub use hal_traits::AsyncIoByteSource;
