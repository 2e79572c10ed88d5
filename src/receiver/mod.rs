// src/receiver/mod.rs

//! Host-side frame reception: sync-word hunting and payload assembly.
//!
//! The receiver is the pipeline's only suspension point; decoding itself is
//! synchronous. No state is kept between frames, so every call starts a
//! fresh hunt for the sync word.

mod sync_receiver;

pub use sync_receiver::FrameReceiver;

#[cfg(feature = "async")]
mod async_receiver;

#[cfg(feature = "async")]
pub use async_receiver::AsyncFrameReceiver;
