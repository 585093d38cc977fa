//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard state (a shared table written by event callbacks)
//! - Attaching and detaching DOM key listeners

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod listeners;

pub use input::{Control, Key, KeyTable};
#[cfg(target_arch = "wasm32")]
pub use listeners::KeyListeners;
