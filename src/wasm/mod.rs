//! WebAssembly bindings.
//!
//! Exposes the Atari 2600 to JavaScript: ROM loading, stepping, register
//! inspection and the named memory regions used by browser viewers.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Atari2600Emulator;
