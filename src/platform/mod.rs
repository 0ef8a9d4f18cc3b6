//! Platform abstraction layer
//!
//! Browser glue, wasm-only: DOM event bindings that detach themselves on
//! drop, and a HUD writer where every element is an optional capability.
//! The simulation never sees any of this - it consumes `TickInput` and
//! produces `GameEvent`s.

#[cfg(target_arch = "wasm32")]
pub mod hud;
#[cfg(target_arch = "wasm32")]
pub mod input;
