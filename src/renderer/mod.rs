//! Rendering module
//!
//! The scene builder turns a `GameState` into an ordered list of draw
//! commands; the Canvas2D backend (wasm only) replays them. Keeping the
//! command list as plain data makes a frame inspectable and testable
//! without a browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use scene::{Color, DrawCmd};
pub use sprites::SpriteKind;
