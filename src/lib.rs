//! Robo Dash - a side-scrolling runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `renderer`: Draw-command scene builder + Canvas2D backend
//! - `platform`: Browser input/HUD glue
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame duration (ms). All per-frame rates are normalized
    /// against this, so one 16 ms step reproduces the 60 Hz behavior exactly.
    pub const FRAME_MS: f32 = 16.0;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Cap on wall-clock delta fed to the accumulator (ms)
    pub const MAX_FRAME_DELTA_MS: f32 = 100.0;

    /// Player box and fixed horizontal position
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    pub const PLAYER_X: f32 = 100.0;

    /// Ground line as a fraction of viewport height
    pub const GROUND_FRAC: f32 = 0.8;

    /// Coin box and spawn band (fractions of viewport height)
    pub const COIN_SIZE: f32 = 40.0;
    pub const COIN_BAND_MIN_FRAC: f32 = 0.2;
    pub const COIN_BAND_MAX_FRAC: f32 = 0.7;

    /// Obstacle boxes - spikes are squat, traps full height
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 60.0;
    pub const SPIKE_HEIGHT: f32 = 40.0;
    /// Falling blocks start mid-screen and drift down (px/frame)
    pub const FALLING_START_FRAC: f32 = 0.4;
    pub const FALLING_DRIFT: f32 = 2.0;

    /// Opacity ramp for newly spawned entities (per frame)
    pub const FADE_IN_STEP: f32 = 0.05;

    /// Hitbox insets - obstacles get the more forgiving box
    pub const COIN_MARGIN: f32 = 10.0;
    pub const OBSTACLE_MARGIN: f32 = 15.0;

    /// Decorative cloud drift in the zero-speed sky layer (px/frame)
    pub const CLOUD_DRIFT: f32 = 0.2;
}

/// Top-left + size to center point
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}
