//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod background;
pub mod collision;
pub mod state;
pub mod tick;

pub use background::{Background, Building, Cloud, Layer};
pub use collision::{Aabb, CollisionKind, boxes_overlap};
pub use state::{
    Coin, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player, PlayerPose, Viewport,
};
pub use tick::{TickInput, tick};
