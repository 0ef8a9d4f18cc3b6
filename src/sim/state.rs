//! Game state and core simulation types
//!
//! Entities carry their own small behaviors; the `tick` module owns the
//! frame-to-frame orchestration.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::background::Background;
use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen up, waiting for the start command
    Start,
    /// Active gameplay
    Playing,
    /// Run ended on an obstacle
    GameOver,
}

/// Things that happened during a tick, for the shell to surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Start command accepted
    Started,
    /// A coin was collected; carries the new score
    CoinCollected { score: u32 },
    /// Score crossed a level threshold; carries the new level
    LevelUp { level: u32 },
    /// Player hit an obstacle; score/level captured at the collision
    GameOver { score: u32, level: u32 },
    /// Session was reset back to the start screen
    Reset,
}

/// Canvas dimensions in pixel space (y-down, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The ground line entities stand on
    pub fn ground_y(&self) -> f32 {
        self.height * GROUND_FRAC
    }
}

/// Visual pose of the player (no physical behavior change)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPose {
    Running,
    Jumping,
}

/// The player robot
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (px/frame, positive is down)
    pub vel_y: f32,
    pub pose: PlayerPose,
    /// 0 = grounded, 1 = airborne with a double-jump charge, 2 = charge spent
    pub jumps_used: u8,
    /// Ground line captured at construction
    ground_y: f32,
}

impl Player {
    pub fn new(viewport: &Viewport) -> Self {
        let ground_y = viewport.ground_y();
        Self {
            pos: Vec2::new(PLAYER_X, ground_y - PLAYER_HEIGHT),
            vel_y: 0.0,
            pose: PlayerPose::Running,
            jumps_used: 0,
            ground_y,
        }
    }

    pub fn grounded(&self) -> bool {
        self.jumps_used == 0 && self.pos.y + PLAYER_HEIGHT >= self.ground_y
    }

    /// Apply a jump impulse. Grounded grants one double-jump charge;
    /// airborne spends it; anything further is a no-op.
    pub fn jump(&mut self, tuning: &Tuning) {
        match self.jumps_used {
            0 => {
                self.vel_y = tuning.jump_force;
                self.jumps_used = 1;
                self.pose = PlayerPose::Jumping;
            }
            1 => {
                self.vel_y = tuning.jump_force;
                self.jumps_used = 2;
            }
            _ => {}
        }
    }

    /// Integrate gravity and clamp to the ground line. Landing restores
    /// the running pose and the double-jump charge.
    pub fn update(&mut self, frames: f32, tuning: &Tuning) {
        self.vel_y += tuning.gravity * frames;
        self.pos.y += self.vel_y * frames;

        if self.pos.y + PLAYER_HEIGHT >= self.ground_y {
            self.pos.y = self.ground_y - PLAYER_HEIGHT;
            self.vel_y = 0.0;
            self.jumps_used = 0;
            self.pose = PlayerPose::Running;
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// A cloud coin scrolling in from the right
#[derive(Debug, Clone)]
pub struct Coin {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Fade-in, 0 to 1
    pub opacity: f32,
}

impl Coin {
    /// Spawn at the right edge, vertically inside the coin band
    /// (never hugging the ground or the sky).
    pub fn new(id: u32, viewport: &Viewport, rng: &mut Pcg32) -> Self {
        let min_y = viewport.height * COIN_BAND_MIN_FRAC;
        let max_y = viewport.height * COIN_BAND_MAX_FRAC;
        Self {
            id,
            pos: Vec2::new(viewport.width, rng.random_range(min_y..max_y)),
            opacity: 0.0,
        }
    }

    /// Scroll left and ramp opacity
    pub fn advance(&mut self, frames: f32, level_scale: f32, tuning: &Tuning) {
        self.pos.x -= tuning.coin_speed * level_scale * frames;
        self.opacity = (self.opacity + FADE_IN_STEP * frames).min(1.0);
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x + COIN_SIZE < 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(COIN_SIZE))
    }
}

/// Obstacle flavors, chosen uniformly at spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Squat, ground-anchored
    Spike,
    /// Full height, ground-anchored
    ElectricTrap,
    /// Starts mid-screen and drifts down
    FallingBlock,
}

/// A hazard scrolling in from the right
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fade-in, 0 to 1
    pub opacity: f32,
}

impl Obstacle {
    pub fn new(id: u32, viewport: &Viewport, rng: &mut Pcg32) -> Self {
        let kind = match rng.random_range(0u32..3) {
            0 => ObstacleKind::Spike,
            1 => ObstacleKind::ElectricTrap,
            _ => ObstacleKind::FallingBlock,
        };

        let size = match kind {
            ObstacleKind::Spike => Vec2::new(OBSTACLE_WIDTH, SPIKE_HEIGHT),
            _ => Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),
        };

        let y = match kind {
            ObstacleKind::FallingBlock => viewport.height * FALLING_START_FRAC,
            _ => viewport.ground_y() - size.y,
        };

        Self {
            id,
            kind,
            pos: Vec2::new(viewport.width, y),
            size,
            opacity: 0.0,
        }
    }

    /// Scroll left, ramp opacity, and for falling blocks drift down
    pub fn advance(&mut self, frames: f32, level_scale: f32, tuning: &Tuning) {
        self.pos.x -= tuning.obstacle_speed * level_scale * frames;
        if self.kind == ObstacleKind::FallingBlock {
            self.pos.y += FALLING_DRIFT * frames;
        }
        self.opacity = (self.opacity + FADE_IN_STEP * frames).min(1.0);
    }

    pub fn off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete session state (deterministic for a given seed + input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub viewport: Viewport,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    pub level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Spawn accumulators (ms of elapsed play time)
    pub coin_timer_ms: f32,
    pub obstacle_timer_ms: f32,
    pub player: Player,
    pub background: Background,
    /// Live coins, in spawn order
    pub coins: Vec<Coin>,
    /// Live obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Events produced by ticks and not yet drained by the shell
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session on the start screen
    pub fn new(seed: u64, viewport: Viewport, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::new(&viewport);
        let background = Background::new(&viewport, &mut rng);
        Self {
            seed,
            viewport,
            tuning,
            phase: GamePhase::Start,
            score: 0,
            level: 1,
            time_ticks: 0,
            coin_timer_ms: 0.0,
            obstacle_timer_ms: 0.0,
            player,
            background,
            coins: Vec::new(),
            obstacles: Vec::new(),
            events: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to a fresh start screen. The RNG stream continues, so a seed
    /// determines a whole session including restarts.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Start;
        self.score = 0;
        self.level = 1;
        self.time_ticks = 0;
        self.coin_timer_ms = 0.0;
        self.obstacle_timer_ms = 0.0;
        self.coins.clear();
        self.obstacles.clear();
        self.player = Player::new(&self.viewport);
        self.background = Background::new(&self.viewport, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_viewport() -> Viewport {
        Viewport::new(1280.0, 720.0)
    }

    #[test]
    fn test_player_starts_grounded() {
        let player = Player::new(&test_viewport());
        assert!(player.grounded());
        assert_eq!(player.pose, PlayerPose::Running);
        assert_eq!(player.pos.y, 720.0 * 0.8 - PLAYER_HEIGHT);
    }

    #[test]
    fn test_jump_and_double_jump_then_noop() {
        let tuning = Tuning::default();
        let mut player = Player::new(&test_viewport());

        player.jump(&tuning);
        assert_eq!(player.vel_y, tuning.jump_force);
        assert_eq!(player.pose, PlayerPose::Jumping);

        // Rise a little, then double jump
        player.update(1.0, &tuning);
        let height_before = player.pos.y;
        player.jump(&tuning);
        assert_eq!(player.vel_y, tuning.jump_force);
        assert_eq!(player.jumps_used, 2);

        // Third press does nothing
        player.update(1.0, &tuning);
        let vel_before = player.vel_y;
        player.jump(&tuning);
        assert_eq!(player.vel_y, vel_before);
        assert!(player.pos.y < height_before + 1.0);
    }

    #[test]
    fn test_landing_restores_charge() {
        let tuning = Tuning::default();
        let mut player = Player::new(&test_viewport());

        player.jump(&tuning);
        // Integrate until gravity brings the player back down
        for _ in 0..200 {
            player.update(1.0, &tuning);
        }
        assert!(player.grounded());
        assert_eq!(player.pose, PlayerPose::Running);

        // Full jump cycle available again
        player.jump(&tuning);
        assert_eq!(player.jumps_used, 1);
    }

    #[test]
    fn test_ground_clamp_never_overshoots() {
        let tuning = Tuning::default();
        let mut player = Player::new(&test_viewport());
        let ground = test_viewport().ground_y();

        player.jump(&tuning);
        for _ in 0..500 {
            player.update(1.0, &tuning);
            assert!(player.pos.y + PLAYER_HEIGHT <= ground + 1e-3);
        }
    }

    #[test]
    fn test_coin_spawns_in_band() {
        let viewport = test_viewport();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..100 {
            let coin = Coin::new(id, &viewport, &mut rng);
            assert_eq!(coin.pos.x, viewport.width);
            assert!(coin.pos.y >= viewport.height * COIN_BAND_MIN_FRAC);
            assert!(coin.pos.y < viewport.height * COIN_BAND_MAX_FRAC);
            assert_eq!(coin.opacity, 0.0);
        }
    }

    #[test]
    fn test_coin_fade_in_clamps() {
        let viewport = test_viewport();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut coin = Coin::new(1, &viewport, &mut rng);
        for _ in 0..40 {
            coin.advance(1.0, 1.0, &tuning);
        }
        assert_eq!(coin.opacity, 1.0);
    }

    #[test]
    fn test_obstacle_kind_positions() {
        let viewport = test_viewport();
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; 3];
        for id in 0..50 {
            let o = Obstacle::new(id, &viewport, &mut rng);
            match o.kind {
                ObstacleKind::Spike => {
                    seen[0] = true;
                    assert_eq!(o.size.y, SPIKE_HEIGHT);
                    assert_eq!(o.pos.y, viewport.ground_y() - SPIKE_HEIGHT);
                }
                ObstacleKind::ElectricTrap => {
                    seen[1] = true;
                    assert_eq!(o.size.y, OBSTACLE_HEIGHT);
                    assert_eq!(o.pos.y, viewport.ground_y() - OBSTACLE_HEIGHT);
                }
                ObstacleKind::FallingBlock => {
                    seen[2] = true;
                    assert_eq!(o.pos.y, viewport.height * FALLING_START_FRAC);
                }
            }
        }
        assert!(seen.iter().all(|&s| s), "all three kinds should appear");
    }

    #[test]
    fn test_falling_block_drifts_down() {
        let viewport = test_viewport();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut id = 0;
        let mut block = loop {
            let o = Obstacle::new(id, &viewport, &mut rng);
            if o.kind == ObstacleKind::FallingBlock {
                break o;
            }
            id += 1;
        };
        let y0 = block.pos.y;
        block.advance(1.0, 1.0, &tuning);
        assert!((block.pos.y - y0 - FALLING_DRIFT).abs() < 1e-6);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut state = GameState::new(42, test_viewport(), Tuning::default());
        state.phase = GamePhase::GameOver;
        state.score = 37;
        state.level = 2;
        state.coins.push(Coin::new(1, &test_viewport(), &mut Pcg32::seed_from_u64(1)));

        state.reset();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.coins.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.coin_timer_ms, 0.0);
        assert!(state.player.grounded());
    }
}
