//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One tick is
//! one reference frame (16 ms) of play: integrate the player, scroll the
//! background, spawn, advance and prune entities, resolve collisions,
//! score and level up.

use super::collision::{CollisionKind, boxes_overlap};
use super::state::{Coin, GameEvent, GamePhase, GameState, Obstacle};
use crate::consts::FRAME_MS;

/// Input commands for a single tick (deterministic)
///
/// All flags are one-shot: the shell sets them from events and clears them
/// after each consumed substep.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump impulse (key press / touch)
    pub jump: bool,
    /// Start command from the start screen
    pub start: bool,
    /// Restart command from the game-over (or start) screen
    pub restart: bool,
}

/// Advance the game state by one timestep of `dt_ms` milliseconds.
///
/// Rendering happens elsewhere and every frame; outside the Playing phase
/// this returns after handling the start/restart commands.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    // Restart rebuilds the session and lands on the start screen,
    // never straight into play.
    if input.restart && matches!(state.phase, GamePhase::GameOver | GamePhase::Start) {
        state.reset();
        state.events.push(GameEvent::Reset);
        log::info!("session reset (seed {})", state.seed);
        return;
    }

    if input.start && state.phase == GamePhase::Start {
        state.phase = GamePhase::Playing;
        state.events.push(GameEvent::Started);
        log::info!("run started");
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let frames = dt_ms / FRAME_MS;
    let scale = state.tuning.level_scale(state.level);

    // Player
    if input.jump {
        state.player.jump(&state.tuning);
    }
    state.player.update(frames, &state.tuning);

    // Background
    state
        .background
        .update(frames, scale, &state.viewport, &mut state.rng);

    // Spawn coins
    state.coin_timer_ms += dt_ms;
    let coin_interval = state
        .tuning
        .spawn_interval_ms(state.tuning.coin_spawn_ms, state.level);
    if state.coin_timer_ms > coin_interval {
        state.coin_timer_ms = 0.0;
        let id = state.next_entity_id();
        let coin = Coin::new(id, &state.viewport, &mut state.rng);
        state.coins.push(coin);
    }

    // Spawn obstacles
    state.obstacle_timer_ms += dt_ms;
    let obstacle_interval = state
        .tuning
        .spawn_interval_ms(state.tuning.obstacle_spawn_ms, state.level);
    if state.obstacle_timer_ms > obstacle_interval {
        state.obstacle_timer_ms = 0.0;
        let id = state.next_entity_id();
        let obstacle = Obstacle::new(id, &state.viewport, &mut state.rng);
        state.obstacles.push(obstacle);
    }

    let player_box = state.player.aabb();

    // Advance coins; drop the ones that scrolled out or got collected.
    // Single retain pass, so removal can't skip a neighbor.
    let mut collected = 0u32;
    state.coins.retain_mut(|coin| {
        coin.advance(frames, scale, &state.tuning);
        if coin.off_screen() {
            return false;
        }
        if boxes_overlap(&player_box, &coin.aabb(), CollisionKind::Coin) {
            collected += 1;
            return false;
        }
        true
    });

    for _ in 0..collected {
        state.score += 1;
        state.events.push(GameEvent::CoinCollected { score: state.score });
        // Explicit threshold crossing, not modulo: robust if a coin is
        // ever worth more than one point.
        if state.score >= state.level * state.tuning.level_up_score {
            state.level += 1;
            state.events.push(GameEvent::LevelUp { level: state.level });
            log::info!("level up -> {} (score {})", state.level, state.score);
        }
    }

    // Advance obstacles; any overlap with the player ends the run.
    let mut fatal_hit = false;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.advance(frames, scale, &state.tuning);
        if obstacle.off_screen() {
            return false;
        }
        if boxes_overlap(&player_box, &obstacle.aabb(), CollisionKind::Obstacle) {
            fatal_hit = true;
        }
        true
    });

    if fatal_hit {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        log::info!("game over at score {} level {}", state.score, state.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{ObstacleKind, Viewport};
    use crate::tuning::Tuning;
    use glam::Vec2;

    const DT: f32 = FRAME_MS;

    fn new_state() -> GameState {
        GameState::new(12345, Viewport::new(1280.0, 720.0), Tuning::default())
    }

    fn start_playing(state: &mut GameState) {
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    /// A coin parked on the player, opaque and mid-screen
    fn coin_on_player(state: &mut GameState) -> u32 {
        let id = state.next_entity_id();
        let mut coin = Coin::new(id, &state.viewport, &mut state.rng);
        coin.pos = state.player.pos + Vec2::new(5.0, 5.0);
        state.coins.push(coin);
        id
    }

    #[test]
    fn test_start_transition() {
        let mut state = new_state();
        assert_eq!(state.phase, GamePhase::Start);

        // Default input does nothing
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);

        start_playing(&mut state);
        assert_eq!(state.events, vec![GameEvent::Started]);

        // A second start command is a no-op
        state.events.clear();
        let input = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert!(!state.events.contains(&GameEvent::Started));
    }

    #[test]
    fn test_update_skipped_outside_playing() {
        let mut state = new_state();
        for _ in 0..100 {
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.time_ticks, 0);
        assert!(state.coins.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.coin_timer_ms, 0.0);
    }

    #[test]
    fn test_coin_collection_scores_once() {
        let mut state = new_state();
        start_playing(&mut state);
        state.events.clear();

        coin_on_player(&mut state);
        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.score, 1);
        assert!(state.coins.is_empty());
        assert_eq!(state.events, vec![GameEvent::CoinCollected { score: 1 }]);
    }

    #[test]
    fn test_twenty_coins_reach_level_two() {
        let mut state = new_state();
        start_playing(&mut state);
        state.events.clear();

        for _ in 0..20 {
            coin_on_player(&mut state);
            tick(&mut state, &TickInput::default(), DT);
        }

        assert_eq!(state.score, 20);
        assert_eq!(state.level, 2);
        // Exactly one level-up, fired at the crossing
        let level_ups: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .collect();
        assert_eq!(level_ups, vec![&GameEvent::LevelUp { level: 2 }]);
    }

    #[test]
    fn test_level_up_fires_at_each_multiple() {
        let mut state = new_state();
        start_playing(&mut state);

        for _ in 0..60 {
            coin_on_player(&mut state);
            tick(&mut state, &TickInput::default(), DT);
        }
        assert_eq!(state.score, 60);
        assert_eq!(state.level, 4);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = new_state();
        start_playing(&mut state);
        state.score = 7;
        state.events.clear();

        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, &state.viewport, &mut state.rng);
        obstacle.kind = ObstacleKind::ElectricTrap;
        obstacle.size = Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        obstacle.pos = state.player.pos;
        state.obstacles.push(obstacle);

        tick(&mut state, &TickInput::default(), DT);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.events,
            vec![GameEvent::GameOver { score: 7, level: 1 }]
        );
        // The colliding obstacle stays for the final frame
        assert_eq!(state.obstacles.len(), 1);

        // Frozen after game over
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.score, 7);
    }

    #[test]
    fn test_near_miss_survives_obstacle_margin() {
        let mut state = new_state();
        start_playing(&mut state);

        // Overlapping the player by less than the combined obstacle inset
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, &state.viewport, &mut state.rng);
        obstacle.kind = ObstacleKind::ElectricTrap;
        obstacle.size = Vec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT);
        let player = state.player.aabb();
        obstacle.pos = Vec2::new(
            player.pos.x + PLAYER_WIDTH - 25.0 + state.tuning.obstacle_speed,
            player.pos.y,
        );
        state.obstacles.push(obstacle);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_prune_exactly_past_left_edge() {
        let mut state = new_state();
        start_playing(&mut state);

        // Right edge still on screen after one step: stays
        let id = state.next_entity_id();
        let mut staying = Coin::new(id, &state.viewport, &mut state.rng);
        staying.pos = Vec2::new(-20.0, 300.0);
        state.coins.push(staying);

        // Right edge crosses zero after one step: pruned
        let id = state.next_entity_id();
        let mut leaving = Coin::new(id, &state.viewport, &mut state.rng);
        leaving.pos = Vec2::new(-(COIN_SIZE - 4.0), 300.0);
        state.coins.push(leaving);

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.coins.len(), 1);
        assert!(state.coins[0].pos.x + COIN_SIZE >= 0.0);
    }

    #[test]
    fn test_no_offscreen_entities_after_any_tick() {
        let mut state = new_state();
        start_playing(&mut state);

        for i in 0..3000 {
            let input = TickInput {
                jump: i % 40 == 0,
                ..Default::default()
            };
            tick(&mut state, &input, DT);
            for coin in &state.coins {
                assert!(coin.pos.x + COIN_SIZE >= 0.0);
            }
            for obstacle in &state.obstacles {
                assert!(obstacle.pos.x + obstacle.size.x >= 0.0);
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn test_spawn_timer_crossing_spawns_one() {
        let mut state = new_state();
        start_playing(&mut state);

        // Just under the cadence: nothing yet
        let before = (state.tuning.coin_spawn_ms / DT) as u32;
        for _ in 0..before {
            tick(&mut state, &TickInput::default(), DT);
        }
        let coins_before = state.coins.len();

        // Crossing tick
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.coins.len(), coins_before + 1);
        assert_eq!(state.coin_timer_ms, 0.0);
    }

    #[test]
    fn test_restart_after_game_over_lands_on_start() {
        let mut state = new_state();
        start_playing(&mut state);
        state.phase = GamePhase::GameOver;
        state.score = 31;
        state.level = 2;
        state.events.clear();

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);

        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.coins.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.events, vec![GameEvent::Reset]);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = new_state();
        start_playing(&mut state);
        state.score = 5;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 5);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed and input script stay identical
        let mut state1 = new_state();
        let mut state2 = new_state();

        for i in 0..2000u32 {
            let input = TickInput {
                start: i == 0,
                jump: i % 37 == 0,
                ..Default::default()
            };
            tick(&mut state1, &input, DT);
            tick(&mut state2, &input, DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.level, state2.level);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.coins.len(), state2.coins.len());
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        for (a, b) in state1.coins.iter().zip(&state2.coins) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
        }
    }
}
