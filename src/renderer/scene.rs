//! Scene builder
//!
//! Turns a `GameState` into draw commands in a fixed order: background,
//! coins, obstacles, player. Pure - the same state always produces the
//! same command list.

use glam::Vec2;

use super::sprites::SpriteKind;
use crate::box_center;
use crate::consts::COIN_SIZE;
use crate::sim::background::{Background, FAR_BUILDINGS, GROUND, NEAR_BUILDINGS};
use crate::sim::{GameState, Player, PlayerPose, Viewport};

/// RGBA, each channel 0..1
pub type Color = [f32; 4];

/// A renderer-agnostic drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear { width: f32, height: f32 },
    Rect { pos: Vec2, size: Vec2, color: Color },
    Circle { center: Vec2, radius: f32, color: Color },
    Polygon { points: Vec<Vec2>, color: Color },
    VGradient { pos: Vec2, size: Vec2, top: Color, bottom: Color },
    Sprite { kind: SpriteKind, pos: Vec2, size: Vec2, opacity: f32 },
    Text { text: String, pos: Vec2, size_px: f32, color: Color },
}

// Palette (hex as in the page stylesheet)
pub(crate) const SKY_TOP: u32 = 0x0ea5e9;
pub(crate) const SKY_BOTTOM: u32 = 0x38bdf8;
pub(crate) const FAR_BUILDING: u32 = 0x0f172a;
pub(crate) const NEAR_BUILDING: u32 = 0x1e293b;
pub(crate) const GROUND_FILL: u32 = 0x334155;
pub(crate) const GROUND_DETAIL: u32 = 0x475569;
pub(crate) const CLOUD_PUFF: u32 = 0xf8fafc;
pub(crate) const COIN_FACE: u32 = 0xeab308;
pub(crate) const COIN_TEXT: u32 = 0xfef9c3;
pub(crate) const SPIKE_RED: u32 = 0xef4444;
pub(crate) const TRAP_HOUSING: u32 = 0x111827;
pub(crate) const TRAP_BOLT: u32 = 0xfacc15;
pub(crate) const BLOCK_OUTER: u32 = 0x64748b;
pub(crate) const BLOCK_INNER: u32 = 0x475569;
pub(crate) const ROBOT_BODY: u32 = 0xcbd5e1;
pub(crate) const ROBOT_VISOR: u32 = 0x22d3ee;
pub(crate) const ROBOT_LEG: u32 = 0x475569;
pub(crate) const ROBOT_ANTENNA: u32 = 0xfacc15;
pub(crate) const THRUSTER_FLAME: u32 = 0xf97316;

/// Expand a 0xRRGGBB hex into a Color with the given alpha
pub(crate) fn rgb(hex: u32, alpha: f32) -> Color {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Build the full frame, back to front
pub fn build(state: &GameState) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(96);
    let viewport = &state.viewport;

    cmds.push(DrawCmd::Clear {
        width: viewport.width,
        height: viewport.height,
    });

    push_background(&mut cmds, &state.background, viewport);

    for coin in &state.coins {
        cmds.push(DrawCmd::Sprite {
            kind: SpriteKind::Coin,
            pos: coin.pos,
            size: Vec2::splat(COIN_SIZE),
            opacity: coin.opacity,
        });
    }

    for obstacle in &state.obstacles {
        cmds.push(DrawCmd::Sprite {
            kind: obstacle.kind.into(),
            pos: obstacle.pos,
            size: obstacle.size,
            opacity: obstacle.opacity,
        });
    }

    push_player(&mut cmds, &state.player, state.time_ticks);

    cmds
}

fn push_background(cmds: &mut Vec<DrawCmd>, background: &Background, viewport: &Viewport) {
    // Sky
    cmds.push(DrawCmd::VGradient {
        pos: Vec2::ZERO,
        size: Vec2::new(viewport.width, viewport.height),
        top: rgb(SKY_TOP, 1.0),
        bottom: rgb(SKY_BOTTOM, 1.0),
    });

    // Clouds: a main puff flanked by two smaller ones
    for cloud in &background.clouds {
        let puff = rgb(CLOUD_PUFF, 0.8);
        cmds.push(DrawCmd::Circle {
            center: cloud.pos,
            radius: cloud.size,
            color: puff,
        });
        cmds.push(DrawCmd::Circle {
            center: cloud.pos + Vec2::new(cloud.size * 0.6, -cloud.size * 0.3),
            radius: cloud.size * 0.7,
            color: puff,
        });
        cmds.push(DrawCmd::Circle {
            center: cloud.pos + Vec2::new(-cloud.size * 0.6, -cloud.size * 0.3),
            radius: cloud.size * 0.7,
            color: puff,
        });
    }

    // Building rows, shifted by their layer offset. The rows span two
    // viewport widths and the offset wraps at one, so the seam never shows.
    for (layer_idx, row, color) in [
        (FAR_BUILDINGS, &background.far_buildings, FAR_BUILDING),
        (NEAR_BUILDINGS, &background.near_buildings, NEAR_BUILDING),
    ] {
        let offset = background.layers[layer_idx].offset;
        for building in row {
            cmds.push(DrawCmd::Rect {
                pos: Vec2::new(building.x + offset, viewport.height - building.height),
                size: Vec2::new(building.width, building.height),
                color: rgb(color, 1.0),
            });
        }
    }

    // Ground strip with scrolled lane markings
    let ground_y = viewport.ground_y();
    cmds.push(DrawCmd::Rect {
        pos: Vec2::new(0.0, ground_y),
        size: Vec2::new(viewport.width, viewport.height - ground_y),
        color: rgb(GROUND_FILL, 1.0),
    });

    let shift = background.layers[GROUND].offset % 100.0;
    let mut x = shift;
    while x < viewport.width {
        cmds.push(DrawCmd::Rect {
            pos: Vec2::new(x, ground_y),
            size: Vec2::new(50.0, 2.0),
            color: rgb(GROUND_DETAIL, 1.0),
        });
        x += 100.0;
    }
}

/// The robot: chassis, visor, antenna, then pose-dependent legs.
/// Leg phase flips every few ticks while running; airborne shows the
/// thruster flame instead.
fn push_player(cmds: &mut Vec<DrawCmd>, player: &Player, time_ticks: u64) {
    let p = player.pos;

    cmds.push(DrawCmd::Rect {
        pos: p + Vec2::new(23.0, 4.0),
        size: Vec2::new(4.0, 10.0),
        color: rgb(ROBOT_BODY, 1.0),
    });
    cmds.push(DrawCmd::Circle {
        center: p + Vec2::new(25.0, 4.0),
        radius: 4.0,
        color: rgb(ROBOT_ANTENNA, 1.0),
    });
    cmds.push(DrawCmd::Rect {
        pos: p + Vec2::new(5.0, 14.0),
        size: Vec2::new(40.0, 30.0),
        color: rgb(ROBOT_BODY, 1.0),
    });
    cmds.push(DrawCmd::Rect {
        pos: p + Vec2::new(11.0, 20.0),
        size: Vec2::new(28.0, 10.0),
        color: rgb(ROBOT_VISOR, 1.0),
    });

    match player.pose {
        PlayerPose::Running => {
            let stride = if (time_ticks / 6) % 2 == 0 { 4.0 } else { 0.0 };
            cmds.push(DrawCmd::Rect {
                pos: p + Vec2::new(9.0, 44.0 + stride),
                size: Vec2::new(12.0, 16.0 - stride),
                color: rgb(ROBOT_LEG, 1.0),
            });
            cmds.push(DrawCmd::Rect {
                pos: p + Vec2::new(29.0, 48.0 - stride),
                size: Vec2::new(12.0, 12.0 + stride),
                color: rgb(ROBOT_LEG, 1.0),
            });
        }
        PlayerPose::Jumping => {
            cmds.push(DrawCmd::Rect {
                pos: p + Vec2::new(9.0, 46.0),
                size: Vec2::new(12.0, 10.0),
                color: rgb(ROBOT_LEG, 1.0),
            });
            cmds.push(DrawCmd::Rect {
                pos: p + Vec2::new(29.0, 46.0),
                size: Vec2::new(12.0, 10.0),
                color: rgb(ROBOT_LEG, 1.0),
            });
            cmds.push(DrawCmd::Polygon {
                points: vec![
                    p + Vec2::new(19.0, 58.0),
                    p + Vec2::new(31.0, 58.0),
                    p + Vec2::new(25.0, 72.0),
                ],
                color: rgb(THRUSTER_FLAME, 0.9),
            });
        }
    }
}

/// Procedural stand-in for a sprite that has not decoded yet.
///
/// Same vector shapes the SVG sources describe, with the entity opacity
/// baked into every color.
pub fn sprite_fallback(kind: SpriteKind, pos: Vec2, size: Vec2, opacity: f32) -> Vec<DrawCmd> {
    let center = box_center(pos, size);
    match kind {
        SpriteKind::Coin => vec![
            DrawCmd::Circle {
                center,
                radius: size.x / 2.5,
                color: rgb(CLOUD_PUFF, opacity),
            },
            DrawCmd::Circle {
                center: pos + Vec2::new(size.x / 3.0, size.y / 3.0),
                radius: size.x / 5.0,
                color: rgb(CLOUD_PUFF, opacity),
            },
            DrawCmd::Circle {
                center: pos + Vec2::new(size.x * 2.0 / 3.0, size.y / 3.0),
                radius: size.x / 5.0,
                color: rgb(CLOUD_PUFF, opacity),
            },
            DrawCmd::Circle {
                center,
                radius: size.x / 4.0,
                color: rgb(COIN_FACE, opacity),
            },
            DrawCmd::Text {
                text: "$".to_string(),
                pos: center,
                size_px: 12.0,
                color: rgb(COIN_TEXT, opacity),
            },
        ],
        SpriteKind::Spike => vec![DrawCmd::Polygon {
            points: vec![
                pos + Vec2::new(0.0, size.y),
                pos + Vec2::new(size.x / 2.0, 0.0),
                pos + size,
            ],
            color: rgb(SPIKE_RED, opacity),
        }],
        SpriteKind::ElectricTrap => vec![
            DrawCmd::Rect {
                pos,
                size,
                color: rgb(TRAP_HOUSING, opacity),
            },
            DrawCmd::Polygon {
                points: vec![
                    pos + Vec2::new(10.0, 10.0),
                    pos + Vec2::new(40.0, 10.0),
                    pos + Vec2::new(25.0, 30.0),
                    pos + Vec2::new(40.0, 30.0),
                    pos + Vec2::new(10.0, 50.0),
                    pos + Vec2::new(25.0, 30.0),
                    pos + Vec2::new(10.0, 30.0),
                ],
                color: rgb(TRAP_BOLT, opacity),
            },
        ],
        SpriteKind::FallingBlock => vec![
            DrawCmd::Rect {
                pos,
                size,
                color: rgb(BLOCK_OUTER, opacity),
            },
            DrawCmd::Rect {
                pos: pos + Vec2::splat(5.0),
                size: size - Vec2::splat(10.0),
                color: rgb(BLOCK_INNER, opacity),
            },
            DrawCmd::Circle {
                center,
                radius: 5.0,
                color: rgb(CLOUD_PUFF, opacity),
            },
        ],
    }
}
