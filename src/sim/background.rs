//! Parallax background
//!
//! Four layers scrolling at independent speeds: sky (static, with drifting
//! clouds), far buildings, near buildings, ground. Layers are plain data
//! records; drawing them is the renderer's job.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Viewport;
use crate::consts::CLOUD_DRIFT;

/// Layer indices into [`Background::layers`]
pub const SKY: usize = 0;
pub const FAR_BUILDINGS: usize = 1;
pub const NEAR_BUILDINGS: usize = 2;
pub const GROUND: usize = 3;

/// A decorative cloud in the sky layer
#[derive(Debug, Clone)]
pub struct Cloud {
    /// Center of the main puff
    pub pos: Vec2,
    pub size: f32,
}

/// A building silhouette, ground-anchored
#[derive(Debug, Clone)]
pub struct Building {
    /// Left edge within the layer strip (layer offset applies on top)
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// One parallax strip
#[derive(Debug, Clone)]
pub struct Layer {
    /// Horizontal scroll offset, drifting negative and wrapping to 0
    pub offset: f32,
    /// Scroll speed at level 1 (px/frame); 0 = static backdrop
    pub speed: f32,
    /// Strip width; scrolling layers are two viewports wide so they tile
    pub width: f32,
}

/// The full parallax stack
#[derive(Debug, Clone)]
pub struct Background {
    pub layers: [Layer; 4],
    pub clouds: Vec<Cloud>,
    pub far_buildings: Vec<Building>,
    pub near_buildings: Vec<Building>,
}

impl Background {
    pub fn new(viewport: &Viewport, rng: &mut Pcg32) -> Self {
        let w = viewport.width;
        let layers = [
            Layer { offset: 0.0, speed: 0.0, width: w },
            Layer { offset: 0.0, speed: 1.0, width: w * 2.0 },
            Layer { offset: 0.0, speed: 2.0, width: w * 2.0 },
            Layer { offset: 0.0, speed: 5.0, width: w * 2.0 },
        ];

        let clouds = (0..10)
            .map(|_| Cloud {
                pos: Vec2::new(
                    rng.random_range(0.0..viewport.width),
                    rng.random_range(0.0..viewport.height * 0.5),
                ),
                size: rng.random_range(20.0..50.0),
            })
            .collect();

        let far_buildings = building_row(viewport, 0.2, 0.5, 15, rng);
        let near_buildings = building_row(viewport, 0.3, 0.6, 10, rng);

        Self {
            layers,
            clouds,
            far_buildings,
            near_buildings,
        }
    }

    /// Scroll every layer and drift the clouds.
    ///
    /// Offsets wrap to 0 past half the strip width, which tiles seamlessly
    /// because the building rows span two viewports. Clouds that exit left
    /// re-enter at the right edge at a fresh height.
    pub fn update(
        &mut self,
        frames: f32,
        level_scale: f32,
        viewport: &Viewport,
        rng: &mut Pcg32,
    ) {
        for layer in &mut self.layers {
            layer.offset -= layer.speed * level_scale * frames;
            if layer.offset <= -layer.width / 2.0 {
                layer.offset = 0.0;
            }
        }

        for cloud in &mut self.clouds {
            cloud.pos.x -= CLOUD_DRIFT * frames;
            if cloud.pos.x + cloud.size < 0.0 {
                cloud.pos.x = viewport.width + cloud.size;
                cloud.pos.y = rng.random_range(0.0..viewport.height * 0.5);
            }
        }
    }
}

/// Lay out a row of buildings covering two viewport widths
fn building_row(
    viewport: &Viewport,
    min_height_frac: f32,
    max_height_frac: f32,
    count: u32,
    rng: &mut Pcg32,
) -> Vec<Building> {
    let slot_width = viewport.width / count as f32;
    (0..count * 2)
        .map(|i| Building {
            x: i as f32 * slot_width,
            width: slot_width * rng.random_range(0.7..1.0),
            height: viewport.height * rng.random_range(min_height_frac..max_height_frac),
        })
        .collect()
}
