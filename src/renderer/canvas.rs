//! Canvas 2D backend
//!
//! Replays draw commands onto the page canvas. Sprite images are created
//! once from data URLs and load fire-and-forget; each frame polls
//! `complete()` and falls back to the procedural shapes until then.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::scene::{self, Color, DrawCmd};
use super::sprites::{self, SpriteKind};

struct SpriteCache {
    images: Vec<(SpriteKind, HtmlImageElement)>,
}

impl SpriteCache {
    fn new() -> Result<Self, JsValue> {
        let mut images = Vec::with_capacity(sprites::ALL.len());
        for kind in sprites::ALL {
            let image = HtmlImageElement::new()?;
            image.set_src(&sprites::data_url(kind));
            images.push((kind, image));
        }
        Ok(Self { images })
    }

    fn get(&self, kind: SpriteKind) -> Option<&HtmlImageElement> {
        self.images
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, image)| image)
    }
}

/// Owns the 2D context and the sprite cache
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: SpriteCache,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            sprites: SpriteCache::new()?,
        })
    }

    /// Replay one frame's command list
    pub fn render(&self, cmds: &[DrawCmd]) {
        for cmd in cmds {
            self.draw(cmd);
        }
    }

    fn draw(&self, cmd: &DrawCmd) {
        match cmd {
            DrawCmd::Clear { width, height } => {
                self.ctx
                    .clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCmd::Rect { pos, size, color } => {
                self.ctx.set_fill_style_str(&css(color));
                self.ctx
                    .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => {
                self.ctx.set_fill_style_str(&css(color));
                self.ctx.begin_path();
                let _ = self
                    .ctx
                    .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                self.ctx.fill();
            }
            DrawCmd::Polygon { points, color } => {
                let Some(first) = points.first() else {
                    return;
                };
                self.ctx.set_fill_style_str(&css(color));
                self.ctx.begin_path();
                self.ctx.move_to(first.x as f64, first.y as f64);
                for point in &points[1..] {
                    self.ctx.line_to(point.x as f64, point.y as f64);
                }
                self.ctx.close_path();
                self.ctx.fill();
            }
            DrawCmd::VGradient {
                pos,
                size,
                top,
                bottom,
            } => {
                let gradient = self.ctx.create_linear_gradient(
                    pos.x as f64,
                    pos.y as f64,
                    pos.x as f64,
                    (pos.y + size.y) as f64,
                );
                let _ = gradient.add_color_stop(0.0, &css(top));
                let _ = gradient.add_color_stop(1.0, &css(bottom));
                self.ctx.set_fill_style_canvas_gradient(&gradient);
                self.ctx
                    .fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
            }
            DrawCmd::Sprite {
                kind,
                pos,
                size,
                opacity,
            } => {
                match self.sprites.get(*kind) {
                    Some(image) if image.complete() => {
                        self.ctx.set_global_alpha(*opacity as f64);
                        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            image,
                            pos.x as f64,
                            pos.y as f64,
                            size.x as f64,
                            size.y as f64,
                        );
                        self.ctx.set_global_alpha(1.0);
                    }
                    // Not decoded yet (or never will be): draw the vector stand-in
                    _ => {
                        for fallback in scene::sprite_fallback(*kind, *pos, *size, *opacity) {
                            self.draw(&fallback);
                        }
                    }
                }
            }
            DrawCmd::Text {
                text,
                pos,
                size_px,
                color,
            } => {
                self.ctx.set_fill_style_str(&css(color));
                self.ctx.set_font(&format!("{size_px}px Arial"));
                self.ctx.set_text_align("center");
                self.ctx.set_text_baseline("middle");
                let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}

fn css(color: &Color) -> String {
    format!(
        "rgba({}, {}, {}, {})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3],
    )
}
