//! Sprite assets
//!
//! Inline SVG sources, loaded into image elements fire-and-forget. Until a
//! sprite has decoded, the renderer draws the procedural stand-in from
//! `scene::sprite_fallback` instead.

use crate::sim::ObstacleKind;

/// Every sprite the game blits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Coin,
    Spike,
    ElectricTrap,
    FallingBlock,
}

pub const ALL: [SpriteKind; 4] = [
    SpriteKind::Coin,
    SpriteKind::Spike,
    SpriteKind::ElectricTrap,
    SpriteKind::FallingBlock,
];

impl From<ObstacleKind> for SpriteKind {
    fn from(kind: ObstacleKind) -> Self {
        match kind {
            ObstacleKind::Spike => SpriteKind::Spike,
            ObstacleKind::ElectricTrap => SpriteKind::ElectricTrap,
            ObstacleKind::FallingBlock => SpriteKind::FallingBlock,
        }
    }
}

impl SpriteKind {
    pub fn svg_source(self) -> &'static str {
        match self {
            SpriteKind::Coin => {
                r##"<svg width="40" height="40" viewBox="0 0 40 40" xmlns="http://www.w3.org/2000/svg">
  <circle cx="20" cy="20" r="15" fill="#f8fafc" />
  <circle cx="12" cy="15" r="8" fill="#f8fafc" />
  <circle cx="28" cy="15" r="8" fill="#f8fafc" />
  <circle cx="20" cy="15" r="6" fill="#f8fafc" />
  <circle cx="20" cy="20" r="10" fill="#eab308" />
  <text x="20" y="24" font-size="12" text-anchor="middle" fill="#fef9c3">$</text>
</svg>"##
            }
            SpriteKind::Spike => {
                r##"<svg width="50" height="40" viewBox="0 0 50 40" xmlns="http://www.w3.org/2000/svg">
  <polygon points="0,40 25,0 50,40" fill="#ef4444" />
</svg>"##
            }
            SpriteKind::ElectricTrap => {
                r##"<svg width="50" height="60" viewBox="0 0 50 60" xmlns="http://www.w3.org/2000/svg">
  <rect width="50" height="60" fill="#111827" />
  <path d="M10,10 L40,10 L25,30 L40,30 L10,50 L25,30 L10,30 Z" fill="#facc15" stroke="#fef3c7" stroke-width="2" />
</svg>"##
            }
            SpriteKind::FallingBlock => {
                r##"<svg width="50" height="60" viewBox="0 0 50 60" xmlns="http://www.w3.org/2000/svg">
  <rect width="50" height="60" fill="#64748b" rx="4" />
  <rect x="5" y="5" width="40" height="50" fill="#475569" rx="2" />
  <circle cx="25" cy="30" r="5" fill="#f8fafc" />
</svg>"##
            }
        }
    }
}

/// Encode a sprite as a data URL for an `<img>` src
#[cfg(target_arch = "wasm32")]
pub fn data_url(kind: SpriteKind) -> String {
    format!(
        "data:image/svg+xml;utf8,{}",
        String::from(js_sys::encode_uri_component(kind.svg_source()))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_sprite_has_a_source() {
        for kind in ALL {
            let svg = kind.svg_source();
            assert!(svg.starts_with("<svg"));
            assert!(svg.ends_with("</svg>"));
        }
    }

    #[test]
    fn test_obstacle_kinds_map_one_to_one() {
        assert_eq!(SpriteKind::from(ObstacleKind::Spike), SpriteKind::Spike);
        assert_eq!(
            SpriteKind::from(ObstacleKind::ElectricTrap),
            SpriteKind::ElectricTrap
        );
        assert_eq!(
            SpriteKind::from(ObstacleKind::FallingBlock),
            SpriteKind::FallingBlock
        );
    }
}
