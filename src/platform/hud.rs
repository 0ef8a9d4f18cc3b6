//! DOM HUD bindings
//!
//! Score/level readouts and the start/game-over panels. Every element is
//! looked up once and treated as optional - a page without one of them
//! just loses that readout, nothing aborts.

use web_sys::{Document, Element};

use crate::sim::GameEvent;

/// Handles to the HUD elements the game writes to
pub struct Hud {
    score: Option<Element>,
    level: Option<Element>,
    game_over: Option<Element>,
    final_score: Option<Element>,
    final_level: Option<Element>,
    start_screen: Option<Element>,
}

impl Hud {
    pub fn new(document: &Document) -> Self {
        let find = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("HUD element #{id} missing; its updates become no-ops");
            }
            el
        };
        Self {
            score: find("score"),
            level: find("level"),
            game_over: find("gameOver"),
            final_score: find("finalScore"),
            final_level: find("finalLevel"),
            start_screen: find("startScreen"),
        }
    }

    /// Push one simulation event to the page
    pub fn apply(&self, event: &GameEvent) {
        match event {
            GameEvent::Started => {
                hide(&self.start_screen);
            }
            GameEvent::CoinCollected { score } => {
                set_number(&self.score, *score);
            }
            GameEvent::LevelUp { level } => {
                set_number(&self.level, *level);
            }
            GameEvent::GameOver { score, level } => {
                set_number(&self.final_score, *score);
                set_number(&self.final_level, *level);
                show(&self.game_over);
            }
            GameEvent::Reset => {
                set_number(&self.score, 0);
                set_number(&self.level, 1);
                hide(&self.game_over);
                show(&self.start_screen);
            }
        }
    }
}

fn set_number(element: &Option<Element>, value: u32) {
    if let Some(element) = element {
        element.set_text_content(Some(&value.to_string()));
    }
}

fn show(element: &Option<Element>) {
    if let Some(element) = element {
        let _ = element.class_list().remove_1("hidden");
    }
}

fn hide(element: &Option<Element>) {
    if let Some(element) = element {
        let _ = element.class_list().add_1("hidden");
    }
}
