//! Robo Dash entry point
//!
//! Wasm builds wire the simulation to the page: canvas, HUD elements,
//! input listeners, and the animation-frame loop. Native builds run a
//! scripted headless session, useful for profiling and log inspection.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

    use robo_dash::consts::*;
    use robo_dash::platform::hud::Hud;
    use robo_dash::platform::input::Bindings;
    use robo_dash::renderer::CanvasRenderer;
    use robo_dash::renderer::scene;
    use robo_dash::sim::{GamePhase, GameState, TickInput, Viewport, tick};
    use robo_dash::tuning::Tuning;

    /// Game instance holding all state
    struct Shell {
        state: GameState,
        renderer: CanvasRenderer,
        hud: Hud,
        canvas: HtmlCanvasElement,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        bindings: Bindings,
        raf_id: i32,
        alive: bool,
    }

    impl Shell {
        /// Run fixed simulation steps for the elapsed wall time, then
        /// push whatever happened to the HUD
        fn advance(&mut self, dt_ms: f32) {
            self.accumulator += dt_ms;

            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, FRAME_MS);
                self.accumulator -= FRAME_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump = false;
                self.input.start = false;
                self.input.restart = false;
            }

            for event in self.state.events.drain(..) {
                self.hud.apply(&event);
            }
        }

        /// Render the current frame
        fn render(&self) {
            let cmds = scene::build(&self.state);
            self.renderer.render(&cmds);
        }

        /// Match the canvas and viewport to the window
        fn resize(&mut self, window: &Window) {
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(f64::from(self.canvas.width()));
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(f64::from(self.canvas.height()));
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.state.viewport = Viewport::new(width as f32, height as f32);
        }
    }

    thread_local! {
        static SHELL: RefCell<Option<Rc<RefCell<Shell>>>> = const { RefCell::new(None) };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Robo Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the canvas to the window before anything spawns against it
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let renderer = CanvasRenderer::new(&canvas)?;
        let hud = Hud::new(&document);
        let tuning = read_tuning(&document);

        let seed = js_sys::Date::now() as u64;
        let shell = Rc::new(RefCell::new(Shell {
            state: GameState::new(
                seed,
                Viewport::new(width as f32, height as f32),
                tuning,
            ),
            renderer,
            hud,
            canvas,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: 0.0,
            bindings: Bindings::new(),
            raf_id: 0,
            alive: true,
        }));

        setup_bindings(&shell, &window, &document)?;

        SHELL.with(|cell| *cell.borrow_mut() = Some(shell.clone()));
        schedule_frame(&shell);

        log::info!("Robo Dash running (seed {seed})");
        Ok(())
    }

    /// Read the optional tuning override block from the host page
    fn read_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("tuning override loaded from page");
                tuning
            }
            Err(err) => {
                log::warn!("ignoring malformed tuning block: {err}");
                Tuning::default()
            }
        }
    }

    fn setup_bindings(
        shell: &Rc<RefCell<Shell>>,
        window: &Window,
        document: &Document,
    ) -> Result<(), JsValue> {
        let mut bindings = Bindings::new();

        // Keyboard jump, only while playing
        {
            let shell = shell.clone();
            bindings.listen(window, "keydown", move |event| {
                if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                    if key.code() == "Space" {
                        let mut s = shell.borrow_mut();
                        if s.state.phase == GamePhase::Playing {
                            s.input.jump = true;
                        }
                    }
                }
            })?;
        }

        // Touch jump
        {
            let shell = shell.clone();
            let canvas = shell.borrow().canvas.clone();
            bindings.listen(&canvas, "touchstart", move |_event| {
                let mut s = shell.borrow_mut();
                if s.state.phase == GamePhase::Playing {
                    s.input.jump = true;
                }
            })?;
        }

        // Start / restart buttons (optional, like the HUD elements)
        if let Some(button) = document.get_element_by_id("startButton") {
            let shell = shell.clone();
            bindings.listen(&button, "click", move |_event| {
                shell.borrow_mut().input.start = true;
            })?;
        }
        if let Some(button) = document.get_element_by_id("restartButton") {
            let shell = shell.clone();
            bindings.listen(&button, "click", move |_event| {
                shell.borrow_mut().input.restart = true;
            })?;
        }

        // Window resize
        {
            let shell = shell.clone();
            bindings.listen(window, "resize", move |_event| {
                if let Some(window) = web_sys::window() {
                    shell.borrow_mut().resize(&window);
                }
            })?;
        }

        shell.borrow_mut().bindings = bindings;
        Ok(())
    }

    fn schedule_frame(shell: &Rc<RefCell<Shell>>) {
        let clone = shell.clone();
        let closure = Closure::once(move |time: f64| frame(clone, time));
        let raf_id = web_sys::window()
            .and_then(|w| w.request_animation_frame(closure.as_ref().unchecked_ref()).ok());
        if let Some(raf_id) = raf_id {
            shell.borrow_mut().raf_id = raf_id;
        }
        closure.forget();
    }

    fn frame(shell: Rc<RefCell<Shell>>, time: f64) {
        {
            let mut s = shell.borrow_mut();
            if !s.alive {
                return;
            }

            let dt = if s.last_time > 0.0 {
                ((time - s.last_time) as f32).min(MAX_FRAME_DELTA_MS)
            } else {
                FRAME_MS
            };
            s.last_time = time;

            s.advance(dt);
            s.render();
        }

        schedule_frame(&shell);
    }

    /// Tear the session down: stop the frame loop and detach every listener
    pub fn shutdown() {
        SHELL.with(|cell| {
            let Some(shell) = cell.borrow_mut().take() else {
                return;
            };
            let mut s = shell.borrow_mut();
            s.alive = false;
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(s.raf_id);
            }
            s.bindings.clear();
            log::info!("session torn down");
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        log::error!("startup failed: {err:?}");
    }
}

/// JS-callable teardown, mirroring the host page's lifecycle
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn robo_dash_shutdown() {
    wasm_game::shutdown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Robo Dash (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(12345);
    headless_run(seed);
}

/// A minute of scripted play at the reference rate
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(seed: u64) {
    use robo_dash::consts::FRAME_MS;
    use robo_dash::renderer::scene;
    use robo_dash::sim::{GamePhase, GameState, TickInput, Viewport, tick};
    use robo_dash::tuning::Tuning;

    let mut state = GameState::new(seed, Viewport::new(1280.0, 720.0), Tuning::default());
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, FRAME_MS);

    for i in 0..3600u32 {
        let input = TickInput {
            jump: i % 40 == 0,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);
        for event in state.events.drain(..) {
            log::info!("{event:?}");
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let cmds = scene::build(&state);
    println!(
        "seed {seed}: score {} level {} after {} ticks ({} draw commands in the final frame)",
        state.score,
        state.level,
        state.time_ticks,
        cmds.len()
    );
}
