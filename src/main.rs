//! AK407 Shooter entry point
//!
//! On the web this wires the canvas, DOM and input events to the simulation.
//! Natively it plays a headless autopilot session and prints the summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use ak407_shooter::Tuning;
    use ak407_shooter::renderer::{CanvasRenderer, frame_needed};
    use ak407_shooter::sim::{
        Command, GameState, SessionPhase, advance_frame, apply_command, command_for_key,
        poll_reload, pointer_moved, pointer_pressed, pointer_released, reload_progress,
    };

    /// How often the HUD refreshes between frames (ms)
    const HUD_INTERVAL_MS: i32 = 120;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        document: Document,
        /// A frame callback is scheduled
        frame_pending: bool,
    }

    impl Game {
        /// Fit the canvas to the window and sync the backing store to the DPR
        fn fit(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let inner_w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(840.0);
            let inner_h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(680.0);
            let max_w = (inner_w - 40.0).min(1100.0).max(1.0);
            let max_h = (inner_h - 180.0).min(720.0).max(1.0);

            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", max_w));
            let _ = style.set_property("height", &format!("{}px", max_h));

            let rect = self.canvas.get_bounding_client_rect();
            let dpr = window.device_pixel_ratio().max(1.0);
            let (w, h) = (rect.width(), rect.height());
            self.canvas.set_width((w * dpr).round() as u32);
            self.canvas.set_height((h * dpr).round() as u32);
            if let Err(e) = self.renderer.set_pixel_ratio(dpr) {
                log::warn!("setTransform failed: {:?}", e);
            }
            self.state.set_canvas_size(w as f32, h as f32);
            log::debug!("Canvas {}x{} @{}x", w, h, dpr);
        }

        /// Pointer position relative to the canvas
        fn canvas_point(&self, event: &PointerEvent) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            )
        }

        /// Render the current frame
        fn render(&self) {
            if let Err(e) = self.renderer.render(&self.state) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Update HUD elements, buttons and the overlay
        fn update_hud(&self) {
            let s = &self.state;
            self.set_text("score", &s.score().to_string());
            self.set_text("hits", &s.hits().to_string());
            self.set_text("misses", &s.misses().to_string());
            self.set_text("ammo", &s.ammo().to_string());
            self.set_text("mag", &s.mag_size().to_string());
            let reload_label = match reload_progress(s, now()) {
                Some(p) => format!("Reloading {}%", (p * 100.0).round() as u32),
                None => "Reload (R)".to_string(),
            };
            self.set_text("reloadBtn", &reload_label);
            self.set_text(
                "pauseBtn",
                if s.phase() == SessionPhase::Paused { "Resume (P)" } else { "Pause (P)" },
            );

            match s.phase() {
                SessionPhase::Running => self.set_overlay(None),
                SessionPhase::Idle => self.set_overlay(Some((
                    "AK407 Shooter",
                    "Aim with mouse/touch and click or press Space to shoot. Reload with R. Pause with P.".to_string(),
                    "Start Game",
                ))),
                SessionPhase::Paused => self.set_overlay(Some((
                    "Paused",
                    "Press P to resume.".to_string(),
                    "Resume",
                ))),
                SessionPhase::Ended => self.set_overlay(Some((
                    "Game Over",
                    format!(
                        "Score: {} - Hits {}, Misses {}. Click restart to play again.",
                        s.score(),
                        s.hits(),
                        s.misses()
                    ),
                    "Restart",
                ))),
            }
        }

        fn set_overlay(&self, content: Option<(&str, String, &str)>) {
            let Some(overlay) = self.document.get_element_by_id("overlay") else {
                return;
            };
            match content {
                None => {
                    let _ = overlay.class_list().add_1("hidden");
                }
                Some((title, desc, button)) => {
                    let _ = overlay.class_list().remove_1("hidden");
                    self.set_text("overlay-title", title);
                    self.set_text("overlay-desc", &desc);
                    self.set_text("startBtn", button);
                }
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                if el.text_content().as_deref() != Some(text) {
                    el.set_text_content(Some(text));
                }
            }
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Optional `<script id="tuning" type="application/json">` overrides
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::error!("Invalid tuning JSON, using defaults: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("AK407 Shooter starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, tuning),
            renderer: CanvasRenderer::new(ctx),
            canvas: canvas.clone(),
            document,
            frame_pending: false,
        }));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            g.fit();
            g.render();
            g.update_hud();
        }

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(game.clone())?;
        setup_resize(game.clone())?;
        setup_hud_timer(game)?;

        log::info!("AK407 Shooter ready");
        Ok(())
    }

    /// Apply a command, redraw if the frame changed, refresh the DOM and re-arm the loop
    fn dispatch(game: &Rc<RefCell<Game>>, cmd: Command) {
        {
            let mut g = game.borrow_mut();
            let before = g.state.phase();
            apply_command(&mut g.state, cmd, now());
            if frame_needed(before, &g.state) {
                g.render();
            }
            g.update_hud();
        }
        request_animation_frame(game.clone());
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Pointer move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.canvas_point(&event);
                pointer_moved(&mut g.state, x, y);
            });
            canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer down (shoot)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.canvas_point(&event);
                if let Some(outcome) = pointer_pressed(&mut g.state, x, y, now()) {
                    log::trace!("Shot: {:?}", outcome);
                    g.update_hud();
                }
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                pointer_released(&mut game.borrow_mut().state);
            });
            window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let pointer = game.borrow().state.pointer.pos;
                let Some(cmd) = command_for_key(&event.key(), pointer) else {
                    return;
                };
                if matches!(cmd, Command::Fire { .. }) {
                    event.prevent_default();
                }
                dispatch(&game, cmd);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = game.borrow().document.clone();

        let bind = |id: &str, pick: fn(SessionPhase) -> Option<Command>| -> Result<(), JsValue> {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                return Ok(());
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let phase = game.borrow().state.phase();
                if let Some(cmd) = pick(phase) {
                    dispatch(&game, cmd);
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
            Ok(())
        };

        bind("reloadBtn", |_| Some(Command::Reload))?;
        bind("pauseBtn", |_| Some(Command::TogglePause))?;
        bind("restartBtn", |_| Some(Command::Start))?;
        // Start when idle or over, resume when paused
        bind("startBtn", |phase| match phase {
            SessionPhase::Idle | SessionPhase::Ended => Some(Command::Start),
            SessionPhase::Paused => Some(Command::TogglePause),
            SessionPhase::Running => None,
        })?;
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.fit();
            g.render();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Keeps the HUD current between frames, e.g. a reload finishing while paused
    fn setup_hud_timer(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = game.borrow_mut();
            poll_reload(&mut g.state, now());
            g.update_hud();
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            HUD_INTERVAL_MS,
        )?;
        closure.forget();
        Ok(())
    }

    /// Schedule the next frame unless one is pending or the game is not running
    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if g.frame_pending || !g.state.is_live() {
                return;
            }
            g.frame_pending = true;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_pending = false;
            // Paused or over: stop scheduling entirely
            if !advance_frame(&mut g.state, time) {
                return;
            }
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ak407_shooter::Tuning;
    use ak407_shooter::consts::FRAME_MS;
    use ak407_shooter::sim::{GameState, SessionPhase, advance_frame};

    env_logger::init();
    log::info!("AK407 Shooter (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(407);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::error!("Invalid tuning in {}: {}", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    const SESSION_MS: f64 = 60_000.0;

    let mut state = GameState::new(seed, tuning);
    state.autopilot = true;
    state.start(0.0);

    let mut now = 0.0;
    while now < SESSION_MS && state.phase() == SessionPhase::Running {
        now += FRAME_MS;
        advance_frame(&mut state, now);
    }

    let summary = state.end();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Cannot serialize summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
