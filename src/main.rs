//! Owl Dash entry point
//!
//! On the web this wires the canvas, keyboard, buttons and HUD to a
//! [`Session`](owl_dash::Session) and drives it from requestAnimationFrame.
//! Native builds run a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent,
    };

    use owl_dash::consts::*;
    use owl_dash::platform::{LocalStore, now_ms};
    use owl_dash::renderer::{self, Quad};
    use owl_dash::sim::GamePhase;
    use owl_dash::{QualityPreset, Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStore>,
        ctx: CanvasRenderingContext2d,
        /// A frame callback is scheduled
        looping: bool,
        /// Leaderboard list filled for the finished run
        board_shown: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d) -> Self {
            Self {
                session: Session::new(LocalStore, Tuning::default()),
                ctx,
                looping: false,
                board_shown: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn update(&mut self, time: f64) {
            self.session.frame(now_ms());

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 && time > oldest {
                self.fps = (60_000.0 / (time - oldest)).round() as u32;
            }
        }

        /// Keep scheduling while the run is live or particles are still fading
        fn wants_frames(&self) -> bool {
            self.session.is_running() || !self.session.state.particles.is_empty()
        }

        fn render(&self) {
            let state = &self.session.state;
            let settings = &self.session.settings;

            self.ctx.clear_rect(0.0, 0.0, SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64);
            for quad in renderer::build_frame(state, settings) {
                self.draw_quad(&quad);
            }

            if let Some(overlay) = renderer::banner_text(state, settings) {
                self.ctx.set_global_alpha(overlay.alpha as f64);
                self.ctx.set_fill_style_str("#FFD700");
                self.ctx.set_font("bold 32px monospace");
                self.ctx.set_text_align("center");
                let _ = self.ctx.fill_text(&overlay.text, overlay.x as f64, overlay.y as f64);
                self.ctx.set_global_alpha(1.0);
            }
        }

        fn draw_quad(&self, quad: &Quad) {
            let [x, y] = quad.position;
            let [w, h] = quad.size;
            self.ctx.set_fill_style_str(&quad.css_color());
            self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = document() else {
                return;
            };
            let hud = self.session.hud();

            set_text(&document, "score", &hud.score.to_string());
            set_text(&document, "lives", &hud.lives.to_string());
            set_text(&document, "level", &hud.level.to_string());
            if self.session.settings.show_fps {
                set_text(&document, "fps", &self.fps.to_string());
            }
            let pace = match self.session.pace_rank() {
                Some(rank) if self.session.is_running() => format!("#{rank}"),
                _ => String::new(),
            };
            set_text(&document, "rank", &pace);

            if self.session.phase() == GamePhase::GameOver {
                if let Some(summary) = &self.session.summary {
                    set_text(&document, "finalScore", &summary.score.to_string());
                    let note = if summary.new_record { "New record!" } else { "" };
                    set_text(&document, "recordNote", note);
                }
                set_hidden(&document, "gameOver", false);
                if !self.board_shown {
                    self.show_leaderboard(&document);
                    self.board_shown = true;
                }
            } else {
                set_hidden(&document, "gameOver", true);
                self.board_shown = false;
            }
        }

        /// Fill `#leaderboard` with one list item per entry
        fn show_leaderboard(&self, document: &Document) {
            let Some(list) = document.get_element_by_id("leaderboard") else {
                return;
            };
            list.set_text_content(None);
            for row in self.session.leaderboard(now_ms()) {
                let Ok(item) = document.create_element("li") else {
                    continue;
                };
                item.set_text_content(Some(&format!(
                    "{}. {} - {} (level {}, {})",
                    row.rank, row.name, row.score, row.level, row.when
                )));
                let _ = list.append_child(&item);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    fn name_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("playerName")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    /// Typed name, falling back to the one saved in settings
    fn player_name(document: &Document, fallback: &str) -> String {
        name_input(document)
            .map(|input| input.value())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }

    fn quality_select(document: &Document) -> Option<HtmlSelectElement> {
        document
            .get_element_by_id("quality")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
    }

    /// Keys typed into the name field belong to the field, not the owl
    fn typing_name(document: &Document) -> bool {
        document
            .active_element()
            .is_some_and(|el| el.id() == "playerName")
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Owl Dash starting...");

        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        let game = Rc::new(RefCell::new(Game::new(ctx)));

        if let Some(input) = name_input(&document) {
            input.set_value(&game.borrow().session.settings.player_name);
        }

        setup_input_handlers(&document, game.clone())?;
        setup_start_buttons(&document, game.clone());
        setup_quality_select(&document, game.clone());

        // Draw the idle scene once
        {
            let mut g = game.borrow_mut();
            g.render();
            g.update_hud();
        }

        log::info!("Owl Dash ready");
        Ok(())
    }

    fn setup_input_handlers(doc: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                }
                if document().is_some_and(|d| typing_name(&d)) {
                    return;
                }
                game.borrow_mut().session.key_down(&event.code());
            });
            doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                }
                if document().is_some_and(|d| typing_name(&d)) {
                    return;
                }
                game.borrow_mut().session.key_up(&event.code());
            });
            doc.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_start_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["startButton", "restartButton"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id}");
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_run(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_quality_select(doc: &Document, game: Rc<RefCell<Game>>) {
        let Some(select) = quality_select(doc) else {
            return;
        };
        select.set_value(game.borrow().session.settings.quality.as_str());

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(value) = document().and_then(|d| quality_select(&d)).map(|s| s.value()) else {
                return;
            };
            match QualityPreset::parse(&value) {
                Some(preset) => game.borrow_mut().session.set_quality(preset),
                None => log::warn!("Unknown quality preset {value:?}"),
            }
        });
        let _ = select.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_run(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };
        let seed = js_sys::Date::now() as u64;
        let schedule = {
            let mut g = game.borrow_mut();
            let name = player_name(&document, &g.session.settings.player_name);
            g.session.start(&name, seed);
            g.update_hud();
            !std::mem::replace(&mut g.looping, true)
        };
        if let Some(input) = document.active_element() {
            if let Ok(input) = input.dyn_into::<web_sys::HtmlElement>() {
                let _ = input.blur();
            }
        }
        if schedule {
            request_animation_frame(game);
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
            g.looping = g.wants_frames();
            g.looping
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use owl_dash::platform::{MemoryStore, keys, now_ms};
    use owl_dash::sim::autopilot;
    use owl_dash::{Session, Tuning};

    /// Ten minutes of play at 60 fps
    const MAX_FRAMES: u32 = 36_000;

    env_logger::init();
    log::info!("Owl Dash (native) starting autopilot demo...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e}");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(MemoryStore::new(), tuning);
    session.start("Autopilot", seed);

    let mut frames = 0;
    while session.is_running() && frames < MAX_FRAMES {
        let input = autopilot(&session.state);
        for (held, code) in [
            (input.jump, keys::JUMP),
            (input.left, keys::LEFT),
            (input.right, keys::RIGHT),
            (input.modifier, keys::MODIFIER_LEFT),
        ] {
            if held {
                session.key_down(code);
            } else {
                session.key_up(code);
            }
        }
        session.frame(now_ms());
        frames += 1;
    }

    let hud = session.hud();
    match &session.summary {
        Some(summary) => log::info!(
            "Autopilot (seed {seed}) crashed after {frames} frames: score {}, level {}",
            summary.score,
            summary.level
        ),
        None => log::info!(
            "Autopilot (seed {seed}) survived {frames} frames: score {}, level {}, lives {}",
            hud.score,
            hud.level,
            hud.lives
        ),
    }
}
