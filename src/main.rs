//! Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement};

    use runner_game::Game;
    use runner_game::audio::AudioManager;
    use runner_game::platform::{LocalStorage, action_for_code};
    use runner_game::sim::{GamePhase, Snapshot};
    use runner_game::tuning::Tuning;

    /// Game instance holding all state
    struct App {
        game: Game<LocalStorage>,
        audio: AudioManager,
        last_time: f64,
    }

    impl App {
        fn new(seed: u64) -> Self {
            let game = Game::new(LocalStorage, seed, Tuning::default());
            let mut audio = AudioManager::new();
            audio.set_volume(game.settings.effective_volume());
            Self {
                game,
                audio,
                last_time: 0.0,
            }
        }

        /// Persist records and play sounds for whatever just happened
        fn flush_events(&mut self) {
            let events = self.game.drain_events();
            self.audio.play_events(&events);
        }

        /// Run simulation up to `time`
        fn update(&mut self, time: f64) {
            if self.last_time <= 0.0 {
                self.last_time = time;
                return;
            }

            // Only whole milliseconds are consumed, the remainder carries over
            let elapsed = (time - self.last_time).max(0.0).floor();
            self.last_time += elapsed;

            self.game.advance(elapsed as u64);
            self.flush_events();
        }

        fn set_sound_enabled(&mut self, enabled: bool) {
            self.game.set_sound_enabled(enabled);
            self.audio.set_volume(self.game.settings.effective_volume());
        }

        fn set_sfx_volume(&mut self, vol: f32) {
            self.game.set_sfx_volume(vol);
            self.audio.set_volume(self.game.settings.effective_volume());
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

    fn show_if(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", !visible);
        }
    }

    /// Draw the current snapshot into the DOM
    fn render(snapshot: &Snapshot) {
        let Some(document) = document() else { return };

        if let Some(player) = document.get_element_by_id("player") {
            let tilt = if snapshot.is_jumping { -15 } else { 0 };
            let _ = player.set_attribute(
                "style",
                &format!(
                    "bottom: {}px; transform: rotate({}deg)",
                    snapshot.player_y, tilt
                ),
            );
        }

        if let Some(layer) = document.get_element_by_id("obstacles") {
            let html: String = snapshot
                .obstacles
                .iter()
                .map(|o| {
                    format!(
                        "<span class=\"obstacle {:?}\" style=\"left: {}px; bottom: {}px\">{}</span>",
                        o.kind,
                        o.x,
                        o.kind.base_y(),
                        o.kind.glyph()
                    )
                })
                .collect();
            layer.set_inner_html(&html);
        }

        show_if(&document, "boost-trail", snapshot.speed > 1.0);

        // Phase overlays
        show_if(&document, "menu-overlay", snapshot.phase == GamePhase::Menu);
        show_if(&document, "pause-overlay", snapshot.phase == GamePhase::Paused);
        show_if(&document, "gameover-overlay", snapshot.phase == GamePhase::GameOver);
        show_if(&document, "hud-score", snapshot.phase == GamePhase::Playing);
        show_if(&document, "controls", snapshot.phase == GamePhase::Playing);
        show_if(
            &document,
            "new-record",
            snapshot.phase == GamePhase::GameOver && snapshot.is_new_record(),
        );

        // Score badges
        let score = snapshot.score.to_string();
        set_text(&document, "hud-score-value", &score);
        set_text(&document, "final-score", &score);
        set_text(&document, "stat-score", &score);
        set_text(&document, "stat-record", &snapshot.high_score.to_string());
        set_text(&document, "stat-speed", &format!("{:.1}x", snapshot.speed));
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Runner starting...");

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        if let Some(document) = document() {
            if let Some(loading) = document.get_element_by_id("loading") {
                let _ = loading.set_attribute("class", "hidden");
            }
            if let Some(toggle) = input_by_id(&document, "sound-toggle") {
                toggle.set_checked(app.borrow().game.settings.sound_enabled);
            }
            if let Some(slider) = input_by_id(&document, "sfx-volume") {
                let percent = (app.borrow().game.settings.sfx_volume * 100.0).round();
                slider.set_value(&percent.to_string());
            }
        }

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_sound_controls(app.clone());
        setup_auto_pause(app.clone());

        render(&app.borrow().game.snapshot());
        request_animation_frame(app);

        log::info!("Runner running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(action) = action_for_code(&event.code()) {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.game.handle_action(action);
                a.flush_events();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Wire a button to a game operation
    fn on_click(app: &Rc<RefCell<App>>, id: &str, f: fn(&mut App)) {
        let Some(document) = document() else { return };
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };

        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut a = app.borrow_mut();
            a.audio.resume();
            f(&mut a);
            a.flush_events();
            render(&a.game.snapshot());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        on_click(&app, "start-btn", |a| {
            a.game.start();
        });
        on_click(&app, "restart-btn", |a| {
            a.game.start();
        });
        on_click(&app, "menu-btn", |a| {
            a.game.to_menu();
        });
        on_click(&app, "stop-btn", |a| {
            a.game.to_menu();
        });
        on_click(&app, "pause-btn", |a| {
            a.game.toggle_pause();
        });
        on_click(&app, "resume-btn", |a| {
            a.game.toggle_pause();
        });
        on_click(&app, "jump-btn", |a| {
            a.game.jump();
        });
        on_click(&app, "boost-btn", |a| {
            a.game.boost();
        });
        on_click(&app, "reset-record-btn", |a| {
            a.game.reset_high_score();
        });
    }

    fn input_by_id(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
    }

    fn setup_sound_controls(app: Rc<RefCell<App>>) {
        let Some(document) = document() else { return };

        if let Some(toggle) = input_by_id(&document, "sound-toggle") {
            let app = app.clone();
            let input = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().set_sound_enabled(input.checked());
            });
            let _ =
                toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = input_by_id(&document, "sfx-volume") {
            let input = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(percent) = input.value().parse::<f32>() else { return };
                app.borrow_mut().set_sfx_volume(percent / 100.0);
            });
            let _ =
                slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.game.state.phase == GamePhase::Playing {
                        a.game.toggle_pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = app.borrow_mut();
                if a.game.state.phase == GamePhase::Playing {
                    a.game.toggle_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            render(&a.game.snapshot());
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5EED);
    let tuning = match args.next() {
        Some(path) => load_tuning(&path),
        None => runner_game::Tuning::default(),
    };

    let snapshot = autopilot::run(seed, tuning, 60_000);
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> runner_game::Tuning {
    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| runner_game::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::error!("{}: {} - using default tuning", path, e);
            runner_game::Tuning::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use runner_game::Game;
    use runner_game::audio::AudioManager;
    use runner_game::consts::{OBSTACLE_WIDTH, PLAYER_LEFT};
    use runner_game::platform::MemoryStore;
    use runner_game::sim::{GamePhase, ObstacleKind, Snapshot};
    use runner_game::tuning::Tuning;

    /// Host frame length (roughly 60 fps)
    const FRAME_MS: u64 = 16;

    /// How far ahead of the player the bot reacts (world units)
    const LOOKAHEAD: f32 = 40.0;

    /// Play one run with a naive bot, return the final snapshot
    pub fn run(seed: u64, tuning: Tuning, duration_ms: u64) -> Snapshot {
        let mut game = Game::new(MemoryStore::new(), seed, tuning);
        let audio = AudioManager::new();
        game.start();

        let mut elapsed = 0;
        while elapsed < duration_ms && game.state.phase == GamePhase::Playing {
            let snapshot = game.snapshot();
            let threat = snapshot.obstacles.iter().any(|o| {
                o.kind != ObstacleKind::Rock
                    && o.x + OBSTACLE_WIDTH > PLAYER_LEFT
                    && o.x < PLAYER_LEFT + LOOKAHEAD + snapshot.speed * 4.0
            });
            if threat {
                game.jump();
            } else if snapshot.speed < 2.0 {
                game.boost();
            }

            game.advance(FRAME_MS);
            audio.play_events(&game.drain_events());
            elapsed += FRAME_MS;
        }

        let last = game.snapshot();
        match last.phase {
            GamePhase::GameOver => log::info!("Autopilot crashed with score {}", last.score),
            _ => log::info!("Autopilot survived {} ms with score {}", elapsed, last.score),
        }

        game.to_menu();
        audio.play_events(&game.drain_events());
        last
    }
}
