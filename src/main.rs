//! Last Seconds entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build drives the game off `requestAnimationFrame`; the native build runs
//! headless autopilot rounds and prints the resulting ranking.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use last_seconds::audio::AudioManager;
    use last_seconds::consts::*;
    use last_seconds::leaderboard::format_rank_row;
    use last_seconds::platform::dom::with_class;
    use last_seconds::platform::{FixedStep, InputState};
    use last_seconds::renderer::{RenderState, build_frame};
    use last_seconds::sim::{GameEvent, GamePhase, GameState, tick};
    use last_seconds::{Leaderboard, LeaderboardRecord, LocalLeaderboard, PlayerProfile, Settings};

    /// Game instance holding all state
    struct Game {
        /// None while the name menu is showing
        state: Option<GameState>,
        profile: Option<PlayerProfile>,
        render_state: Option<RenderState>,
        input: InputState,
        settings: Settings,
        audio: AudioManager,
        leaderboard: Box<dyn Leaderboard>,
        stepper: FixedStep,
        /// Timestamp of the current animation frame (ms)
        now_ms: f64,
        /// Rank of the last finished run, if it made the board
        last_rank: Option<usize>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, leaderboard: Box<dyn Leaderboard>) -> Self {
            Self {
                state: None,
                profile: PlayerProfile::load(),
                render_state: None,
                input: InputState::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
                audio: AudioManager::new(&settings),
                settings,
                leaderboard,
                stepper: FixedStep::new(),
                now_ms: 0.0,
                last_rank: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Begin a new run for `profile`
        fn start(&mut self, profile: PlayerProfile, seed: u64) {
            profile.save();
            self.profile = Some(profile);
            self.state = Some(GameState::new(seed, self.now_ms));
            self.input.release_all();
            self.input.sample();
            self.stepper.reset();
            self.last_rank = None;
            self.audio.resume();
            log::info!("Run started with seed: {}", seed);
        }

        fn phase(&self) -> Option<GamePhase> {
            self.state.as_ref().map(|s| s.phase())
        }

        /// Run the simulation ticks due at frame time `time`
        fn update(&mut self, time: f64) {
            self.now_ms = time;
            let steps = self.stepper.advance(time);

            // Every tick of a frame reads the frame timestamp
            let mut events = Vec::new();
            for _ in 0..steps {
                let input = self.input.sample();
                if let Some(state) = self.state.as_mut() {
                    tick(state, &input, time);
                    events.extend(state.drain_events());
                }
            }

            for event in &events {
                self.audio.play_event(event);
                if let GameEvent::GameOver { time_secs } = event {
                    self.submit_run(*time_secs);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn submit_run(&mut self, time_secs: f64) {
            let Some(profile) = &self.profile else {
                log::warn!("Run finished without a player name, not recorded");
                return;
            };
            self.last_rank = self
                .leaderboard
                .submit(LeaderboardRecord::new(profile.name.clone(), time_secs));
            match self.last_rank {
                Some(rank) => log::info!("{} placed #{} with {:.2}s", profile.name, rank, time_secs),
                None => log::info!("{:.2}s did not make the board", time_secs),
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = match &self.state {
                Some(state) => build_frame(state, self.input.pointer(), &self.settings),
                None => Vec::new(),
            };
            if let Some(render_state) = self.render_state.as_mut() {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let phase = self.phase();

            if let Some(state) = &self.state {
                let secs = state.session.elapsed_secs(self.now_ms);
                set_text(document, "#hud-time .hud-value", &format!("{:.1}", secs));
            }

            if self.settings.show_fps {
                set_text(document, "#hud-fps .hud-value", &self.fps.to_string());
            }
            set_visible(document, "hud-fps", self.settings.show_fps);

            set_visible(document, "menu", phase.is_none());
            set_visible(document, "hud", phase.is_some());
            set_visible(document, "pause-menu", phase == Some(GamePhase::Paused));

            let over = phase == Some(GamePhase::GameOver);
            set_visible(document, "game-over", over);
            if over {
                if let Some(secs) = self.state.as_ref().and_then(|s| s.session.final_time_secs()) {
                    set_text(document, "#final-time", &format!("{:.2}s", secs));
                }
                let rank = match self.last_rank {
                    Some(rank) => format!("Ranked #{}", rank),
                    None => String::new(),
                };
                set_text(document, "#final-rank", &rank);
                let rows: Vec<String> = self
                    .leaderboard
                    .top(10)
                    .iter()
                    .enumerate()
                    .map(|(i, r)| format_rank_row(i + 1, r))
                    .collect();
                set_text(document, "#ranking", &rows.join("\n"));
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle only the `hidden` class, keeping layout classes such as `overlay`
    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.get_attribute("class").unwrap_or_default();
            let updated = with_class(&classes, "hidden", !visible);
            if updated != classes {
                let _ = el.set_attribute("class", &updated);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger unavailable: {}", e).into());
        }

        log::info!("Last Seconds starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        set_visible(&document, "loading", false);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store in device pixels; the playfield is scaled to fill it
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(
            settings,
            Box::new(LocalLeaderboard::load()),
        )));

        if let Some(profile) = &game.borrow().profile {
            if let Some(input) = document
                .get_element_by_id("name-input")
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_value(&profile.name);
            }
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_menu(game.clone());
        setup_settings_panel(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Last Seconds running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.state.is_none() {
                    return;
                }
                let key = event.key();
                // Autopilot toggle for development builds
                #[cfg(debug_assertions)]
                if key == "i" || key == "I" {
                    g.input.idle_mode = !g.input.idle_mode;
                    log::info!("Autopilot: {}", g.input.idle_mode);
                    return;
                }
                if g.input.key_down(&key).is_some() {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - scale display pixels into the playfield
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let x = event.client_x() as f32 - rect.left() as f32;
                let y = event.client_y() as f32 - rect.top() as f32;
                game.borrow_mut().input.set_pointer_from_display(
                    x,
                    y,
                    rect.width() as f32,
                    rect.height() as f32,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click - fire at pointer
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.click();
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }

    /// Play, resume, and back-to-menu buttons
    fn setup_menu(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["play-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let raw = document
                    .get_element_by_id("name-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .or_else(|| game.borrow().profile.as_ref().map(|p| p.name.clone()))
                    .unwrap_or_default();

                match PlayerProfile::from_input(&raw) {
                    Ok(profile) => {
                        let seed = js_sys::Date::now() as u64;
                        game.borrow_mut().start(profile, seed);
                    }
                    Err(e) => {
                        log::warn!("Cannot start: {}", e);
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(&e.to_string());
                        }
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.press_pause();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.state = None;
                g.input.release_all();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Pause-menu options, saved on every change
    fn setup_settings_panel(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for name in Settings::TOGGLES {
            let Some(checkbox) = document
                .get_element_by_id(&format!("opt-{}", name))
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            checkbox.set_checked(game.borrow().settings.toggle(name).unwrap_or(false));

            let game = game.clone();
            let target = checkbox.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.settings.set_toggle(name, target.checked()) {
                    g.settings.save();
                    let settings = g.settings.clone();
                    g.audio.apply_settings(&settings);
                }
            });
            let _ = checkbox
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(slider) = document
            .get_element_by_id("opt-volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let percent = (game.borrow().settings.master_volume * 100.0).round();
            slider.set_value(&percent.to_string());

            let target = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.settings.set_master_volume(target.value_as_number() as f32 / 100.0);
                g.settings.save();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
            });
            let _ = slider.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.input.release_all();
                    if g.settings.pause_on_blur && g.phase() == Some(GamePhase::Playing) {
                        g.input.press_pause();
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
                let mut g = game.borrow_mut();
                g.input.release_all();
                if g.settings.pause_on_blur && g.phase() == Some(GamePhase::Playing) {
                    g.input.press_pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use last_seconds::leaderboard::format_rank_row;
    use last_seconds::{Leaderboard, LocalLeaderboard, Tuning};

    env_logger::init();
    log::info!("Last Seconds (native) starting...");
    log::info!("Native mode runs headless autopilot rounds - run with `trunk serve` to play");

    // Optional tuning file as the first argument
    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let tuning = Tuning::from_json(&std::fs::read_to_string(&path)?)?;
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        None => Tuning::default(),
    };

    let mut board = LocalLeaderboard::load();
    for (round, seed) in [7_u64, 42, 1337].into_iter().enumerate() {
        let name = format!("bot{}", round + 1);
        match demo::run_round(seed, tuning.clone()) {
            Some(time_secs) => {
                let record = last_seconds::LeaderboardRecord::new(name.clone(), time_secs);
                if let Some(rank) = board.submit(record) {
                    log::info!("{} placed #{}", name, rank);
                }
            }
            None => log::info!("{} survived the whole demo window", name),
        }
    }

    println!("\nRanking");
    for (i, record) in board.top(10).iter().enumerate() {
        println!("{}", format_rank_row(i + 1, record));
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use last_seconds::Tuning;
    use last_seconds::consts::TICK_MS;
    use last_seconds::sim::{GameEvent, GameState, TickInput, tick};

    /// Simulated time limit for one demo round (ms)
    const DEMO_LIMIT_MS: f64 = 180_000.0;

    /// Play one autopilot round on a simulated clock.
    /// Returns the survival time, or None if the limit was reached.
    pub fn run_round(seed: u64, tuning: Tuning) -> Option<f64> {
        let mut state = GameState::with_tuning(seed, 0.0, tuning);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut now = 0.0;
        let mut kills = 0;
        while now < DEMO_LIMIT_MS {
            now += TICK_MS;
            tick(&mut state, &input, now);
            for event in state.drain_events() {
                match event {
                    GameEvent::Explosion { .. } => kills += 1,
                    GameEvent::GameOver { time_secs } => {
                        log::info!(
                            "Seed {} caught after {:.2}s ({} enemies destroyed)",
                            seed,
                            time_secs,
                            kills
                        );
                        return Some(time_secs);
                    }
                    _ => {}
                }
            }
        }
        None
    }

}
