//! Code Rain entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement};

    use code_rain::audio::AudioManager;
    use code_rain::consts::*;
    use code_rain::fx::ScreenFx;
    use code_rain::platform::{self, LocalStorage};
    use code_rain::renderer::CanvasRenderer;
    use code_rain::sim::{FrameView, GameEvent, GamePhase, GameState, SessionSummary, TickInput, tick};
    use code_rain::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        /// None until the first Start click
        state: Option<GameState>,
        settings: Settings,
        scores: HighScores,
        storage: LocalStorage,
        renderer: CanvasRenderer,
        audio: AudioManager,
        fx: ScreenFx,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Result of the last finished run, kept for the name prompt
        last_summary: Option<SessionSummary>,
    }

    impl Game {
        fn new(renderer: CanvasRenderer) -> Self {
            let storage = LocalStorage::new();
            let settings = Settings::load(&storage);
            let scores = HighScores::load(&storage);
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: None,
                settings,
                scores,
                storage,
                renderer,
                audio,
                fx: ScreenFx::new(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_summary: None,
            }
        }

        /// Replace the session wholesale
        fn start(&mut self) {
            let seed = js_sys::Date::now() as u64;
            let (w, h) = self.renderer.size();
            let config = self.settings.game_config(w, h, seed);
            log::info!(
                "New game: {} rules, {:?} words, seed {}",
                config.rules.as_str(),
                config.pool,
                seed
            );
            self.state = Some(GameState::new(config));
            self.fx.clear();
            self.accumulator = 0.0;
            self.input = TickInput::default();
            self.last_summary = None;
            self.audio.play(code_rain::sim::SoundEffect::Hit);
        }

        fn is_playing(&self) -> bool {
            self.state
                .as_ref()
                .is_some_and(|s| s.phase == GamePhase::Playing)
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.fx.update(dt);

            let Some(state) = self.state.as_mut() else {
                return;
            };

            self.accumulator += dt;
            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(state, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            for event in state.drain_events() {
                if let Some(effect) = event.sound() {
                    self.audio.play(effect);
                }
                self.fx.trigger(&event, &self.settings);
                if let GameEvent::GameOver(summary) = event {
                    self.last_summary = Some(summary);
                    let rank = if self.scores.should_prompt(summary.score) {
                        self.scores.potential_rank(summary.score)
                    } else {
                        None
                    };
                    show_game_over(&summary, rank);
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(state) = &self.state {
                self.renderer.render(&FrameView::capture(state), &self.fx);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(state) = &self.state else { return };
            let view = FrameView::capture(state);
            let hud = view.hud;

            set_text("modeDisplay", hud.rules.as_str());
            set_text("scoreDisplay", &hud.score.to_string());
            set_text("wordsDisplay", &hud.words_cleared.to_string());
            set_text("levelDisplay", &hud.level.to_string());
            set_text("wpmDisplay", &hud.wpm.to_string());

            if let Some(el) = by_id("goalDisplay") {
                el.set_text_content(Some(&hud.goal_text().unwrap_or_else(|| "-".to_string())));
                let _ = el.class_list().toggle_with_force("met", hud.goal_met());
            }

            if let Some(el) = by_id("timeDisplay") {
                el.set_text_content(Some(&hud.seconds_left().to_string()));
                let _ = el
                    .class_list()
                    .toggle_with_force("warning", hud.time_warning());
            }

            set_hidden("pauseScreen", view.phase != GamePhase::Paused);
        }

        fn submit_score(&mut self, name: &str) {
            let Some(summary) = self.last_summary.take() else {
                return;
            };
            let rank = self
                .scores
                .save_score(name, summary.score, summary.wpm, &platform::today());
            self.scores.persist(&mut self.storage);
            log::info!("Score {} saved at rank {:?}", summary.score, rank);
            set_hidden("inputContainer", true);
            show_leaderboard(&self.scores);
        }

        /// Pick up the start screen's mode selectors
        fn read_mode_choice(&mut self) {
            let rules = select_value("modeSelect");
            let pool = select_value("poolSelect");
            self.settings.choose_mode(&rules, &pool, &mut self.storage);
        }

        /// Queue a pause through the tick input so a pending Escape can't undo it
        fn auto_pause(&mut self, reason: &str) {
            match self.state.as_ref().map(|s| s.phase) {
                Some(GamePhase::Playing) => {
                    self.input.pause = true;
                    log::info!("Auto-paused ({})", reason);
                }
                // Drop a pending resume
                Some(GamePhase::Paused) => self.input.pause = false,
                _ => {}
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.renderer.resize(width, height);
            if let Some(state) = self.state.as_mut() {
                state.resize(width as f32, height as f32);
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn by_id(id: &str) -> Option<Element> {
        document()?.get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(id: &str, hidden: bool) {
        if let Some(el) = by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn name_input() -> Option<HtmlInputElement> {
        by_id("playerNameInput")?.dyn_into().ok()
    }

    fn select(id: &str) -> Option<HtmlSelectElement> {
        by_id(id)?.dyn_into().ok()
    }

    fn select_value(id: &str) -> String {
        select(id).map(|s| s.value()).unwrap_or_default()
    }

    /// Show the saved mode on the start screen
    fn sync_mode_selects(settings: &Settings) {
        if let Some(s) = select("modeSelect") {
            s.set_value(settings.rules.as_str());
        }
        if let Some(s) = select("poolSelect") {
            s.set_value(settings.pool.as_str());
        }
    }

    /// `rank` is set when the score earns a place on the board
    fn show_game_over(summary: &SessionSummary, rank: Option<usize>) {
        set_hidden("gameOverScreen", false);
        set_text("finalScore", &summary.score.to_string());
        set_text("finalWords", &summary.words_cleared.to_string());
        set_text("finalWpm", &summary.wpm.to_string());
        set_text("finalLevel", &summary.level.to_string());

        set_hidden("inputContainer", rank.is_none());
        if let Some(rank) = rank {
            set_text("promptRank", &format!("#{}", rank));
            if let Some(input) = name_input() {
                input.set_value("");
                let _ = input.focus();
            }
        }
    }

    fn show_leaderboard(scores: &HighScores) {
        set_hidden("startScreen", true);
        set_hidden("gameOverScreen", true);
        set_hidden("leaderboardScreen", false);

        let Some(doc) = document() else { return };
        let Some(list) = doc.get_element_by_id("leaderboardList") else {
            return;
        };
        list.set_inner_html("");

        if scores.is_empty() {
            if let Ok(row) = doc.create_element("tr") {
                if let Ok(cell) = doc.create_element("td") {
                    let _ = cell.set_attribute("colspan", "5");
                    cell.set_text_content(Some("NO RECORDS FOUND"));
                    let _ = row.append_child(&cell);
                }
                let _ = list.append_child(&row);
            }
            return;
        }

        for (i, entry) in scores.entries.iter().enumerate() {
            let Ok(row) = doc.create_element("tr") else {
                continue;
            };
            let cells = [
                format!("#{}", i + 1),
                entry.name.clone(),
                entry.score.to_string(),
                entry.wpm.to_string(),
                entry.date.clone(),
            ];
            for text in &cells {
                if let Ok(cell) = doc.create_element("td") {
                    // Text only: names are player input
                    cell.set_text_content(Some(text));
                    let _ = row.append_child(&cell);
                }
            }
            let _ = list.append_child(&row);
        }
    }

    fn hide_leaderboard(game_over: bool) {
        set_hidden("leaderboardScreen", true);
        if game_over {
            set_hidden("gameOverScreen", false);
        } else {
            set_hidden("startScreen", false);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Code Rain starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let Some(renderer) = CanvasRenderer::new(canvas) else {
            log::error!("Canvas2D unavailable");
            return;
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        renderer.resize(width as u32, height as u32);

        let game = Rc::new(RefCell::new(Game::new(renderer)));
        sync_mode_selects(&game.borrow().settings);

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_resize(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Code Rain running!");
    }

    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        if let Some(btn) = by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        for id in ["startBtn", "restartBtn"] {
            let game = game.clone();
            on_click(id, move |_| {
                set_hidden("startScreen", true);
                set_hidden("gameOverScreen", true);
                set_hidden("leaderboardScreen", true);
                let mut g = game.borrow_mut();
                g.read_mode_choice();
                g.start();
            });
        }

        for id in ["leaderboardBtn", "gameoverLeaderboardBtn"] {
            let game = game.clone();
            on_click(id, move |_| show_leaderboard(&game.borrow().scores));
        }

        {
            let game = game.clone();
            on_click("closeLeaderboardBtn", move |_| {
                let over = game.borrow().state.as_ref().is_some_and(|s| s.is_over());
                hide_leaderboard(over);
            });
        }

        {
            let game = game.clone();
            on_click("submitScoreBtn", move |_| {
                let name = name_input().map(|i| i.value()).unwrap_or_default();
                game.borrow_mut().submit_score(&name);
            });
        }

        // Enter in the name field submits
        if let Some(input) = name_input() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.key() == "Enter" {
                    let name = name_input().map(|i| i.value()).unwrap_or_default();
                    game.borrow_mut().submit_score(&name);
                }
            });
            let _ = input.add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            // Typing a name is not gameplay
            let typing_name = document()
                .and_then(|d| d.active_element())
                .is_some_and(|el| el.id() == "playerNameInput");
            if typing_name {
                return;
            }

            let mut g = game.borrow_mut();
            let key = event.key();
            if key == "Escape" {
                g.input.pause = true;
                return;
            }
            if !g.is_playing() {
                return;
            }

            // Ignore non-character keys (Shift, Ctrl, etc.)
            let mut chars = key.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                event.prevent_default();
                g.input.keys.push(ch);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            game.borrow_mut().resize(w as u32, h as u32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
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
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                g.auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus back: unmute, stay paused until Escape
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use code_rain::HighScores;
    use code_rain::consts::SIM_DT;
    use code_rain::platform::{self, MemoryStorage};
    use code_rain::sim::{AutoPlayer, GameConfig, GameEvent, GameState, RuleSet, TickInput, tick};
    use code_rain::words::WordPool;

    env_logger::init();
    log::info!("Code Rain (native) starting...");
    log::info!("The browser build is the real game - run with `trunk serve` for the web version");

    // code-rain [tiered|continuous] [arcade|easy|medium|hard] [seed] [keys-per-second]
    let mut args = std::env::args().skip(1);
    let rules = args
        .next()
        .and_then(|s| RuleSet::from_str(&s))
        .unwrap_or_default();
    let pool = args
        .next()
        .and_then(|s| WordPool::from_str(&s))
        .unwrap_or_default();
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| platform::now_ms() as u64);
    let kps: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(6.0);

    let mut storage = MemoryStorage::new();
    let mut scores = HighScores::load(&storage);

    let mut state = GameState::new(GameConfig {
        rules,
        pool,
        seed,
        ..Default::default()
    });
    let mut bot = AutoPlayer::new(kps);
    log::info!(
        "Demo run: {} rules, {} words, seed {}, {} keys/s",
        rules.as_str(),
        pool.as_str(),
        seed,
        kps
    );

    // Ten minutes of game time at most
    let max_ticks = (600.0 / SIM_DT) as u32;
    for _ in 0..max_ticks {
        let input = TickInput {
            keys: bot.poll(&state, SIM_DT).into_iter().collect(),
            pause: false,
        };
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::LevelUp { level } => println!("-- LEVEL {} --", level),
                GameEvent::WordExpired { text } => println!("   lost '{}'", text),
                GameEvent::GameOver(summary) => {
                    println!(
                        "\nGAME OVER  score {}  words {}  wpm {}  level {}",
                        summary.score, summary.words_cleared, summary.wpm, summary.level
                    );
                    if scores.should_prompt(summary.score) {
                        scores.save_score("bot", summary.score, summary.wpm, &platform::today());
                        scores.persist(&mut storage);
                    }
                }
                _ => {}
            }
        }

        if state.is_over() {
            break;
        }
    }

    if !state.is_over() {
        println!("\nStopped after ten minutes: score {}", state.score);
    }

    println!("\n#   NAME   SCORE   WPM   DATE");
    for (i, e) in HighScores::load(&storage).entries.iter().enumerate() {
        println!("{:<3} {:<6} {:>5}   {:>3}   {}", i + 1, e.name, e.score, e.wpm, e.date);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
