//! Reef Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use reef_rush::assets::Assets;
    use reef_rush::renderer::{Renderer, canvas_point};
    use reef_rush::sim::{Character, GameEvent, GamePhase, GameState, TickInput, tick};
    use reef_rush::Settings;

    /// Every overlay screen; showing one pauses the simulation
    const SCREEN_IDS: [&str; 6] = [
        "char-screen",
        "title-screen",
        "help-screen",
        "about-screen",
        "game-over",
        "win-screen",
    ];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        input: TickInput,
        settings: Settings,
        character: Character,
    }

    impl Game {
        fn new(playfield: Vec2) -> Self {
            let mut state = GameState::new(0, Character::default(), playfield);
            state.phase = GamePhase::Menu;
            Self {
                state,
                renderer: None,
                input: TickInput::default(),
                settings: Settings::load(),
                character: Character::default(),
            }
        }

        /// Reset all round state and start playing
        fn start_round(&mut self, playfield: Vec2) {
            let seed = js_sys::Date::now() as u64;
            self.state = GameState::new(seed, self.character, playfield);
            log::info!("Round started with seed: {seed}");
        }

        /// Hold the simulation while an overlay screen is visible
        fn suspend(&mut self) {
            if self.state.phase == GamePhase::Playing {
                self.state.phase = GamePhase::Menu;
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, &self.settings);
            }
        }
    }

    /// Show one overlay screen (hiding the rest), or none at all
    fn show_screen(document: &Document, id: Option<&str>) {
        for screen in SCREEN_IDS {
            if let Some(el) = document.get_element_by_id(screen) {
                let class = if Some(screen) == id {
                    "screen"
                } else {
                    "screen hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    fn canvas_size(canvas: &HtmlCanvasElement) -> Vec2 {
        Vec2::new(canvas.width() as f32, canvas.height() as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Reef Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fill the viewport
        let fit_canvas = |canvas: &HtmlCanvasElement| {
            let window = web_sys::window().expect("no window");
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
        };
        fit_canvas(&canvas);

        let game = Rc::new(RefCell::new(Game::new(canvas_size(&canvas))));
        game.borrow_mut().input.pointer = canvas_size(&canvas) / 2.0;

        // Asset-ready gate: the character-select screen only appears once
        // all three images have decoded.
        let assets = Assets::load().await.expect("failed to load images");
        let renderer = Renderer::new(canvas.clone(), assets).expect("failed to create renderer");
        game.borrow_mut().renderer = Some(renderer);
        show_screen(&document, Some("char-screen"));

        setup_resize_handler(&canvas, game.clone());
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Reef Rush running!");
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().expect("no window");
            let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1280.0);
            let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(720.0);
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            game.borrow_mut().state.playfield = Vec2::new(w as f32, h as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Held-key state
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                set_key(&mut game.borrow_mut().input, &event.key(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                set_key(&mut game.borrow_mut().input, &event.key(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer position relative to the canvas
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer = canvas_point(
                    &canvas_clone,
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_key(input: &mut TickInput, key: &str, pressed: bool) {
        match key.to_lowercase().as_str() {
            "a" | "arrowleft" => input.left = pressed,
            "d" | "arrowright" => input.right = pressed,
            "w" | "arrowup" => input.up = pressed,
            "s" | "arrowdown" => input.down = pressed,
            _ => {}
        }
    }

    /// Wire a click handler to a button by element id
    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        } else {
            log::warn!("Missing button element: {id}");
        }
    }

    fn setup_buttons(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");

        // Character select
        for (btn_id, character) in [("sunny-btn", Character::Sunny), ("coral-btn", Character::Coral)]
        {
            let game = game.clone();
            let document_clone = document.clone();
            on_click(&document, btn_id, move |_| {
                game.borrow_mut().character = character;
                show_screen(&document_clone, Some("title-screen"));
            });
        }

        // Start a round: hide every overlay and reset all round state
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let document_clone = document.clone();
            on_click(&document, "play-btn", move |_| {
                let playfield = canvas_size(&canvas);
                game.borrow_mut().start_round(playfield);
                show_screen(&document_clone, None);
            });
        }

        // Info screens
        for (btn_id, target) in [
            ("how-to-btn", "help-screen"),
            ("back-btn", "title-screen"),
            ("about-btn", "about-screen"),
            ("about-back-btn", "title-screen"),
        ] {
            let game = game.clone();
            let document_clone = document.clone();
            on_click(&document, btn_id, move |_| {
                game.borrow_mut().suspend();
                show_screen(&document_clone, Some(target));
            });
        }

        // Back to character select after a finished round
        for btn_id in ["replay-btn", "win-replay-btn"] {
            let document_clone = document.clone();
            on_click(&document, btn_id, move |_| {
                show_screen(&document_clone, Some("char-screen"));
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            let input = g.input;
            let events = tick(&mut g.state, &input);
            for event in events {
                handle_event(event);
            }
            g.render();
        }

        request_animation_frame(game);
    }

    fn handle_event(event: GameEvent) {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");

        match event {
            GameEvent::BossSpawned => log::info!("Boss spawned"),
            GameEvent::PlayerHit { lives_left } => {
                log::debug!("Player hit, {lives_left} lives left");
            }
            GameEvent::GameOver { score } => {
                log::info!("Game over with score {score}");
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&score.to_string()));
                }
                show_screen(&document, Some("game-over"));
            }
            GameEvent::Victory { score } => {
                log::info!("Victory with score {score}");
                show_screen(&document, Some("win-screen"));
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use reef_rush::sim::{Character, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Reef Rush (native) starting...");
    log::info!("Rendering requires the web build - run with `trunk serve`");

    // Headless smoke run of the simulation
    let mut state = GameState::new(1, Character::Sunny, Vec2::new(1280.0, 720.0));
    let input = TickInput {
        pointer: Vec2::new(1280.0, 360.0),
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input);
    }
    log::info!(
        "After 600 frames: score={} kills={} enemies={} bullets={}",
        state.score,
        state.kills,
        state.enemies.len(),
        state.bullets.len()
    );
}
