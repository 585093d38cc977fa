//! Super Neko Bros entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PageTransitionEvent};

    use neko_bros::audio::{AudioManager, SoundEffect};
    use neko_bros::consts::*;
    use neko_bros::platform::{KeyListeners, KeyTable};
    use neko_bros::renderer::{RenderState, build_scene};
    use neko_bros::sim::{GameEvent, GameStatus, LevelLayout, World, tick};
    use neko_bros::ui::{self, FpsCounter, Hud, Overlay};
    use neko_bros::{Settings, Tuning};

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    /// Game instance holding all state
    struct Game {
        world: World,
        layout: LevelLayout,
        tuning: Tuning,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        keys: Rc<KeyTable>,
        listeners: Option<KeyListeners>,
        audio: AudioManager,
        settings: Settings,
        fps: FpsCounter,
        last_status: GameStatus,
        document: Document,
        frame_handle: Option<i32>,
        running: bool,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keys.snapshot();
                tick(&mut self.world, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in self.world.drain_events() {
                    self.on_event(event);
                }
            }

            let status = self.world.status();
            if status != self.last_status {
                log::info!("Status {:?} -> {:?}", self.last_status, status);
                if status.is_finished() {
                    log::info!(
                        "Run over: score {}, coins {}",
                        self.world.state.score,
                        self.world.state.coins
                    );
                }
                self.last_status = status;
            }
        }

        fn on_event(&self, event: GameEvent) {
            match event {
                GameEvent::Jumped => {}
                GameEvent::CoinCollected { block } => {
                    log::debug!("Coin from block {:?}", block)
                }
                GameEvent::EnemyStomped { enemy } => log::debug!("Stomped {:?}", enemy),
                GameEvent::FlagReached => {
                    log::info!("Course clear with score {}", self.world.state.score)
                }
                GameEvent::PlayerDied { cause } => log::info!("Player died: {:?}", cause),
            }
            self.audio.play(SoundEffect::for_event(&event));
        }

        /// Replace the world with a fresh run
        fn start(&mut self) {
            match World::start(&self.layout, self.tuning) {
                Ok(world) => {
                    self.world = world;
                    self.accumulator = 0.0;
                    self.keys.release_all();
                    self.audio.resume();
                    log::info!("Run started");
                }
                Err(e) => log::error!("Failed to build level: {}", e),
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.world);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = Hud::from_state(&self.world.state);
            self.set_text("hud-score", &hud.score);
            self.set_text("hud-coins", &hud.coins);
            self.set_text("hud-world", hud.world);
            self.set_text("hud-time", &hud.time);

            self.set_visible("hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                self.set_text("hud-fps", &format!("{} FPS", self.fps.fps()));
            }

            let overlay = Overlay::for_state(&self.world.state);
            self.set_visible("menu", overlay == Some(Overlay::Title));
            match &overlay {
                Some(result @ Overlay::Result { heading, .. }) => {
                    self.set_visible("result", true);
                    self.set_text("result-heading", heading);
                    if let Some(text) = result.final_score_text() {
                        self.set_text("final-score", &text);
                    }
                }
                _ => self.set_visible("result", false),
            }
        }

        fn update_mute_label(&self) {
            let label = if self.settings.muted { "SOUND: OFF" } else { "SOUND: ON" };
            self.set_text("mute-btn", label);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Super Neko Bros starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("#canvas is not a canvas"))?;

        // Backing store at device resolution; drawing stays in 800x480 units
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let layout = LevelLayout::world_1_1();
        let tuning = Tuning::default();
        let world = World::menu(&layout, tuning).map_err(js_err)?;

        let keys = Rc::new(KeyTable::new());
        let listeners = KeyListeners::attach(&window, keys.clone())?;

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.apply_settings(&settings);

        let game = Rc::new(RefCell::new(Game {
            last_status: world.status(),
            world,
            layout,
            tuning,
            render_state: None,
            accumulator: 0.0,
            last_time: 0.0,
            keys,
            listeners: Some(listeners),
            audio,
            settings,
            fps: FpsCounter::default(),
            document: document.clone(),
            frame_handle: None,
            running: true,
        }));

        // Menu texts live in code so the DOM only carries structure
        {
            let g = game.borrow();
            g.set_text("title", ui::TITLE);
            g.set_text("instructions", ui::INSTRUCTIONS);
            g.set_text("start-btn", ui::START_LABEL);
            g.set_text("retry-btn", ui::RETRY_LABEL);
            g.update_mute_label();
        }

        // A missing GPU leaves the HUD and overlays working
        match RenderState::for_canvas(canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        game.borrow().set_visible("loading", false);

        setup_buttons(&document, game.clone());
        setup_teardown(&window, game.clone());

        request_animation_frame(game);

        log::info!("Super Neko Bros running!");
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle_owner = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => handle_owner.borrow_mut().frame_handle = Some(handle),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            if !g.running {
                return;
            }

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.fps.record(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click(document, "start-btn", move |_| game.borrow_mut().start());
        }
        {
            let game = game.clone();
            on_click(document, "retry-btn", move |_| game.borrow_mut().start());
        }
        on_click(document, "mute-btn", move |_| {
            let mut g = game.borrow_mut();
            g.settings.toggle_mute();
            g.settings.save();
            let settings = g.settings.clone();
            g.audio.apply_settings(&settings);
            g.update_mute_label();
        });
    }

    /// Stop the loop and release key listeners when the page goes away,
    /// and bring both back if it is restored from the back/forward cache
    fn setup_teardown(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PageTransitionEvent| {
                let mut g = game.borrow_mut();
                g.running = false;
                if let (Some(handle), Some(window)) = (g.frame_handle.take(), web_sys::window()) {
                    let _ = window.cancel_animation_frame(handle);
                }
                // Dropping detaches them from the window
                drop(g.listeners.take());
                g.keys.release_all();
                log::info!("Page hidden, game loop stopped");
            });
            let _ =
                window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            if !event.persisted() {
                return;
            }
            {
                let mut g = game.borrow_mut();
                if g.running {
                    return;
                }
                let Some(window) = web_sys::window() else {
                    return;
                };
                match KeyListeners::attach(&window, g.keys.clone()) {
                    Ok(listeners) => g.listeners = Some(listeners),
                    Err(e) => log::error!("Failed to reattach key listeners: {:?}", e),
                }
                g.running = true;
                g.last_time = 0.0;
                g.accumulator = 0.0;
                log::info!("Page restored, game loop resumed");
            }
            request_animation_frame(game.clone());
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Headless smoke run: hold right and hop whenever possible
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use neko_bros::Tuning;
    use neko_bros::sim::{GameEvent, GameStatus, LevelError, LevelLayout, TickInput, World, tick};

    #[derive(Debug)]
    pub struct Outcome {
        pub status: GameStatus,
        pub steps: u32,
        pub score: u64,
        pub coins: u32,
        pub player_x: f32,
        pub progress: f32,
        pub jumps: u32,
    }

    pub fn run(layout: &LevelLayout, tuning: Tuning, max_steps: u32) -> Result<Outcome, LevelError> {
        let mut world = World::start(layout, tuning)?;
        let input = TickInput {
            left: false,
            right: true,
            jump: true,
        };

        let mut steps = 0;
        let mut jumps = 0;
        while steps < max_steps && !world.status().is_finished() {
            tick(&mut world, &input);
            steps += 1;
            for event in world.drain_events() {
                match event {
                    GameEvent::Jumped => jumps += 1,
                    other => log::debug!("step {}: {:?}", steps, other),
                }
            }
        }

        Ok(Outcome {
            status: world.status(),
            steps,
            score: world.state.score,
            coins: world.state.coins,
            player_x: world.player.pos.x,
            progress: world.progress(),
            jumps,
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use neko_bros::Tuning;
    use neko_bros::sim::LevelLayout;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Super Neko Bros (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            let tuning =
                Tuning::from_json(&json).with_context(|| format!("parsing tuning file {path}"))?;
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        None => Tuning::default(),
    };

    // Two minutes of simulated play
    let outcome = headless::run(&LevelLayout::world_1_1(), tuning, 60 * 120)?;
    log::info!(
        "{:?} after {} steps: score {}, coins {}, x {:.1} ({:.0}% of the level), {} jumps",
        outcome.status,
        outcome.steps,
        outcome.score,
        outcome.coins,
        outcome.player_x,
        outcome.progress * 100.0,
        outcome.jumps
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
