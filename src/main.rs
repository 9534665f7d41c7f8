//! Dodgefall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use dodgefall::Session;
    use dodgefall::platform::{FrameClock, KeyValueStore, LocalStore, MemoryStore};
    use dodgefall::renderer::{RenderState, build_frame};
    use dodgefall::sim::{Arena, GameEvent};

    type Store = Box<dyn KeyValueStore>;

    /// Game instance holding all state
    struct Game {
        session: Session<Store>,
        render_state: Option<RenderState>,
        clock: FrameClock,
        canvas: HtmlCanvasElement,
        document: Document,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    /// Canvas layout in logical pixels plus the physical backing size
    struct CanvasFit {
        arena: Arena,
        width_px: u32,
        height_px: u32,
    }

    /// Size the canvas backing store to its layout box, DPR clamped to [1, 2]
    fn fit_canvas(canvas: &HtmlCanvasElement) -> CanvasFit {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0)
            .clamp(1.0, 2.0);
        let rect = canvas.get_bounding_client_rect();
        let arena = Arena::from_viewport(rect.width().floor() as f32, rect.height().floor() as f32);

        let width_px = (arena.width as f64 * dpr).floor() as u32;
        let height_px = (arena.height as f64 * dpr).floor() as u32;
        canvas.set_width(width_px);
        canvas.set_height(height_px);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", arena.width));
        let _ = style.set_property("height", &format!("{}px", arena.height));

        CanvasFit {
            arena,
            width_px,
            height_px,
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

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    impl Game {
        fn new(seed: u64, store: Store, canvas: HtmlCanvasElement, document: Document) -> Self {
            let fit = fit_canvas(&canvas);
            Self {
                session: Session::new(fit.arena, seed, store),
                render_state: None,
                clock: FrameClock::new(),
                canvas,
                document,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn resize(&mut self) {
            let fit = fit_canvas(&self.canvas);
            self.session.resize(fit.arena);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(
                    fit.width_px,
                    fit.height_px,
                    Vec2::new(fit.arena.width, fit.arena.height),
                );
            }
            log::info!("Arena resized to {}x{}", fit.arena.width, fit.arena.height);
        }

        /// Pointer position relative to the canvas, in arena pixels
        fn pointer_pos(&self, event: &PointerEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            )
        }

        fn track_fps(&mut self, time: f64) {
            let oldest = self.frame_times[self.frame_index];
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % self.frame_times.len();
            if oldest > 0.0 && time > oldest {
                self.fps = (self.frame_times.len() as f64 * 1000.0 / (time - oldest)).round() as u32;
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            self.track_fps(time);

            for event in self.session.frame(dt) {
                self.on_event(event);
            }

            self.render();
            self.update_hud();
        }

        fn on_event(&self, event: GameEvent) {
            match event {
                GameEvent::Started => {
                    set_hidden(&self.document, "ui", true);
                    set_hidden(&self.document, "gameover", true);
                }
                GameEvent::GameOver { score } => {
                    set_text(&self.document, "final-score", &format!("Score: {}", score));
                    set_hidden(&self.document, "gameover", false);
                }
                GameEvent::ObstacleSpawned | GameEvent::ObstacleCleared => {}
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_frame(&self.session.world, &self.session.settings);
            match render_state.render(&vertices) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let world = &self.session.world;
            set_text(&self.document, "score", &world.display_score().to_string());
            set_text(&self.document, "best", &self.session.best.value.to_string());

            let fps = if self.session.settings.show_fps {
                format!("{} fps", self.fps)
            } else {
                String::new()
            };
            set_text(&self.document, "fps", &fps);
        }
    }

    /// localStorage when the browser allows it, otherwise an in-memory stand-in
    fn open_store() -> Store {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("localStorage unavailable ({}); best score will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    async fn init_renderer(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height, viewport) = {
            let g = game.borrow();
            let arena = g.session.world.arena;
            (
                g.canvas.width(),
                g.canvas.height(),
                Vec2::new(arena.width, arena.height),
            )
        };

        match RenderState::new(surface, &adapter, width, height, viewport).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dodgefall starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            open_store(),
            canvas.clone(),
            document.clone(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Menu shows the stored best before the first run
        game.borrow().update_hud();

        init_renderer(&canvas, &game).await;

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone());
        setup_resize(game.clone())?;

        request_animation_frame(game);

        log::info!("Dodgefall running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(
                    key.as_str(),
                    " " | "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown"
                ) {
                    event.prevent_default();
                }
                game.borrow_mut().session.key_down(&key, event.repeat());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer: press on the canvas, track and release anywhere
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                g.session.pointer_down(pos);
            });
            canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.pointer_pos(&event);
                g.session.pointer_move(pos);
            });
            window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().session.pointer_up();
            });
            window.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Losing focus drops held keys so the player doesn't keep drifting
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.input.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().session.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

/// Frames the headless demo runs before giving up (two minutes at 60 fps)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dodgefall::Session;
    use dodgefall::platform::MemoryStore;
    use dodgefall::sim::{Arena, GameEvent};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Dodgefall (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    let mut session = Session::new(Arena::from_viewport(800.0, 600.0), seed, MemoryStore::new());
    session.autopilot = true;
    session.start();

    let dt = 1.0 / 60.0;
    let mut cleared = 0u32;
    for frame in 0..DEMO_FRAMES {
        for event in session.frame(dt) {
            match event {
                GameEvent::ObstacleCleared => cleared += 1,
                GameEvent::GameOver { score } => {
                    println!(
                        "seed {}: autopilot hit after {:.1}s, score {} ({} dodged)",
                        seed,
                        frame as f32 * dt,
                        score,
                        cleared
                    );
                    return;
                }
                GameEvent::Started | GameEvent::ObstacleSpawned => {}
            }
        }
    }

    println!(
        "seed {}: autopilot survived {} frames, score {} ({} dodged)",
        seed,
        DEMO_FRAMES,
        session.world.display_score(),
        cleared
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
