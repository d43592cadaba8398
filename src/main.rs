//! Ball Maze entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use ball_maze::Settings;
    use ball_maze::consts::*;
    use ball_maze::input::KeyAction;
    use ball_maze::renderer::{RenderState, scene};
    use ball_maze::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        state: GameState,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Phase shown in the HUD last frame
        last_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(settings: Settings, state: GameState) -> Self {
            Self {
                settings,
                state,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_phase: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = std::mem::take(&mut self.input);
                for event in tick(&mut self.state, &input, SIM_DT) {
                    if let GameEvent::WallsReleased { count } = event {
                        log::info!("You win! {} walls collapsing", count);
                    }
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene(&self.state)) {
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

        /// Update status text in DOM when the phase changes
        fn update_hud(&mut self) {
            if self.last_phase == Some(self.state.phase) {
                return;
            }
            self.last_phase = Some(self.state.phase);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("status") {
                let text = match self.state.phase {
                    GamePhase::Playing => "Roll the ball to the green square (arrows / WASD)",
                    GamePhase::Won => "You win! Press R for a new maze",
                    GamePhase::Paused => "Paused",
                };
                el.set_text_content(Some(text));
            }
        }

        /// Start over with a new maze
        fn restart(&mut self, seed: u64) {
            match GameState::new(&self.settings, seed) {
                Ok(state) => {
                    self.state = state;
                    self.accumulator = 0.0;
                    self.input = TickInput::default();
                    log::info!("Game restarted with seed: {}", seed);
                }
                Err(e) => log::error!("Could not restart: {}", e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Ball Maze starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let settings = Settings::load();
        // Stored settings become an editable template in LocalStorage
        settings.save();
        let seed = js_sys::Date::now() as u64;
        let state = match GameState::new(&settings, seed) {
            Ok(state) => state,
            Err(e) => {
                log::error!("Could not create game: {}", e);
                return;
            }
        };
        let arena = glam::Vec2::new(state.arena.width, state.arena.height);
        let game = Rc::new(RefCell::new(Game::new(settings, state)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
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
                power_preference: wgpu::PowerPreference::default(),
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

        match RenderState::new(surface, &adapter, width, height, arena).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Ball Maze running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(action) = KeyAction::from_key(&event.key()) else {
                return;
            };
            // Keep arrow keys from scrolling the page
            event.prevent_default();

            let mut g = game.borrow_mut();
            match action {
                KeyAction::Nudge(nudge) => g.input.nudges.push(nudge),
                KeyAction::Pause => g.input.pause = true,
                KeyAction::Restart => g.restart(js_sys::Date::now() as u64),
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart(js_sys::Date::now() as u64);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
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
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn make_options_parser() -> clap::Command {
    use clap::{Arg, Command, value_parser};

    Command::new("ball-maze")
        .about("Generate a perfect maze and print it (the game itself runs in the browser)")
        .arg(
            Arg::new("rows")
                .long("rows")
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("Number of cell rows"),
        )
        .arg(
            Arg::new("cols")
                .long("cols")
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("Number of cell columns"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(value_parser!(u64))
                .help("RNG seed (defaults to the current time)"),
        )
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), ball_maze::MazeError> {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    env_logger::init();

    let matches = make_options_parser().get_matches();
    let rows = matches.get_one::<usize>("rows").copied().unwrap_or(10);
    let cols = matches.get_one::<usize>("cols").copied().unwrap_or(10);
    let seed = matches.get_one::<u64>("seed").copied().unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default()
    });

    log::info!("Ball Maze (native) generating {}x{} maze with seed {}", rows, cols, seed);
    log::info!("The playable game is the web build - run with `trunk serve`");

    let maze = ball_maze::sim::generate(rows, cols, &mut Pcg32::seed_from_u64(seed))?;
    print!("{}", maze);

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
