//! Pixel Arcade entry point
//!
//! On the web this wires GeometryJumper to the page; natively it runs a
//! headless, self-playing session and reports the score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent,
    };

    use pixel_arcade::platform::web::{FrameCallback, RafScheduler, performance_now};
    use pixel_arcade::platform::{Command, command_for_key, command_for_pointer};
    use pixel_arcade::renderer::CanvasSurface;
    use pixel_arcade::sim::Viewport;
    use pixel_arcade::{GameEvent, Session, Tuning};

    const CANVAS_ID: &str = "geometry-canvas";
    const START_ID: &str = "geometry-start";
    const RESTART_ID: &str = "geometry-restart";
    const SCORE_ID: &str = "geometry-score";
    const TUNING_ID: &str = "geometry-tuning";

    /// Game instance holding all state
    struct Game {
        session: Session<RafScheduler>,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        document: Document,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            self.session.frame(time, &mut self.surface);
            self.sync_ui();
        }

        fn command(&mut self, command: Command) {
            self.session
                .command(command, performance_now(), &mut self.surface);
            self.sync_ui();
        }

        fn visibility_changed(&mut self, hidden: bool) {
            self.session.visibility_changed(hidden, &mut self.surface);
            self.sync_ui();
        }

        fn resize(&mut self) {
            let viewport = fit_canvas(&self.canvas);
            self.session.resize(viewport, &mut self.surface);
        }

        fn render(&mut self) {
            self.session.render(&mut self.surface);
        }

        /// Push session notifications into the DOM
        fn sync_ui(&mut self) {
            for event in self.session.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) => {
                        if let Some(el) = self.document.get_element_by_id(SCORE_ID) {
                            el.set_text_content(Some(&score.to_string()));
                        }
                    }
                    GameEvent::Started => {
                        set_visible(&self.document, START_ID, false);
                        set_visible(&self.document, RESTART_ID, false);
                    }
                    GameEvent::Ended { score } => {
                        set_visible(&self.document, RESTART_ID, true);
                        log::info!("Final score: {}", score);
                    }
                    GameEvent::Paused | GameEvent::Resumed => {}
                }
            }
        }
    }

    /// Toggle `visibility` while keeping the element's layout slot
    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let value = if visible { "visible" } else { "hidden" };
            let _ = el.style().set_property("visibility", value);
        }
    }

    /// Size the canvas to its container and return the new viewport
    fn fit_canvas(canvas: &HtmlCanvasElement) -> Viewport {
        let (w, h) = match canvas.parent_element() {
            Some(parent) => (parent.client_width(), parent.client_height()),
            None => (canvas.client_width(), canvas.client_height()),
        };
        let (w, h) = (w.max(0) as u32, h.max(0) as u32);
        canvas.set_width(w);
        canvas.set_height(h);
        Viewport::new(w as f32, h as f32)
    }

    /// Whether keyboard input belongs to a text field
    fn input_has_focus(document: &Document) -> bool {
        let Some(active) = document.active_element() else {
            return false;
        };
        let tag = active.tag_name();
        tag == "INPUT"
            || tag == "TEXTAREA"
            || active
                .dyn_ref::<HtmlElement>()
                .is_some_and(|el| el.is_content_editable())
    }

    fn not_found(what: &str) -> JsValue {
        JsValue::from_str(&format!("{} not found", what))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
        }

        log::info!("Pixel Arcade starting...");

        let window = web_sys::window().ok_or_else(|| not_found("window"))?;
        let document = window.document().ok_or_else(|| not_found("document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| not_found(CANVAS_ID))?
            .dyn_into()
            .map_err(JsValue::from)?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| not_found("2d context"))?
            .dyn_into()
            .map_err(JsValue::from)?;

        let tuning_json = document
            .get_element_by_id(TUNING_ID)
            .and_then(|el| el.text_content());
        let tuning = Tuning::from_json_or_default(tuning_json.as_deref());

        let viewport = fit_canvas(&canvas);
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler::new(window.clone(), callback.clone());

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(tuning, viewport, seed, scheduler),
            surface: CanvasSurface::new(ctx),
            canvas: canvas.clone(),
            document: document.clone(),
        }));
        log::info!("Session created with seed: {}", seed);

        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                game.borrow_mut().frame(time);
            }));
        }

        setup_input_handlers(&window, &document, &canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_page_handlers(&window, &document, game.clone())?;

        game.borrow_mut().render();
        log::info!("GeometryJumper ready");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if input_has_focus(&document) {
                    return;
                }
                let mut g = game.borrow_mut();
                if let Some(command) = command_for_key(&event.code(), g.session.run_state()) {
                    g.command(command);
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click/tap on the canvas
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(command) = command_for_pointer(g.session.run_state()) {
                    g.command(command);
                }
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for (id, command) in [(START_ID, Command::Start), (RESTART_ID, Command::Restart)] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Button #{} missing", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().command(command);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_page_handlers(
        window: &web_sys::Window,
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                game.borrow_mut().visibility_changed(hidden);
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Canvas follows its container
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use pixel_arcade::consts::PHYSICS_STEP_MS;
    use pixel_arcade::renderer::RecordingSurface;
    use pixel_arcade::sim::{Viewport, World};
    use pixel_arcade::{GameEvent, ManualScheduler, Session, Tuning};

    /// Longest headless run (two minutes of game time)
    const MAX_RUN_MS: f64 = 120_000.0;
    /// Jump when the next obstacle is this close
    const JUMP_LOOKAHEAD: f32 = 40.0;

    fn should_jump(world: &World) -> bool {
        let player = world.player.rect();
        world.obstacles.iter().any(|o| {
            let gap = o.rect.left() - player.right();
            (0.0..=JUMP_LOOKAHEAD).contains(&gap)
        })
    }

    /// Play one session at 60 fps; returns the final score
    pub fn run(seed: u64) -> u32 {
        let viewport = Viewport::new(800.0, 250.0);
        let mut session = Session::new(Tuning::default(), viewport, seed, ManualScheduler::new());
        let mut surface = RecordingSurface::new();

        session.start(0.0);
        let mut now = 0.0;
        while now < MAX_RUN_MS && session.scheduler_mut().take_pending().is_some() {
            now += PHYSICS_STEP_MS;
            if should_jump(session.world()) {
                session.jump();
            }
            session.frame(now, &mut surface);

            for event in session.drain_events() {
                match event {
                    GameEvent::ScoreChanged(score) if score % 100 == 0 => {
                        log::info!("Score {} at {:.1}s", score, now / 1000.0);
                    }
                    GameEvent::Ended { score } => {
                        log::info!("Collision after {:.1}s, score {}", now / 1000.0, score);
                    }
                    _ => {}
                }
            }
        }

        log::info!("Rendered {} frames", surface.frames);
        session.score()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    log::info!("Pixel Arcade (native) headless run, seed {}", seed);
    log::info!("Run with `trunk serve` for the playable web version");

    let score = headless::run(seed);
    println!("GeometryJumper autoplay finished with score {}", score);
}
