//! Cat & Ball entry point
//!
//! Wires the deterministic sim to the browser: DOM rendering, input events,
//! particles, parallax, and sound. The native build runs a short headless
//! demo instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use cat_ball::Settings;
    use cat_ball::audio::{AudioManager, SoundEffect};
    use cat_ball::sim::{
        self, Bounds, CatHitbox, ControlButton, DragSession, GameEvent, GameState,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        bounds: Bounds,
        /// Live drag, if the pointer currently holds the ball
        drag: Option<DragSession>,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64, bounds: Bounds, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state: GameState::new(seed, &bounds),
                bounds,
                drag: None,
                audio,
                settings,
            }
        }

        /// One animation frame: read the cat, tick the sim, realize events,
        /// write the DOM
        fn frame(&mut self) {
            let document = document();

            // Cat geometry comes from the DOM each tick; with no cat
            // element the hitbox sits far off-screen and never triggers
            let cat = read_cat_hitbox(&document).unwrap_or(CatHitbox {
                center: Vec2::new(-10_000.0, -10_000.0),
                width: 0.0,
                height: 0.0,
            });

            let out = sim::tick(&mut self.state, &self.bounds, &cat);

            for event in &out.events {
                match event {
                    GameEvent::WallHit { at, .. } => {
                        self.audio.play(SoundEffect::Bounce);
                        if self.settings.effective_particles() {
                            spawn_particle(&document, *at);
                        }
                    }
                    GameEvent::Meow => self.audio.play(SoundEffect::Meow),
                }
            }

            self.render(&document, out.cat_near);
        }

        /// Write the current snapshot to the DOM
        fn render(&self, document: &Document, cat_near: bool) {
            if let Some(ball) = document
                .get_element_by_id("ball")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let style = ball.style();
                let _ = style.set_property("left", &format!("{}px", self.state.ball.pos.x));
                let _ = style.set_property("top", &format!("{}px", self.state.ball.pos.y));
            }

            if let Some(cat) = document.get_element_by_id("cat") {
                let classes = cat.class_list();
                if cat_near {
                    let _ = classes.add_1("hit");
                } else {
                    let _ = classes.remove_1("hit");
                }
            }

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score)));
            }
            if let Some(el) = document.get_element_by_id("status") {
                el.set_text_content(Some(if self.state.paused { "Paused" } else { "" }));
            }
        }

        /// Realize events produced outside the tick (keyboard launches)
        fn realize(&self, events: &[GameEvent]) {
            for event in events {
                if matches!(event, GameEvent::Meow) {
                    self.audio.play(SoundEffect::Meow);
                }
            }
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn viewport_bounds(window: &web_sys::Window) -> Bounds {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as f32;
        Bounds::new(width, height)
    }

    fn read_cat_hitbox(document: &Document) -> Option<CatHitbox> {
        let rect = document.get_element_by_id("cat")?.get_bounding_client_rect();
        Some(CatHitbox {
            center: Vec2::new(
                (rect.left() + rect.width() / 2.0) as f32,
                (rect.top() + rect.height() / 2.0) as f32,
            ),
            width: rect.width() as f32,
            height: rect.height() as f32,
        })
    }

    /// Append a short-lived particle div at the given point
    fn spawn_particle(document: &Document, at: Vec2) {
        let Some(parent) = document.get_element_by_id("particles") else {
            return;
        };
        let Ok(el) = document.create_element("div") else {
            return;
        };
        el.set_class_name("particle");

        let size = js_sys::Math::random() * 8.0 + 4.0;
        if let Some(div) = el.dyn_ref::<HtmlElement>() {
            let style = div.style();
            let _ = style.set_property("left", &format!("{}px", at.x));
            let _ = style.set_property("top", &format!("{}px", at.y));
            let _ = style.set_property("width", &format!("{size:.0}px"));
            let _ = style.set_property("height", &format!("{size:.0}px"));
        }
        let _ = parent.append_child(&el);

        // Remove after the fade-out animation
        let doomed = el.clone();
        let cleanup = Closure::once_into_js(move || {
            doomed.remove();
        });
        let _ = web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(cleanup.unchecked_ref(), 1000);
    }

    fn mouse_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.page_x() as f32, event.page_y() as f32)
    }

    fn touch_pos(event: &TouchEvent) -> Option<Vec2> {
        let touch = event.touches().get(0)?;
        Some(Vec2::new(touch.page_x() as f32, touch.page_y() as f32))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cat & Ball starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let bounds = viewport_bounds(&window);
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::detect();
        let game = Rc::new(RefCell::new(Game::new(seed, bounds, settings)));

        log::info!("Game initialized with seed: {}", seed);

        setup_drag_handlers(&document, game.clone());
        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_parallax(&document);
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Cat & Ball running!");
    }

    fn setup_drag_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(ball) = document.get_element_by_id("ball") else {
            log::warn!("No #ball element - drag disabled");
            return;
        };

        // Grab (mouse)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                let g = &mut *g;
                g.drag = Some(sim::drag_start(&mut g.state, mouse_pos(&event)));
            });
            let _ = ball
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Grab (touch)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&event) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    let g = &mut *g;
                    g.drag = Some(sim::drag_start(&mut g.state, pos));
                }
            });
            let _ = ball
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move / release go on the document so a fast drag can't escape
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let g = &mut *g;
                if let Some(session) = g.drag.as_mut() {
                    sim::drag_move(&mut g.state, session, mouse_pos(&event));
                }
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                let g = &mut *g;
                if let (Some(session), Some(pos)) = (g.drag.as_mut(), touch_pos(&event)) {
                    event.prevent_default();
                    sim::drag_move(&mut g.state, session, pos);
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for name in ["mouseup", "touchend"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.drag.take().is_some() {
                    sim::drag_end(&mut g.state);
                }
            });
            let _ =
                document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let g = &mut *g;
            let events = sim::key_down(&mut g.state, &g.bounds, &event.key());
            g.realize(&events);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, button) in [
            ("btn-left", ControlButton::Left),
            ("btn-right", ControlButton::Right),
            ("btn-jump", ControlButton::Jump),
        ] {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            for name in ["mousedown", "touchstart"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    sim::button_press(&mut g.state, button);
                });
                let _ =
                    el.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Background layers drift against the pointer; cat pupils track it
    fn setup_parallax(document: &Document) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let bounds = viewport_bounds(&window);

            let px = (event.page_x() as f32 / bounds.width - 0.5) * 20.0;
            let py = (event.page_y() as f32 / bounds.height - 0.5) * 20.0;

            if let Ok(layers) = document.query_selector_all(".layer") {
                for i in 0..layers.length() {
                    let Some(el) = layers.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok())
                    else {
                        continue;
                    };
                    let depth = (i + 1) as f32 * 10.0;
                    let _ = el.style().set_property(
                        "transform",
                        &format!("translate({}px, {}px)", -px / depth, -py / depth),
                    );
                }
            }

            if let Ok(pupils) = document.query_selector_all(".pupil") {
                for i in 0..pupils.length() {
                    let Some(el) = pupils.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok())
                    else {
                        continue;
                    };
                    let Some(eye) = el.parent_element() else {
                        continue;
                    };
                    let rect = eye.get_bounding_client_rect();
                    let ex = rect.left() + rect.width() / 2.0;
                    let ey = rect.top() + rect.height() / 2.0;
                    let angle = (event.page_y() as f64 - ey).atan2(event.page_x() as f64 - ex);
                    let max = 8.0;
                    let _ = el.style().set_property(
                        "transform",
                        &format!(
                            "translate({}px, {}px)",
                            angle.cos() * max,
                            angle.sin() * max
                        ),
                    );
                }
            }
        });
        let _ =
            document.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            game.borrow_mut().bounds = viewport_bounds(&window);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
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
    use cat_ball::sim::{self, Bounds, CatHitbox, GameEvent, GameState};
    use glam::Vec2;

    env_logger::init();
    log::info!("Cat & Ball (native) starting...");
    log::info!("No DOM here - running a headless demo; build with trunk for the web version");

    let bounds = Bounds::new(800.0, 600.0);
    let mut state = GameState::new(0xCA7, &bounds);
    let cat = CatHitbox {
        center: Vec2::new(400.0, 520.0),
        width: 120.0,
        height: 120.0,
    };

    let mut wall_hits = 0usize;
    let mut meows = 0usize;
    for _ in 0..600 {
        let out = sim::tick(&mut state, &bounds, &cat);
        for event in &out.events {
            match event {
                GameEvent::WallHit { .. } => wall_hits += 1,
                GameEvent::Meow => meows += 1,
            }
        }
    }

    // Type the secret phrase for good measure
    for key in ["m", "e", "o", "w"] {
        meows += sim::key_down(&mut state, &bounds, key).len();
    }

    log::info!(
        "600 ticks: score {}, {} wall hits, {} meows, ball at ({:.0}, {:.0})",
        state.score,
        wall_hits,
        meows,
        state.ball.pos.x,
        state.ball.pos.y,
    );
    println!("Score after demo run: {}", state.score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
