//! Canvas Arcade entry point
//!
//! On wasm32 this starts whichever games have a canvas on the page. Natively
//! it plays a short seeded headless round of each game and logs the outcome.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use canvas_arcade::platform::web::{self, GameHandle};

    thread_local! {
        static HANDLES: RefCell<Vec<GameHandle>> = const { RefCell::new(Vec::new()) };
    }

    fn canvas_by_id(id: &str) -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into()
            .ok()
    }

    type Starter = fn(HtmlCanvasElement) -> Result<GameHandle, JsValue>;

    pub fn run() {
        web::init_logging();
        log::info!("Canvas Arcade starting...");

        let games: [(&str, Starter); 2] = [
            ("dodge-canvas", web::start_dodge),
            ("platform-canvas", web::start_platformer),
        ];
        for (id, start) in games {
            let Some(canvas) = canvas_by_id(id) else {
                log::info!("No #{} on this page", id);
                continue;
            };
            match start(canvas) {
                Ok(handle) => HANDLES.with(|h| h.borrow_mut().push(handle)),
                Err(e) => log::error!("Failed to start #{}: {:?}", id, e),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Arcade (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in a browser");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    demo::dodge(seed);
    demo::platformer(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use canvas_arcade::consts::DEFAULT_FIELD_WIDTH;
    use canvas_arcade::render::RecordingSurface;
    use canvas_arcade::{
        DodgeGame, InputEvent, Key, ManualScheduler, PlatformerGame, Session, Settings,
    };

    /// Grab the player and hold still until something hits it
    pub fn dodge(seed: u64) {
        let settings = Settings::load();
        let game = DodgeGame::new(seed, DEFAULT_FIELD_WIDTH, &settings);
        let mut session = Session::new(game, RecordingSurface::new(), ManualScheduler::new());
        session.start();

        let grab = session.game().state.player.body.pos;
        session.dispatch(InputEvent::PointerDown(grab));

        let mut survived = None;
        for _ in 0..120 {
            session.scheduler_mut().advance(1_000);
            if let Some(secs) = session.game().last_run {
                survived = Some(secs);
                break;
            }
        }
        session.stop();

        match survived {
            Some(secs) => log::info!("Dodge (seed {}): hit after {}s", seed, secs),
            None => log::info!("Dodge (seed {}): still alive after 120s", seed),
        }
        log::info!("Dodge drew {} frames", session.surface().frames);
    }

    /// Run right and jump every second, tracking the furthest level reached
    pub fn platformer(seed: u64) {
        let settings = Settings::load();
        let game = PlatformerGame::new(seed, 800.0, &settings);
        let mut session = Session::new(game, RecordingSurface::new(), ManualScheduler::new());
        session.start();

        session.dispatch(InputEvent::KeyDown(Key::Right));
        let mut furthest = 0;
        let mut deaths = 0;
        for _ in 0..60 {
            session.dispatch(InputEvent::KeyDown(Key::Up));
            session.scheduler_mut().advance(500);
            session.dispatch(InputEvent::KeyUp(Key::Up));
            session.scheduler_mut().advance(500);

            let g = session.game();
            furthest = furthest.max(g.state.active_level);
            if g.state.player.dead {
                deaths += 1;
            }
        }
        session.dispatch(InputEvent::FocusLost);
        session.stop();

        log::info!(
            "Platformer (seed {}): furthest level {} of {}, dead at {} checkpoints",
            seed,
            furthest + 1,
            session.game().state.levels.len(),
            deaths
        );
    }
}
