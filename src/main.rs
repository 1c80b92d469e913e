//! Blob Clicker entry point
//!
//! Handles platform-specific initialization and wires the browser UI to the
//! progression engine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, MouseEvent};

    use blob_clicker::catalog::UpgradeKind;
    use blob_clicker::consts::TICK_INTERVAL_SECS;
    use blob_clicker::game::{ClickOutcome, GameStore, TickOutcome};
    use blob_clicker::persistence;

    /// Session instance holding the store and its scheduled timers
    struct Game {
        store: GameStore,
        /// Pending combo decay timeout handle
        decay_timeout: Option<i32>,
        /// Persistent decay callback, rescheduled on every action
        decay_cb: Option<Closure<dyn FnMut()>>,
        /// 1 Hz passive income interval handle
        tick_interval: Option<i32>,
    }

    impl Game {
        fn new(store: GameStore) -> Self {
            Self {
                store,
                decay_timeout: None,
                decay_cb: None,
                tick_interval: None,
            }
        }

        /// Cancel timers and flush a final save (session teardown)
        fn teardown(&mut self) {
            let window = web_sys::window().expect("no window");
            if let Some(handle) = self.decay_timeout.take() {
                window.clear_timeout_with_handle(handle);
            }
            if let Some(handle) = self.tick_interval.take() {
                window.clear_interval_with_handle(handle);
            }
            persistence::save(self.store.state());
        }

        /// Replace any pending decay fire with one for the current window.
        /// Stale fires are inert in the store either way; this just keeps a
        /// single timer alive.
        fn reschedule_decay(&mut self) {
            let window = web_sys::window().expect("no window");
            if let Some(handle) = self.decay_timeout.take() {
                window.clear_timeout_with_handle(handle);
            }
            let Some(deadline) = self.store.combo_deadline() else {
                return;
            };
            let Some(cb) = self.decay_cb.as_ref() else {
                return;
            };
            let delay = (deadline - js_sys::Date::now()).max(0.0) as i32;
            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay,
            ) {
                Ok(handle) => self.decay_timeout = Some(handle),
                Err(_) => log::warn!("Failed to schedule combo decay"),
            }
        }
    }

    /// Random display color for an action, one of 16^6 hex values
    fn random_color() -> String {
        const LETTERS: &[u8] = b"0123456789ABCDEF";
        let mut color = String::with_capacity(7);
        color.push('#');
        for _ in 0..6 {
            let index = (js_sys::Math::random() * 16.0) as usize % 16;
            color.push(LETTERS[index] as char);
        }
        color
    }

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    /// Write one HUD value by container id
    fn set_hud_value(document: &Document, id: &str, text: &str) {
        if let Some(el) = document
            .query_selector(&format!("#{id} .hud-value"))
            .ok()
            .flatten()
        {
            el.set_text_content(Some(text));
        }
    }

    /// Update HUD elements in the DOM from the current snapshot
    fn update_hud(store: &GameStore) {
        let document = document();
        let state = store.state();

        set_hud_value(&document, "hud-points", &format!("{}", state.points.floor()));
        set_hud_value(&document, "hud-level", &state.level.to_string());
        set_hud_value(
            &document,
            "hud-clicks",
            &state.achievements.total_clicks.to_string(),
        );

        // Experience bar fill
        if let Some(el) = document.get_element_by_id("exp-fill") {
            let pct = (state.experience / state.experience_to_next * 100.0).min(100.0);
            let _ = el.set_attribute("style", &format!("width: {pct:.1}%"));
        }

        // Combo counter (only shown during a streak)
        if let Some(el) = document.get_element_by_id("hud-combo") {
            if state.combo > 1 {
                let _ = el.set_attribute("class", "hud-item");
                set_hud_value(&document, "hud-combo", &format!("x{}", state.combo));
            } else {
                let _ = el.set_attribute("class", "hud-item hidden");
            }
        }

        // Shop: per-upgrade level, cost, and affordability
        for kind in UpgradeKind::ALL {
            let id = format!("upgrade-{}", kind.as_str());
            let Some(button) = document.get_element_by_id(&id) else {
                continue;
            };
            let cost = store.cost_of(kind);
            let affordable = state.points >= cost;
            let _ = button.set_attribute(
                "class",
                if affordable {
                    "upgrade-item"
                } else {
                    "upgrade-item disabled"
                },
            );
            if let Some(el) = document
                .query_selector(&format!("#{id} .upgrade-cost"))
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&format!("{cost}")));
            }
            if let Some(el) = document
                .query_selector(&format!("#{id} .upgrade-level"))
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&format!(
                    "Level {}",
                    state.upgrades.level(kind)
                )));
            }
        }
    }

    /// Show a one-line announcement (milestones, achievements)
    fn announce(text: &str) {
        let document = document();
        if let Some(el) = document.get_element_by_id("announcement") {
            el.set_text_content(Some(text));
            let _ = el.set_attribute("class", "announcement pop");
        }
        log::info!("{text}");
    }

    /// Pick the loudest cue from a click outcome
    fn announce_click(outcome: &ClickOutcome) {
        for milestone in &outcome.milestones {
            announce(&milestone.describe());
        }
        if outcome.mega_hit {
            announce(&format!("MEGA HIT! +{:.0}", outcome.points_gained));
        } else if outcome.critical {
            announce(&format!("Critical! +{:.0}", outcome.points_gained));
        }
        if outcome.levels_gained > 0 {
            announce("Level up!");
        }
    }

    fn announce_tick(outcome: &TickOutcome) {
        for milestone in &outcome.milestones {
            announce(&milestone.describe());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Blob Clicker starting...");

        let document = document();

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        // Hydrate from a verified save, or start fresh
        let seed = js_sys::Date::now() as u64;
        let store = match persistence::load() {
            Some(state) => GameStore::with_state(state, seed),
            None => GameStore::new(seed),
        };
        let game = Rc::new(RefCell::new(Game::new(store)));

        setup_decay_callback(game.clone());
        setup_click_handler(game.clone());
        setup_shop_buttons(game.clone());
        setup_tick_interval(game.clone());
        setup_new_game_button(game.clone());
        setup_teardown(game.clone());

        update_hud(&game.borrow().store);

        log::info!("Blob Clicker running!");
    }

    fn setup_decay_callback(game: Rc<RefCell<Game>>) {
        let cb_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = cb_game.borrow_mut();
            g.decay_timeout = None;
            if g.store.expire_combo(js_sys::Date::now()) {
                log::debug!("Combo expired");
                persistence::save(g.store.state());
                update_hud(&g.store);
            }
        });
        game.borrow_mut().decay_cb = Some(closure);
    }

    fn setup_click_handler(game: Rc<RefCell<Game>>) {
        let document = document();
        let target = document.get_element_by_id("blob").expect("no blob element");

        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            let color = random_color();
            let position = Some((event.client_x() as f32, event.client_y() as f32));
            let outcome = g.store.click(js_sys::Date::now(), Some(&color), position);
            g.reschedule_decay();
            persistence::save(g.store.state());
            announce_click(&outcome);
            update_hud(&g.store);
        });
        let _ = target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_shop_buttons(game: Rc<RefCell<Game>>) {
        let document = document();
        for kind in UpgradeKind::ALL {
            let id = format!("upgrade-{}", kind.as_str());
            let Some(button) = document.get_element_by_id(&id) else {
                log::warn!("Shop button #{id} missing");
                continue;
            };

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                match g.store.purchase(kind) {
                    Ok(receipt) => {
                        log::info!(
                            "Purchased {} level {} for {}",
                            kind.as_str(),
                            receipt.new_level,
                            receipt.cost
                        );
                        if receipt.first_of_kind {
                            announce(&format!("New power unlocked: {}", kind.as_str()));
                        }
                        if receipt.all_at_ten {
                            announce("All powers at level 10!");
                        }
                        persistence::save(g.store.state());
                        update_hud(&g.store);
                    }
                    Err(e) => log::debug!("Purchase of {} rejected: {e}", kind.as_str()),
                }
            });
            let _ =
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_tick_interval(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let cb_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = cb_game.borrow_mut();
            let outcome = g.store.tick(TICK_INTERVAL_SECS);
            if outcome.points_gained > 0.0 {
                persistence::save(g.store.state());
                announce_tick(&outcome);
                update_hud(&g.store);
            }
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            (TICK_INTERVAL_SECS * 1000.0) as i32,
        ) {
            Ok(handle) => game.borrow_mut().tick_interval = Some(handle),
            Err(_) => log::error!("Failed to start tick interval"),
        }
        closure.forget();
    }

    fn setup_new_game_button(game: Rc<RefCell<Game>>) {
        let document = document();
        let Some(button) = document.get_element_by_id("new-game") else {
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            persistence::clear();
            let window = web_sys::window().expect("no window");
            if let Some(handle) = g.decay_timeout.take() {
                window.clear_timeout_with_handle(handle);
            }
            g.store = GameStore::new(js_sys::Date::now() as u64);
            log::info!("New game started");
            update_hud(&g.store);
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().teardown();
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blob Clicker (native) starting...");
    log::info!("Persistence requires LocalStorage - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Exercise the engine end to end without a browser
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use blob_clicker::catalog::UpgradeKind;
    use blob_clicker::game::GameStore;

    let mut store = GameStore::new(1234);

    // Click until ClickPower is affordable, spaced inside the combo window
    let mut now_ms = 0.0;
    while store.state().points < store.cost_of(UpgradeKind::ClickPower) {
        let outcome = store.click(now_ms, Some("#4169e1"), None);
        log::info!(
            "click -> +{:.1} points (combo x{})",
            outcome.points_gained,
            outcome.combo
        );
        now_ms += 500.0;
    }

    store
        .purchase(UpgradeKind::ClickPower)
        .expect("demo purchase should be affordable");
    assert_eq!(store.state().points_per_click, 2.0);

    // Let the combo lapse, then show passive income
    store.expire_combo(now_ms + 10_000.0);
    let outcome = store.tick(1.0);
    assert_eq!(outcome.points_gained, 0.0);

    println!(
        "demo complete: {} clicks, {:.1} points, click power {}",
        store.state().achievements.total_clicks,
        store.state().points,
        store.state().points_per_click
    );
}
