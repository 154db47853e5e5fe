use crate::dom::{event_from_click, DomScreen, GlooSleeper};
use leptos::prelude::*;
use shared::api::HttpRaceService;
use shared::config::ServiceConfig;
use shared::events::UiEvent;
use shared::session::RaceSession;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

type BrowserSession = RaceSession<HttpRaceService, DomScreen, GlooSleeper>;

// Thread-local storage for the page session. The session holds non-Send browser
// handles, so view closures look it up here instead of capturing it.
thread_local! {
    static SESSION: RefCell<Option<Rc<BrowserSession>>> = RefCell::new(None);
}

fn current_session() -> Option<Rc<BrowserSession>> {
    SESSION.with(|cell| cell.borrow().clone())
}

fn dispatch(event: UiEvent) {
    let Some(session) = current_session() else {
        warn!("Dropping {:?}: no session yet", event);
        return;
    };
    spawn_local(async move {
        session.handle(event).await;
    });
}

pub fn start_session(config: ServiceConfig) {
    let api = match HttpRaceService::new(&config) {
        Ok(api) => api,
        Err(e) => {
            error!("Problem creating race service client: {:#}", e);
            return;
        }
    };
    info!("Using race service at {}", api.base_url());

    let session = Rc::new(RaceSession::new(api, DomScreen, GlooSleeper, config.timing));
    SESSION.with(|cell| {
        *cell.borrow_mut() = Some(session.clone());
    });
    cancel_on_pagehide();

    spawn_local(async move {
        session.load().await;
    });
}

fn cancel_on_pagehide() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let on_pagehide = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if let Some(session) = current_session() {
            session.cancel();
        }
    }) as Box<dyn FnMut(_)>);

    if window
        .add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())
        .is_err()
    {
        warn!("Could not watch for page teardown");
    }
    on_pagehide.forget();
}

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div
            id="app"
            on:click=move |ev: web_sys::MouseEvent| {
                if let Some(event) = event_from_click(&ev) {
                    if event == UiEvent::SubmitRace {
                        ev.prevent_default();
                    }
                    dispatch(event);
                }
            }
        >
            <header>
                <h1>"Race Day"</h1>
            </header>
            <div id="notice"></div>
            <main id="race">
                <section>
                    <h2>"Select a Track"</h2>
                    <div id="tracks">
                        <h4>"Loading Tracks..."</h4>
                    </div>
                </section>
                <section>
                    <h2>"Select a Racer"</h2>
                    <div id="racers">
                        <h4>"Loading Racers..."</h4>
                    </div>
                </section>
                <form>
                    <button id="submit-create-race" type="submit">
                        "Start Race"
                    </button>
                </form>
            </main>
        </div>
    }
}
