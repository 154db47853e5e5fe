use gloo_timers::future::TimeoutFuture;
use shared::events::{classify, UiEvent, INTERACTIVE_SELECTOR};
use shared::orchestrator::Sleeper;
use shared::screen::{Region, Screen};
use std::time::Duration;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event};

/// Renders by replacing the inner HTML of the region's element.
#[derive(Clone, Copy, Default)]
pub struct DomScreen;

impl Screen for DomScreen {
    fn render_at(&self, region: Region, html: &str) {
        let node = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.query_selector(region.selector()).ok().flatten());
        match node {
            Some(node) => node.set_inner_html(html),
            None => warn!("No element matches {}", region.selector()),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct GlooSleeper;

impl Sleeper for GlooSleeper {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).await;
    }
}

/// Classify a click by the nearest interactive element around its target.
pub fn event_from_click(event: &Event) -> Option<UiEvent> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    event_from_target(&target)
}

fn event_from_target(target: &Element) -> Option<UiEvent> {
    let element = target.closest(INTERACTIVE_SELECTOR).ok()??;
    classify(
        &element.class_name(),
        &element.id(),
        element.get_attribute("data-id").as_deref(),
    )
}
