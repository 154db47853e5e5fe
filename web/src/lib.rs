mod app;
mod dom;

use app::App;
use shared::config::ServiceConfig;
use tracing_wasm::WASMLayerConfigBuilder;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    leptos::mount::mount_to_body(App);
    app::start_session(service_config());
}

/// Route `tracing` records to the browser console at their own level, so
/// `error!` lands in `console.error`. Capped at INFO.
fn init_logging() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    tracing_wasm::set_as_global_default_with_config(
        WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::INFO)
            .build(),
    );
}

/// `RACE_SERVICE_URL` at build time overrides the default service origin.
fn service_config() -> ServiceConfig {
    option_env!("RACE_SERVICE_URL")
        .map(ServiceConfig::new)
        .unwrap_or_default()
}
