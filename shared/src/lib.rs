pub mod api;
pub mod config;
pub mod events;
pub mod fsm;
pub mod orchestrator;
pub mod protocol;
pub mod render;
pub mod screen;
pub mod session;
pub mod state;
