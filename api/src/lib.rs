//! # Gohub API
//!
//! HTTP surface for signup checks, image captchas and SMS verification
//! codes. Handlers live under `routes`; wiring from configuration lives in
//! `bootstrap`.

pub mod app;
pub mod bootstrap;
pub mod dto;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod validation;

pub use app::app_data;
pub use state::AppState;
