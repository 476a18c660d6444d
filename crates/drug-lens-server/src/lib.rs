//! HTTP surface for Drug Lens.
//!
//! Two routes carry the domain: `POST /ilac-sor` answers a question about a
//! named drug, `POST /fotograf-analiz` identifies a drug from a package
//! photo. `GET /health` reports liveness and whether a model key is loaded.

pub mod api;
pub mod config;

pub use api::{build_router, AppState};
pub use config::ServerConfig;
