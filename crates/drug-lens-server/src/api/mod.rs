//! Router, handlers and the `{hata}` error envelope.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::build_router;
pub use types::AppState;
