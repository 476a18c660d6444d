//! Route handlers.

pub mod ask;
pub mod health;
pub mod photo;
