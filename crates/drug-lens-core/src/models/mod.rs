//! Domain models for the drug-lens system.

mod record;
mod resolution;

pub use record::*;
pub use resolution::*;
