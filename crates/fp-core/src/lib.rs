//! fp-core: stable foundation for the FlowPywr map pipeline.
//!
//! Contains:
//! - geo (latitude/longitude pairs, aggregate center, Web-Mercator projection)
//! - error (shared error types)

pub mod error;
pub mod geo;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use geo::*;
