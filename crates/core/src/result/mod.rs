//! The dataset returned by a successful cycle.
//!
//! A [`ResultResource`] holds the response body until it is saved once or
//! superseded by the next cycle. Release is idempotent.

mod error;
mod resource;

pub use error::ResultError;
pub use resource::ResultResource;
