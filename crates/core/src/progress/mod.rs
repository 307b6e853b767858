//! Simulated upload progress.
//!
//! The indicator advances on a fixed timer while a request is in flight and
//! is capped below 100%, leaving the final jump to the real completion.

mod simulator;
mod types;

pub use simulator::{ProgressSimulator, ProgressTicker};
pub use types::ProgressState;
