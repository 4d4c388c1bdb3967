//! Core types and errors for jetprep.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Direction, FourMomentum};

/// Version of the jetprep workspace
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
