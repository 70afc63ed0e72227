pub mod config;
pub mod logging;

pub mod emitter;
pub mod error;
pub mod payload;
pub mod record;
pub mod submit;

pub use emitter::{ReplaySettings, ReplaySummary};
pub use error::ReplayError;
