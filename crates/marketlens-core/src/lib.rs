pub mod analysis;
pub mod classify;
pub mod comparison;
pub mod config;
pub mod envelope;
pub mod error;
pub mod history;
pub mod platform;
pub mod prompt;
pub mod text;

// Re-export common error type
pub use error::{MarketLensError, Result};
