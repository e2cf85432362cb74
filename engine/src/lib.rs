// Engine library root
// Loads the procurement sheet and generates the negotiation reports from it.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod services;
pub mod transforms;

pub use error::EngineError;

#[cfg(test)]
pub(crate) mod test_support;
