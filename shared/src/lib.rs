pub mod models;
pub mod utils;

// Data models and value helpers used by the engine crate.
// Nothing in here performs I/O.
