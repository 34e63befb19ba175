//! Utility modules.

pub mod bootstrap;

pub use bootstrap::init_tracing;
