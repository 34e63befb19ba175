//! Step definition modules for Cucumber feature tests.

pub mod append;
pub mod revision;
