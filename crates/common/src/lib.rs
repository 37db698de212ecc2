//! Shared building blocks for the registro workspace: response types,
//! environment helpers and logging setup.

pub mod types;
pub mod utils;
pub mod env;
