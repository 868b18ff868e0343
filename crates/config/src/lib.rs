//! Configuration types for the batch tooling.

pub mod config;

pub use config::*;
