//! # Runtime Container
//!
//! Configuration for the runtime and the monitors it wires up.

pub mod config;

pub use config::{load_config, ConfigError, RuntimeConfig};
