//! # Monitor Runtime Library
//!
//! The host side of Reserve-Watch: configuration, the JSON-RPC adapter, the
//! monitor registry and the block driver. The `main.rs` binary wires them
//! together.
//!
//! ## Structure
//!
//! - `container/` - runtime and monitor configuration
//! - `adapters/` - JSON-RPC chain adapter and finding sinks
//! - `registry/` - enabled monitors and sequential dispatch
//! - `driver` - head polling loop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;
pub mod driver;
pub mod registry;

pub use adapters::{connect, FindingSink, HttpProvider, JsonLinesSink, JsonRpcChain, MemorySink};
pub use container::{load_config, ConfigError, RuntimeConfig};
pub use driver::{BlockDriver, BlockSource};
pub use registry::{MonitorChain, MonitorRegistry};
