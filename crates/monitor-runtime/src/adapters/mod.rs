//! # Adapters
//!
//! Outbound adapters connecting the monitors to a real node.
//!
//! - `rpc` - alloy provider construction and wire conversions
//! - `contracts` - capability traits implemented over `rpc`
//! - `sink` - where findings go

pub mod contracts;
pub mod rpc;
pub mod sink;

pub use contracts::JsonRpcChain;
pub use rpc::{connect, HttpProvider};
pub use sink::{FindingSink, JsonLinesSink, MemorySink};
