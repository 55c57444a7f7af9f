//! # Ports Module
//!
//! The on-chain capabilities the pipeline reads through.

pub mod outbound;

pub use outbound::*;
