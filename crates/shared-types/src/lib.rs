//! # Shared Types Crate
//!
//! Everything the monitors and the runtime agree on.
//!
//! | Module | Contents |
//! |--------|----------|
//! | `primitives` | alloy `Address`, `B256`, `U256`, `Log` and EIP-55 formatting |
//! | `abi` | `sol!` interfaces of every contract the monitors call |
//! | `events` | `BlockEvent`, `TransactionEvent`, `LogEntry`, `BlockRange` |
//! | `contract_events` | `sol!` events, `EventLog` and the `ReserveEvent` sum type |
//! | `contracts` | One capability trait per contract role |
//! | `finding` | The `Finding` alert record |
//! | `handler` | `BlockHandler` / `TransactionHandler` invocation contract |
//! | `errors` | `ChainError`, `MonitorError` |
//! | `in_memory` | `InMemoryChain`, a counted fake of every capability |
//! | `mainnet` | Addresses of the RTokens monitored by default |
//!
//! ## Design Principles
//!
//! - **Capabilities, not providers**: monitors are generic over the exact set
//!   of contract roles they read. No monitor sees a raw RPC client.
//! - **Typed logs**: raw logs are decoded once into per-event structs.

pub mod abi;
pub mod contract_events;
pub mod contracts;
pub mod errors;
pub mod events;
pub mod finding;
pub mod handler;
pub mod in_memory;
pub mod mainnet;
pub mod primitives;

pub use contract_events::{EventLog, ReserveEvent};
pub use errors::*;
pub use events::{BlockEvent, BlockRange, LogEntry, TransactionEvent};
pub use finding::{Finding, FindingSeverity, FindingType};
pub use handler::{BlockHandler, TransactionHandler};
pub use primitives::{address, format_address, Address, TxHash, B256, U256};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
