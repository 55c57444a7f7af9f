//! # Outbound Ports
//!
//! `RToken.main()` → `Main.basketHandler()` → `BasketHandler.fullyCollateralized()`.

use shared_types::contracts::{BasketHandlerReader, MainReader, RTokenReader};

/// Chain access required by the collateralization monitor.
pub trait CollateralizationChain: RTokenReader + MainReader + BasketHandlerReader {}

impl<T> CollateralizationChain for T where T: RTokenReader + MainReader + BasketHandlerReader {}
