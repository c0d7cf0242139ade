//! Driftconfig core library — tier domain types, inventory persistence, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs
//! - [`error`] — [`InventoryError`]
//! - [`inventory`] — load / save / init / add tier
//!
//! The manifest generator itself lives in `driftconfig-renderer`; this crate
//! only owns the records it consumes.

pub mod error;
pub mod inventory;
pub mod types;

pub use error::InventoryError;
pub use types::{Domain, DomainName, Tier, TierName, TierState};
