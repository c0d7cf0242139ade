//! # driftconfig-sync
//!
//! Hash-gated atomic manifest writer and sync orchestration.
//!
//! Call [`sync_domain`] to render and write the manifest for a single stored
//! domain, or [`sync_all`] to process every stored domain. [`diff_domain`]
//! previews what a sync would change; [`staleness::check`] classifies how a
//! written manifest relates to its inventory.

pub mod diff;
pub mod error;
pub mod hash_store;
pub mod pipeline;
pub mod staleness;
pub mod writer;

pub use diff::{diff_domain, DomainDiff};
pub use error::SyncError;
pub use staleness::StalenessSignal;
pub use writer::{sync_all, sync_domain, SyncDomainResult, WriteResult};
