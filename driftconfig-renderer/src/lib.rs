//! # driftconfig-renderer
//!
//! Tera-based engine that renders the per-tier deployment manifest
//! (`zappa_settings.yml`) from driftconfig tier records.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use driftconfig_core::types::Tier;
//! use driftconfig_renderer::Renderer;
//!
//! fn generate(tiers: &[Tier]) {
//!     if let Ok(renderer) = Renderer::new() {
//!         match renderer.render_manifest(tiers) {
//!             Ok(manifest) => println!("{} bytes", manifest.len()),
//!             Err(e) => eprintln!("{e}"),
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use context::{TierContext, TriggerCtx};
pub use engine::Renderer;
pub use error::RenderError;
