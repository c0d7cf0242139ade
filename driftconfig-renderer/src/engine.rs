//! Tera rendering engine — [`Renderer`] for the tier manifest.
//!
//! One embedded template renders a single tier block; the per-tier loop and
//! the blank-line join live here rather than in the template, so the
//! one-block-per-tier invariant holds structurally and a bad record aborts
//! before any output exists.

use std::path::Path;

use tera::Tera;

use driftconfig_core::types::Tier;

use crate::context::TierContext;
use crate::error::RenderError;

// Embedded template — baked into the binary at compile time via include_str!
const TIER_BLOCK_TPL_NAME: &str = "manifest/tier_block.yml.tera";
const TIER_BLOCK_TPL: &str = include_str!("templates/tier_block.yml.tera");

/// Tera-based renderer for the tier manifest.
///
/// Uses the embedded block template unless constructed with
/// [`Renderer::from_template_file`]. Create once and reuse.
#[derive(Debug)]
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Construct a new [`Renderer`] with the embedded block template.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template(TIER_BLOCK_TPL)
    }

    /// Construct a [`Renderer`] from a caller-supplied block template file.
    pub fn from_template_file(path: &Path) -> Result<Self, RenderError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RenderError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::with_template(&contents)
    }

    fn with_template(template: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TIER_BLOCK_TPL_NAME, template)?;
        Ok(Renderer { tera })
    }

    /// Render a single tier block from an already-shaped context.
    pub fn render_tier(&self, ctx: &TierContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(TIER_BLOCK_TPL_NAME, &tera_ctx)?)
    }

    /// Render the whole manifest: one block per tier, input order, blank-line
    /// separated.
    ///
    /// Every record is validated up front; a missing required field fails the
    /// whole document and no partial output is returned. An empty tier
    /// sequence renders an empty document.
    pub fn render_manifest(&self, tiers: &[Tier]) -> Result<String, RenderError> {
        let mut contexts = Vec::with_capacity(tiers.len());
        for (tier_index, tier) in tiers.iter().enumerate() {
            contexts.push(TierContext::from_tier(tier, tier_index)?);
        }

        let mut blocks = Vec::with_capacity(contexts.len());
        for ctx in &contexts {
            blocks.push(self.render_tier(ctx)?);
        }
        Ok(blocks.join("\n"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
