//! Tier context — serializable rendering payload built from a [`Tier`].
//!
//! Data shaping and output formatting are kept apart: everything derived
//! (trigger variant, joined network lists, the `Name` tag, the deployment
//! bucket) is computed here, so the template only substitutes values.

use serde::{Deserialize, Serialize};

use driftconfig_core::types::Tier;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Manifest constants
// ---------------------------------------------------------------------------

/// `project_name` emitted in every tier block.
pub const PROJECT_NAME: &str = "driftconfig";
/// `service-name` tag value.
pub const SERVICE_NAME: &str = "driftconfig";
/// `service-type` tag value.
pub const SERVICE_TYPE: &str = "lambda";
/// Lambda log level for every tier.
pub const LOG_LEVEL: &str = "WARNING";
/// Handler invoked by the storage-event trigger (origin bucket in-region).
pub const OBJECT_CREATED_HANDLER: &str = "driftconfig.cache.on_object_created";
/// Handler invoked on a schedule when the origin bucket is in another region.
pub const POLL_HANDLER: &str = "driftconfig.cache.poll_origin";
/// Cadence of the cross-region polling trigger.
pub const POLL_EXPRESSION: &str = "rate(1 minute)";
/// Prefix of the derived deployment bucket name.
pub const DEPLOY_BUCKET_PREFIX: &str = "zappa-driftconfig";

// ---------------------------------------------------------------------------
// Context structs
// ---------------------------------------------------------------------------

/// The event trigger for one tier block.
///
/// Exactly one variant per tier, selected by comparing the function's region
/// with the origin bucket's region. S3 can only notify a function in its own
/// region; everything else falls back to polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerCtx {
    /// Object-created events on the origin bucket invoke the cache refresh.
    ObjectCreated { function: String, arn: String },
    /// Scheduled poll of the origin.
    Poll { function: String, expression: String },
}

/// Tags emitted in a tier block. `name` is the derived `Name` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsCtx {
    pub tier: String,
    pub service_name: String,
    pub service_type: String,
    pub name: String,
}

/// Rendering payload for one tier block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierContext {
    pub tier_name: String,
    pub project_name: String,
    pub aws_region: String,
    pub s3_origin_url: String,
    pub tags: TagsCtx,
    /// `SubnetIds` entries, pre-joined with `", "` in input order.
    pub subnet_ids: String,
    /// `SecurityGroupIds` entries, pre-joined with `", "` in input order.
    pub security_group_ids: String,
    pub trigger: TriggerCtx,
    pub s3_bucket: String,
    pub log_level: String,
}

impl TierContext {
    /// Build a [`TierContext`] from a [`Tier`].
    ///
    /// `tier_index` is the record's position in the input sequence and is
    /// reported in [`RenderError::MissingField`]. Empty `subnets` and
    /// `security_groups` are valid input and stay empty.
    pub fn from_tier(tier: &Tier, tier_index: usize) -> Result<Self, RenderError> {
        let tier_name = tier.tier_name.0.clone();
        let aws_region = require(tier.aws_region.as_deref(), "aws_region", tier_index)?;
        let s3_origin_url = require(tier.s3_origin_url.as_deref(), "s3_origin_url", tier_index)?;
        let s3_bucket_region = require(
            tier.s3_bucket_region.as_deref(),
            "s3_bucket_region",
            tier_index,
        )?;
        let organization_name = require(
            tier.organization_name.as_deref(),
            "organization_name",
            tier_index,
        )?;

        let trigger = if aws_region == s3_bucket_region {
            // bucket_name is only consulted on this branch; a cross-region
            // tier without one is a valid record.
            let bucket_name = require(tier.bucket_name.as_deref(), "bucket_name", tier_index)?;
            TriggerCtx::ObjectCreated {
                function: OBJECT_CREATED_HANDLER.to_string(),
                arn: format!("arn:aws:s3:::{bucket_name}"),
            }
        } else {
            TriggerCtx::Poll {
                function: POLL_HANDLER.to_string(),
                expression: POLL_EXPRESSION.to_string(),
            }
        };

        Ok(TierContext {
            project_name: PROJECT_NAME.to_string(),
            aws_region: aws_region.to_string(),
            s3_origin_url: s3_origin_url.to_string(),
            tags: TagsCtx {
                tier: tier_name.clone(),
                service_name: SERVICE_NAME.to_string(),
                service_type: SERVICE_TYPE.to_string(),
                name: format!("{tier_name}-drift-config"),
            },
            subnet_ids: tier.subnets.join(", "),
            security_group_ids: tier.security_groups.join(", "),
            trigger,
            s3_bucket: format!(
                "{DEPLOY_BUCKET_PREFIX}-{organization_name}-{}",
                tier_name.to_lowercase()
            ),
            log_level: LOG_LEVEL.to_string(),
            tier_name,
        })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}

fn require<'a>(
    value: Option<&'a str>,
    field: &'static str,
    tier_index: usize,
) -> Result<&'a str, RenderError> {
    value.ok_or(RenderError::MissingField { field, tier_index })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
