//! Domain types for the driftconfig tier inventory.
//!
//! Tier records are externally supplied and may be sparse: every deployment
//! field is optional at this layer. Required-field enforcement happens when a
//! manifest is generated, not when a record is stored.
//! All types are serializable/deserializable via serde + serde_yaml.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a config domain (the owner of a tier set).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DomainName(pub String);

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for DomainName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DomainName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for a deployment tier (e.g. `DEVNORTH`, `LIVE`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TierName(pub String);

impl fmt::Display for TierName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TierName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TierName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle state of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TierState {
    #[default]
    Active,
    Initializing,
    Retired,
}

impl fmt::Display for TierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TierState::Active => write!(f, "active"),
            TierState::Initializing => write!(f, "initializing"),
            TierState::Retired => write!(f, "retired"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A single deployment tier within a domain.
///
/// `subnets` and `security_groups` keep their input order; empty lists are
/// valid and stay empty in the generated manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub tier_name: TierName,
    /// Region the function is deployed into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    /// Location of the source-of-truth config data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_origin_url: Option<String>,
    /// Region of the config-origin bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_bucket_region: Option<String>,
    /// Origin bucket name; only consulted when it shares the function's region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub subnets: Vec<String>,
    #[serde(default)]
    pub security_groups: Vec<String>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub state: TierState,
}

impl Tier {
    /// A tier with just a name; every deployment field unset.
    pub fn named(name: impl Into<TierName>) -> Self {
        Tier {
            tier_name: name.into(),
            aws_region: None,
            s3_origin_url: None,
            s3_bucket_region: None,
            bucket_name: None,
            organization_name: None,
            subnets: Vec::new(),
            security_groups: Vec::new(),
            is_live: false,
            state: TierState::default(),
        }
    }
}

/// Root of a stored domain inventory: the ordered tier set plus the directory
/// the generated manifest is written into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub name: DomainName,
    /// Absolute path to the directory receiving `zappa_settings.yml`.
    pub manifest_path: PathBuf,
    #[serde(default)]
    pub tiers: Vec<Tier>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
