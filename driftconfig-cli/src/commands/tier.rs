//! `driftconfig tier list|info|add`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use driftconfig_core::{
    inventory,
    types::{Tier, TierName, TierState},
};

use super::super::TierStateArg;
use super::resolve_domain;

/// Manage tiers within a stored domain.
#[derive(Subcommand, Debug)]
pub enum TierCommand {
    /// List tiers in a domain.
    List(ListArgs),

    /// Show the full record for one tier.
    Info(InfoArgs),

    /// Add a new tier to a domain.
    Add(AddArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Domain to list. If omitted and only one domain is stored, it is used.
    #[arg(long, short = 'd')]
    pub domain: Option<String>,
}

#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Tier name (e.g. "DEVNORTH").
    pub name: String,

    /// Domain holding the tier.
    #[arg(long, short = 'd')]
    pub domain: Option<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Tier name (e.g. "DEVNORTH", "LIVE").
    pub name: String,

    /// Domain to add the tier under.
    #[arg(long, short = 'd')]
    pub domain: Option<String>,

    /// Region the function is deployed into.
    #[arg(long)]
    pub aws_region: Option<String>,

    /// Location of the source-of-truth config data (e.g. s3://bucket/path).
    #[arg(long)]
    pub s3_origin_url: Option<String>,

    /// Region of the config-origin bucket.
    #[arg(long)]
    pub s3_bucket_region: Option<String>,

    /// Name of the config-origin bucket.
    #[arg(long)]
    pub bucket_name: Option<String>,

    /// Organization owning the tier.
    #[arg(long = "organization", short = 'o')]
    pub organization_name: Option<String>,

    /// VPC subnet id. Repeat for multiple subnets.
    #[arg(long = "subnet")]
    pub subnets: Vec<String>,

    /// VPC security group id. Repeat for multiple groups.
    #[arg(long = "security-group")]
    pub security_groups: Vec<String>,

    /// Flag the tier as live.
    #[arg(long)]
    pub live: bool,

    /// Lifecycle state: active | initializing | retired. Defaults to active.
    #[arg(long, value_name = "STATE")]
    pub state: Option<TierStateArg>,
}

pub fn run(cmd: TierCommand) -> Result<()> {
    match cmd {
        TierCommand::List(args) => list(args),
        TierCommand::Info(args) => info(args),
        TierCommand::Add(args) => add(args),
    }
}

#[derive(Tabled)]
struct TierTableRow {
    #[tabled(rename = "tier")]
    tier: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "live")]
    live: String,
    #[tabled(rename = "aws region")]
    aws_region: String,
}

fn list(args: ListArgs) -> Result<()> {
    let name = resolve_domain(args.domain)?;
    let domain = inventory::load_domain(&name)
        .with_context(|| format!("failed to load domain '{name}'"))?;

    if domain.tiers.is_empty() {
        println!("No tiers in '{name}'.");
        println!("Run: driftconfig tier add <name>");
        return Ok(());
    }

    println!("{}", format!("Tiers in '{name}':").bold());
    let rows: Vec<TierTableRow> = domain
        .tiers
        .iter()
        .map(|t| TierTableRow {
            tier: t.tier_name.0.clone(),
            state: state_label(t.state),
            live: if t.is_live { "yes".to_string() } else { "no".to_string() },
            aws_region: t.aws_region.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    Ok(())
}

fn state_label(state: TierState) -> String {
    match state {
        TierState::Active => state.to_string().green().to_string(),
        TierState::Initializing => state.to_string().yellow().to_string(),
        TierState::Retired => state.to_string().bright_black().to_string(),
    }
}

fn info(args: InfoArgs) -> Result<()> {
    let name = resolve_domain(args.domain)?;
    let domain = inventory::load_domain(&name)
        .with_context(|| format!("failed to load domain '{name}'"))?;

    let wanted = TierName::from(args.name.clone());
    let Some(tier) = domain.tiers.iter().find(|t| t.tier_name == wanted) else {
        return Err(anyhow::anyhow!(
            "no tier named '{}' in domain '{}'",
            args.name,
            name
        ));
    };

    println!("{}", format!("Tier {}:", tier.tier_name).bold());
    println!(
        "{}",
        serde_json::to_string_pretty(tier).context("failed to serialize tier record")?
    );
    Ok(())
}

fn add(args: AddArgs) -> Result<()> {
    let name = resolve_domain(args.domain)?;

    let tier = Tier {
        tier_name: TierName::from(args.name.clone()),
        aws_region: args.aws_region,
        s3_origin_url: args.s3_origin_url,
        s3_bucket_region: args.s3_bucket_region,
        bucket_name: args.bucket_name,
        organization_name: args.organization_name,
        subnets: args.subnets,
        security_groups: args.security_groups,
        is_live: args.live,
        state: args.state.unwrap_or_default().into(),
    };

    inventory::add_tier(&name, tier).with_context(|| {
        format!("failed to add tier '{}' to domain '{}'", args.name, name)
    })?;

    println!("✓ Added tier '{}' to domain '{}'", args.name, name);
    println!("Run `driftconfig sync {name}` to regenerate the manifest.");
    Ok(())
}
