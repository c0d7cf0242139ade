//! `driftconfig status` — manifest staleness and sync visibility.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use driftconfig_core::{inventory, types::Domain};
use driftconfig_sync::{
    hash_store,
    staleness::{check, format_datetime_age},
    StalenessSignal,
};

/// Arguments for `driftconfig status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Filter to a specific domain.
    #[arg(long)]
    pub domain: Option<String>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let home: PathBuf = dirs::home_dir().context("could not determine home directory")?;

        let mut domains = inventory::list_domains_at(&home)
            .context("failed to load inventory — run `driftconfig init` first")?;
        if let Some(filter) = self.domain.as_ref() {
            domains.retain(|d| d.name.0 == *filter);
        }

        let rows = build_rows(&home, &domains)?;
        if self.json {
            print_json(rows)?;
            return Ok(());
        }

        print_table(rows);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct DomainStatus {
    domain: String,
    signal: StalenessSignal,
    detail: String,
    last_sync_age: String,
    last_sync_at: Option<String>,
    tiers: usize,
}

#[derive(Serialize)]
struct StatusJson {
    domains: Vec<DomainStatusJson>,
    stale: usize,
}

#[derive(Serialize)]
struct DomainStatusJson {
    domain: String,
    status: String,
    detail: String,
    last_sync_age: String,
    last_sync_at: Option<String>,
    tiers: usize,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "domain")]
    domain: String,
    #[tabled(rename = "status")]
    status: String,
    #[tabled(rename = "detail")]
    detail: String,
    #[tabled(rename = "last sync")]
    last_sync: String,
    #[tabled(rename = "tiers")]
    tiers: usize,
}

fn build_rows(home: &Path, domains: &[Domain]) -> Result<Vec<DomainStatus>> {
    let mut rows = Vec::new();
    for domain in domains {
        let signal = check(home, domain)
            .with_context(|| format!("status check failed for '{}'", domain.name))?;
        let (last_sync_at, last_sync_age) = load_last_sync(home, &domain.name.0)
            .with_context(|| format!("failed to load hash store for '{}'", domain.name))?;

        rows.push(DomainStatus {
            domain: domain.name.0.clone(),
            detail: signal_detail(&signal),
            signal,
            last_sync_age,
            last_sync_at,
            tiers: domain.tiers.len(),
        });
    }
    Ok(rows)
}

fn load_last_sync(home: &Path, domain_name: &str) -> Result<(Option<String>, String)> {
    let path = hash_store::store_path_at(home, domain_name);
    if !path.exists() {
        return Ok((None, "never".to_string()));
    }
    let store = hash_store::load_at(home, domain_name)?;
    if store.files.is_empty() {
        return Ok((None, "never".to_string()));
    }
    let iso = Some(store.synced_at.to_rfc3339());
    let age = format_datetime_age(store.synced_at);
    Ok((iso, age))
}

fn print_json(rows: Vec<DomainStatus>) -> Result<()> {
    let stale = rows
        .iter()
        .filter(|r| !matches!(r.signal, StalenessSignal::Current))
        .count();
    let payload = StatusJson {
        domains: rows
            .into_iter()
            .map(|row| DomainStatusJson {
                domain: row.domain,
                status: signal_key(&row.signal).to_string(),
                detail: row.detail,
                last_sync_age: row.last_sync_age,
                last_sync_at: row.last_sync_at,
                tiers: row.tiers,
            })
            .collect(),
        stale,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(rows: Vec<DomainStatus>) {
    if rows.is_empty() {
        println!("No domains stored.");
        return;
    }

    let needs_sync = rows
        .iter()
        .filter(|r| !matches!(r.signal, StalenessSignal::Current))
        .count();

    println!(
        "Driftconfig v{} | {} domains | {} need sync",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        needs_sync,
    );
    println!(
        "Indicators: {} CURRENT  {} STALE  {} MODIFIED  {} NEVER SYNCED",
        signal_indicator(&StalenessSignal::Current),
        signal_indicator(&StalenessSignal::Stale {
            reason: String::new(),
        }),
        signal_indicator(&StalenessSignal::Modified),
        signal_indicator(&StalenessSignal::NeverSynced),
    );

    let table_rows: Vec<StatusTableRow> = rows
        .into_iter()
        .map(|row| StatusTableRow {
            domain: row.domain,
            status: format!(
                "{} {}",
                signal_indicator(&row.signal),
                signal_label(&row.signal)
            ),
            detail: row.detail,
            last_sync: row.last_sync_age,
            tiers: row.tiers,
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if needs_sync > 0 {
        println!("Run 'driftconfig sync --all' to update stale manifests.");
    }
}

fn signal_key(signal: &StalenessSignal) -> &'static str {
    match signal {
        StalenessSignal::NeverSynced => "never_synced",
        StalenessSignal::Current => "current",
        StalenessSignal::Stale { .. } => "stale",
        StalenessSignal::Modified => "modified",
    }
}

fn signal_label(signal: &StalenessSignal) -> &'static str {
    match signal {
        StalenessSignal::NeverSynced => "NEVER SYNCED",
        StalenessSignal::Current => "CURRENT",
        StalenessSignal::Stale { .. } => "STALE",
        StalenessSignal::Modified => "MODIFIED",
    }
}

fn signal_indicator(signal: &StalenessSignal) -> String {
    match signal {
        StalenessSignal::NeverSynced => "■".bright_black().bold().to_string(),
        StalenessSignal::Current => "■".green().bold().to_string(),
        StalenessSignal::Stale { .. } => "■".yellow().bold().to_string(),
        StalenessSignal::Modified => "■".red().bold().to_string(),
    }
}

fn signal_detail(signal: &StalenessSignal) -> String {
    match signal {
        StalenessSignal::NeverSynced => "no hash store entries".to_string(),
        StalenessSignal::Current => "up to date".to_string(),
        StalenessSignal::Stale { reason } => reason.clone(),
        StalenessSignal::Modified => "manifest edited since last sync".to_string(),
    }
}
