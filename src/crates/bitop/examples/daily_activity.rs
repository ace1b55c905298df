//! Track daily activity as bitsets and query it with the bitset algebra.
//!
//! ```text
//! cargo run --example daily_activity -- --day1 10,20,30 --day2 20,30,40 --candidates 20,40,50
//! ```

use anyhow::{Context, Result};
use bitop::{BitOperations, BitopClient, BitopConfig};
use bitop_store::{BitStore, MemoryStore};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "daily_activity")]
#[command(about = "Compose per-day activity bitsets")]
struct Args {
    /// Optional YAML config file (namespace, batch_probes)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ids active on day 1
    #[arg(long, value_delimiter = ',', default_value = "10,20,30")]
    day1: Vec<u64>,

    /// Ids active on day 2
    #[arg(long, value_delimiter = ',', default_value = "20,30,40")]
    day2: Vec<u64>,

    /// Candidate ids checked against day 1
    #[arg(long, value_delimiter = ',', default_value = "20,40,50")]
    candidates: Vec<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,bitop=debug")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BitopConfig::from_yaml_file(path)
            .with_context(|| format!("Loading config from {}", path.display()))?,
        None => BitopConfig::new("ev"),
    };

    let client = BitopClient::new(MemoryStore::new(), config)?;

    let day1 = client.scoped("day1");
    let day2 = client.scoped("day2");
    client.store().set_bits(day1.key(), &args.day1, true)?;
    client.store().set_bits(day2.key(), &args.day2, true)?;

    let both = (&day1 & &day2)?;
    let either = (&day1 + &day2)?;
    let only_day1 = (&day1 - &day2)?;
    let selected = day1.intersect_ids(args.candidates.clone())?;
    let unseen = day1.difference_ids(args.candidates.clone())?;

    info!("{} -> {:?}", both, client.store().ones(both.key()));
    info!("{} -> {:?}", either, client.store().ones(either.key()));
    info!("{} -> {:?}", only_day1, client.store().ones(only_day1.key()));
    info!("{} -> {:?}", selected.key(), selected.ids());
    info!("{} -> {:?}", unseen.key(), unseen.ids());

    Ok(())
}
