//! chainmap-demo
//!
//! Small demonstrations of `ChainMap` iteration and `heap_sort`.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use chainmap::{heap_sort, ChainMap, DEFAULT_CAPACITY};
use clap::{Parser, Subcommand};
use tracing::{debug, info};

/// Pairs inserted by the map demo when none are given.
const DEFAULT_PAIRS: [&str; 3] = ["one=1", "two=2", "three=3"];

/// Values sorted by the sort demo when none are given.
const DEFAULT_VALUES: [i64; 6] = [12, 11, 13, 5, 6, 7];

#[derive(Parser, Debug)]
#[command(name = "chainmap-demo")]
#[command(version, about = "Demonstrate the chained hash map and heap sort")]
struct Cli {
    /// Demo to run; runs both when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Insert key/value pairs into a map and print them in iteration order
    Map {
        /// Number of buckets
        #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
        capacity: usize,

        /// Pairs to insert, written as KEY=VALUE
        #[arg(value_name = "KEY=VALUE", default_values = DEFAULT_PAIRS)]
        pairs: Vec<String>,
    },

    /// Heap sort a list of integers and print the result
    Sort {
        /// Integers to sort
        #[arg(value_name = "VALUES", allow_negative_numbers = true, default_values_t = crate::DEFAULT_VALUES)]
        values: Vec<i64>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so the demo output stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    debug!(?cli, "parsed arguments");

    let mut out = io::stdout().lock();
    match cli.command {
        Some(Commands::Map { capacity, pairs }) => run_map(&mut out, capacity, &pairs),
        Some(Commands::Sort { mut values }) => run_sort(&mut out, &mut values),
        None => {
            run_map(&mut out, DEFAULT_CAPACITY, &DEFAULT_PAIRS)?;
            let mut values = DEFAULT_VALUES;
            run_sort(&mut out, &mut values)
        }
    }
}

/// Builds a map from `KEY=VALUE` pairs and writes one `key = value` line per
/// entry, in iteration order.
fn run_map<S: AsRef<str>>(out: &mut impl Write, capacity: usize, pairs: &[S]) -> Result<()> {
    let mut map = ChainMap::with_capacity(capacity)
        .with_context(|| format!("cannot build a map with {capacity} buckets"))?;

    for pair in pairs.iter().map(AsRef::as_ref) {
        let (key, value) = parse_pair(pair)?;
        if map.put(key, value).is_some() {
            debug!(pair = %pair, "replaced existing value");
        }
    }
    info!(entries = map.len(), load_factor = map.load_factor(), "map ready");

    for (key, value) in &map {
        writeln!(out, "{key} = {value}")?;
    }
    Ok(())
}

fn parse_pair(pair: &str) -> Result<(String, i64)> {
    let Some((key, value)) = pair.split_once('=') else {
        bail!("expected KEY=VALUE, got `{pair}`");
    };
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("value for `{key}` is not an integer"))?;
    Ok((key.trim().to_string(), value))
}

fn run_sort(out: &mut impl Write, values: &mut [i64]) -> Result<()> {
    heap_sort::sort(values);
    let rendered: Vec<String> = values.iter().map(i64::to_string).collect();
    writeln!(out, "Sorted array: {}", rendered.join(" "))?;
    Ok(())
}
