use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fixrec::app;
use fixrec::config::Config;
use fixrec::{phrase, Bookmaker, CanonicalTimestamp, FixtureQuery, SnapshotSource};

#[derive(Parser)]
#[command(name = "fixrec", about = "Fixture reconciler for scraped bookmaker listings")]
struct Cli {
    /// Write debug logs to /tmp/fixrec-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to layer over the defaults instead of ~/.config/fixrec/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference date (YYYY-MM-DD) for relative phrases.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one date phrase into its canonical timestamp.
    Parse { phrase: String },
    /// Store every new fixture from a snapshot of a bookmaker listing.
    Collect {
        #[arg(long)]
        source: Bookmaker,
        #[arg(long)]
        input: PathBuf,
    },
    /// Find the first fixture between two teams.
    Find {
        #[arg(long)]
        source: Bookmaker,
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        team1: String,
        #[arg(long)]
        team2: String,
        /// Exact kickoff, "DD/MM/YYYY HH:MM".
        #[arg(long)]
        at: Option<CanonicalTimestamp>,
        /// Append the match to the bookmaker's store.
        #[arg(long)]
        save: bool,
    },
    /// Look for arbitrage across all bookmaker stores.
    Compare,
}

fn env_filter(default: &str) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default))
}

fn init_logging(debug: bool, filter: &str) -> anyhow::Result<()> {
    if debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/fixrec-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(env_filter("debug"))
            .init();
        tracing::info!("fixrec debug log started, tail -f /tmp/fixrec-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter(filter))
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::load().context("loading config")?,
    };
    init_logging(cli.debug, &config.log.filter)?;

    let clock = app::reference_clock(&config, cli.today)?;

    match cli.command {
        Command::Parse { phrase: text } => {
            let at = phrase::parse(&text, &clock)?;
            println!("{at}");
        }
        Command::Collect { source, input } => {
            let rows = SnapshotSource::open(&input)?;
            let report = app::collect(&config, clock, source, rows)?;
            println!(
                "{source}: scanned {}, stored {}, duplicates {}, skipped {}",
                report.scanned,
                report.accepted,
                report.duplicates,
                report.skipped.len()
            );
            println!("store: {}", config.store.path_for(source).display());
        }
        Command::Find { source, input, team1, team2, at, save } => {
            let query = match at {
                Some(at) => FixtureQuery::exact(at, &team1, &team2),
                None => FixtureQuery::teams(&team1, &team2),
            };
            let rows = SnapshotSource::open(&input)?;
            let lookup = app::find(&config, clock, source, rows, &query, save)?;
            let found = lookup.found.to_persisted();
            println!(
                "{} {} vs {}  1={} X={} 2={}",
                found.at,
                found.team1,
                found.team2,
                found.odds.home.as_deref().unwrap_or("-"),
                found.odds.draw.as_deref().unwrap_or("-"),
                found.odds.away.as_deref().unwrap_or("-"),
            );
        }
        Command::Compare => {
            let opportunities = app::compare(&config)?;
            if opportunities.is_empty() {
                println!("no fixture is quoted by more than one bookmaker");
            }
            for opp in &opportunities {
                let marker = if opp.plan.arbitrage { "ARB" } else { "   " };
                println!("{marker} {} (implied {:.4})", opp.identity, opp.plan.implied_sum);
                for stake in &opp.plan.stakes {
                    println!(
                        "      {} @ {:.2} on {}: stake {:.2} -> {:.2}",
                        stake.outcome, stake.price, stake.bookmaker, stake.amount, stake.potential_return
                    );
                }
                if opp.plan.arbitrage {
                    println!(
                        "      profit {:.2} ({:.2}%)",
                        opp.plan.expected_profit, opp.plan.expected_roi_pct
                    );
                }
            }
        }
    }
    Ok(())
}
