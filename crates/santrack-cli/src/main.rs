use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use santrack_core::RiskScorer;
use santrack_store::DuckStore;
use tracing::Level;

mod etl;

/// Score pending sanitation inspections and write the results back.
#[derive(Parser)]
#[command(name = "santrack", version, about)]
struct Cli {
    /// DuckDB database holding the `inspections` table.
    #[arg(long, env = "SANTRACK_DB", global = true)]
    db: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Score every pending inspection and commit (default).
    Run,
    /// Report how many inspections are waiting for a score.
    Pending,
    /// Score a single checklist document and print the result.
    Score {
        /// Checklist JSON, e.g. '{"handwashing":true,"pests":false}'.
        checklist: String,
    },
}

impl Cli {
    fn db_path(&self) -> anyhow::Result<&Path> {
        self.db
            .as_deref()
            .context("no database given: pass --db or set SANTRACK_DB")
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("santrack v{}", env!("CARGO_PKG_VERSION"));

    let scorer = RiskScorer::default();

    match cli.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => {
            let db = cli.db_path()?;
            let stats = etl::run_etl(|| DuckStore::open_persistent(db), &scorer)?;
            if stats.processed > 0 {
                println!(
                    "Check {} - scores are updated! (run started {}, took {:.2}s)",
                    db.display(),
                    stats.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    stats.elapsed_secs
                );
            }
            if stats.skipped > 0 {
                println!(
                    "{} inspections were already scored by another run",
                    stats.skipped
                );
            }
        }
        Command::Pending => {
            let db = cli.db_path()?;
            let count = etl::count_pending(|| DuckStore::open_persistent(db))?;
            println!("{count} pending inspections");
        }
        Command::Score { checklist } => {
            println!("{}", scorer.score(checklist));
        }
    }

    Ok(())
}
