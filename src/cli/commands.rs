//! CLI commands

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Viewfold CLI
#[derive(Parser)]
#[command(name = "viewfold")]
#[command(about = "Build materialized views by folding record streams")]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the generated sample records
    Sample(SampleArgs),
    /// Fold the sample records into a totals-by-category view
    Run(RunArgs),
}

/// Shape of the generated sample journal
#[derive(Args, Debug, Clone)]
pub struct SampleArgs {
    /// Number of records
    #[arg(short, long, default_value_t = 50)]
    pub records: u64,
    /// Switch to a new category every N records
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub block: u64,
    /// Amount carried by every record
    #[arg(short, long, default_value_t = 10.0)]
    pub amount: f64,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub sample: SampleArgs,
    /// Seed the view from a snapshot instead of starting empty
    #[arg(long)]
    pub seed: Option<PathBuf>,
    /// Write the resulting view to a snapshot file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Snapshot encoding for --seed and --output
    #[arg(long, value_enum, default_value_t = SnapshotFormat::Json)]
    pub format: SnapshotFormat,
    /// Aggregator config file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Snapshot encodings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Bincode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_defaults_match_sample() {
        let cli = Cli::try_parse_from(["viewfold", "run"]).unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.sample.records, 50);
                assert_eq!(args.sample.block, 10);
                assert_eq!(args.sample.amount, 10.0);
                assert_eq!(args.format, SnapshotFormat::Json);
                assert!(args.seed.is_none());
            }
            Commands::Sample(_) => panic!("expected run"),
        }
    }

    #[test]
    fn test_zero_block_rejected() {
        assert!(Cli::try_parse_from(["viewfold", "sample", "--block", "0"]).is_err());
    }

    #[test]
    fn test_global_log_flag() {
        let cli =
            Cli::try_parse_from(["viewfold", "run", "--format", "bincode", "--log-json"]).unwrap();
        assert!(cli.log_json);
        match cli.command {
            Commands::Run(args) => assert_eq!(args.format, SnapshotFormat::Bincode),
            Commands::Sample(_) => panic!("expected run"),
        }
    }
}
