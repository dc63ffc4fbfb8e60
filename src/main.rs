//! Viewfold: Main entry point

use clap::Parser;
use tracing_subscriber::EnvFilter;
use viewfold::cli::run::run;
use viewfold::cli::sample::sample_records;
use viewfold::cli::{Cli, Commands};
use viewfold::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Commands::Sample(args) => {
            for record in sample_records(args.records, args.block, args.amount) {
                println!("{}", record);
            }
            Ok(())
        }
        Commands::Run(args) => {
            let report = run(&args).await?;
            println!("{}", report.view);
            if report.cancelled {
                eprintln!(
                    "Cancelled after applying {} of {} records",
                    report.applied, report.available
                );
            }
            Ok(())
        }
    }
}
