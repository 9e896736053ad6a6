//! Command-line interface for migration-verify
//!
//! # Usage
//!
//! ```bash
//! migration-verify \
//!   --source-uri mongodb://localhost:27017 \
//!   --source-database app \
//!   --destination-database app \
//!   --destination-user app \
//!   --destination-password secret
//! ```
//!
//! Each flag falls back to an environment variable (`MONGO_URI`, `MONGO_DATABASE`,
//! `PG_HOST`, `PG_PORT`, `PG_DATABASE`, `PG_USER`, `PG_PASSWORD`).
//!
//! Status lines go to stdout. Logs go to stderr and are filtered with `RUST_LOG`.
//! The process exits 0 whenever the check runs to completion, mismatches included.

use anyhow::Context;
use clap::Parser;
use migration_verify::{verify_migration, VerifyArgs};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = VerifyArgs::parse();

    tracing::info!(
        "Verifying migration of 'users' from MongoDB database '{}' to PostgreSQL database '{}'",
        args.source.source_database,
        args.destination.destination_database
    );

    let report = verify_migration(&args, std::io::stdout())
        .await
        .context("Migration verification failed")?;

    println!("{}", report.summary());

    if report.is_success() {
        tracing::info!("Verification completed - counts and sampled records match");
    } else {
        tracing::warn!(
            "Verification completed with {} missing records and {} field mismatches",
            report.missing_ids.len(),
            report.field_mismatches.len()
        );
    }

    Ok(())
}
