//! migration-verify library
//!
//! Post-migration reconciliation check between a MongoDB `users` collection and
//! a PostgreSQL `users` table.
//!
//! The check compares the record counts on both sides, then samples a few
//! source documents and compares their email, name and group reference with
//! the matching destination row. Nothing is written to either database.
//!
//! # CLI Usage
//!
//! ```bash
//! MONGO_URI=mongodb://localhost:27017 MONGO_DATABASE=app \
//! PG_DATABASE=app PG_USER=app PG_PASSWORD=secret \
//! migration-verify
//! ```
//!
//! Every option can also be passed as a flag (`--source-uri`, `--destination-host`, ...).

use clap::Parser;

pub mod mongodb;
pub mod postgresql;

pub use verify_core::{VerificationReport, Verifier, VerifyError};

/// Connection options for the MongoDB source.
#[derive(Parser, Clone, Debug)]
pub struct SourceOpts {
    /// MongoDB connection URI
    #[arg(long, env = "MONGO_URI")]
    pub source_uri: String,

    /// MongoDB database holding the `users` collection
    #[arg(long, env = "MONGO_DATABASE")]
    pub source_database: String,
}

/// Connection options for the PostgreSQL destination.
#[derive(Parser, Clone, Debug)]
pub struct DestinationOpts {
    /// PostgreSQL host
    #[arg(long, default_value = "localhost", env = "PG_HOST")]
    pub destination_host: String,

    /// PostgreSQL port
    #[arg(long, default_value = "5432", env = "PG_PORT")]
    pub destination_port: u16,

    /// PostgreSQL database holding the `users` table
    #[arg(long, env = "PG_DATABASE")]
    pub destination_database: String,

    /// PostgreSQL user
    #[arg(long, env = "PG_USER")]
    pub destination_user: String,

    /// PostgreSQL password
    #[arg(long, env = "PG_PASSWORD", hide_env_values = true)]
    pub destination_password: String,
}

#[derive(Parser, Clone, Debug)]
#[command(name = "migration-verify")]
#[command(about = "Check that MongoDB users were migrated to PostgreSQL")]
#[command(long_about = None)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub source: SourceOpts,

    #[command(flatten)]
    pub destination: DestinationOpts,
}

/// Run the full check, writing status lines to `out`.
pub async fn verify_migration<W: std::io::Write>(
    args: &VerifyArgs,
    out: W,
) -> Result<VerificationReport, VerifyError> {
    let mut verifier = Verifier::new(out);
    verifier
        .run(
            crate::mongodb::MongoSource::connect(&args.source),
            crate::postgresql::PostgresDestination::connect(&args.destination),
        )
        .await
}
