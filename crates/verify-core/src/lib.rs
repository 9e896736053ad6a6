//! Post-migration reconciliation between a document store and a relational store.
//!
//! The verifier counts the `users` records on both sides, then spot-checks a
//! small sample of source records field by field against the destination.
//! Database access goes through the [`SourceStore`] and [`DestinationStore`]
//! traits, so the pipeline does not depend on any particular driver.
//!
//! # Example
//!
//! ```ignore
//! use verify_core::Verifier;
//!
//! let mut verifier = Verifier::new(std::io::stdout());
//! let report = verifier
//!     .run(MongoSource::connect(&source_opts), PostgresDestination::connect(&destination_opts))
//!     .await?;
//! println!("{}", report.summary());
//! ```

pub mod compare;
pub mod error;
pub mod record;
pub mod report;
pub mod store;
pub mod verifier;

pub use compare::{
    check_record, compare_counts, compare_field, compare_record, compare_values, CompareResult,
    CountComparison, RecordOutcome,
};
pub use error::VerifyError;
pub use record::{CheckedField, DestinationRecord, SourceRecord};
pub use report::{FieldMismatch, VerificationReport};
pub use store::{DestinationStore, SourceStore};
pub use verifier::{Verifier, SAMPLE_SIZE, USERS};
