//! Count and sample verifier.

use crate::compare::{
    check_record, compare_counts, display_value, CompareResult, CountComparison, RecordOutcome,
};
use crate::error::VerifyError;
use crate::report::{FieldMismatch, VerificationReport};
use crate::store::{DestinationStore, SourceStore};
use futures::FutureExt;
use std::any::Any;
use std::future::Future;
use std::io::Write;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, warn};

/// Collection name on the source side and table name on the destination side.
pub const USERS: &str = "users";

/// Upper bound on the number of source records spot-checked per run.
pub const SAMPLE_SIZE: i64 = 5;

/// Runs the reconciliation pipeline and writes one status line per check.
pub struct Verifier<W: Write> {
    out: W,
}

impl<W: Write> Verifier<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Connect both stores, verify, and release both connections.
    ///
    /// The connect futures are awaited in order (source first). Once a
    /// connection is open it is closed on every exit path, including errors
    /// and panics raised while counting, sampling or looking up records.
    /// Closing one store never depends on closing the other succeeding or
    /// returning normally.
    pub async fn run<S, D, CS, CD>(
        &mut self,
        connect_source: CS,
        connect_destination: CD,
    ) -> Result<VerificationReport, VerifyError>
    where
        S: SourceStore,
        D: DestinationStore,
        CS: Future<Output = Result<S, VerifyError>>,
        CD: Future<Output = Result<D, VerifyError>>,
    {
        info!("Connecting to source store");
        let mut source = connect_source.await?;

        info!("Connecting to destination store");
        let connected = AssertUnwindSafe(connect_destination)
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(VerifyError::Unexpected(panic_message(panic.as_ref())))
            });
        let mut destination = match connected {
            Ok(destination) => destination,
            Err(e) => {
                error!("Destination connection failed: {}", e);
                release("source", source.close()).await;
                return Err(e);
            }
        };

        let outcome = AssertUnwindSafe(self.run_phases(&mut source, &mut destination))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                Err(VerifyError::Unexpected(panic_message(panic.as_ref())))
            });

        if let Err(e) = &outcome {
            error!("Verification aborted: {}", e);
        }

        release("source", source.close()).await;
        release("destination", destination.close()).await;

        outcome
    }

    /// Count, compare, then spot-check the sample against open connections.
    pub async fn run_phases<S, D>(
        &mut self,
        source: &mut S,
        destination: &mut D,
    ) -> Result<VerificationReport, VerifyError>
    where
        S: SourceStore,
        D: DestinationStore,
    {
        let mut report = VerificationReport::default();

        info!("Counting records in '{}'", USERS);
        report.source_count = source.count(USERS).await?;
        report.destination_count = destination.count(USERS).await?;
        debug!(
            "Counts: source={}, destination={}",
            report.source_count, report.destination_count
        );

        match compare_counts(report.source_count, report.destination_count) {
            CountComparison::Match(count) => {
                writeln!(self.out, "✅ User count matches: {count}")?;
            }
            CountComparison::Mismatch {
                source,
                destination,
            } => {
                writeln!(
                    self.out,
                    "❌ User count mismatch: source={source}, destination={destination}"
                )?;
            }
        }

        info!("Sampling up to {} source records", SAMPLE_SIZE);
        let sample = source.sample(USERS, SAMPLE_SIZE).await?;
        report.sampled = sample.len() as u64;

        for record in &sample {
            debug!("Looking up user {} in destination", record.id);
            let counterpart = destination.find_by_id(USERS, &record.id).await?;

            match check_record(record, counterpart.as_ref()) {
                RecordOutcome::MissingCounterpart => {
                    writeln!(self.out, "❌ User {} not found in destination", record.id)?;
                    report.missing_ids.push(record.id.clone());
                }
                RecordOutcome::Compared(results) => {
                    report.found += 1;
                    for (field, result) in results {
                        match result {
                            CompareResult::Match { value } => {
                                writeln!(
                                    self.out,
                                    "✅ User {} {} matches: {}",
                                    record.id,
                                    field,
                                    display_value(value.as_deref())
                                )?;
                                report.field_matches += 1;
                            }
                            CompareResult::Mismatch {
                                source,
                                destination,
                            } => {
                                writeln!(
                                    self.out,
                                    "❌ User {} {} mismatch: source={}, destination={}",
                                    record.id,
                                    field,
                                    display_value(source.as_deref()),
                                    display_value(destination.as_deref())
                                )?;
                                report.field_mismatches.push(FieldMismatch {
                                    id: record.id.clone(),
                                    field,
                                    source,
                                    destination,
                                });
                            }
                        }
                    }
                }
            }
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

/// Await a close future; errors and panics are logged, never propagated.
async fn release<F>(store: &str, close: F)
where
    F: Future<Output = Result<(), VerifyError>>,
{
    match AssertUnwindSafe(close).catch_unwind().await {
        Ok(Ok(())) => debug!("Closed {} connection", store),
        Ok(Err(e)) => warn!("Failed to close {} connection: {}", store, e),
        Err(panic) => warn!(
            "Panic while closing {} connection: {}",
            store,
            panic_message(panic.as_ref())
        ),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during verification".to_string()
    }
}
