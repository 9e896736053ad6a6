//! Store traits implemented by the database clients.
//!
//! The verifier only talks to these traits, so it can run against real
//! MongoDB/PostgreSQL connections or in-memory stores in tests.

use crate::error::VerifyError;
use crate::record::{DestinationRecord, SourceRecord};

/// The document store being migrated from.
#[async_trait::async_trait]
pub trait SourceStore: Send {
    /// Count all documents in a collection.
    async fn count(&mut self, collection: &str) -> Result<u64, VerifyError>;

    /// Fetch up to `limit` documents in the store's natural order.
    async fn sample(
        &mut self,
        collection: &str,
        limit: i64,
    ) -> Result<Vec<SourceRecord>, VerifyError>;

    /// Release the connection.
    async fn close(self) -> Result<(), VerifyError>;
}

/// The relational store being migrated to.
#[async_trait::async_trait]
pub trait DestinationStore: Send {
    /// Count all rows in a table.
    async fn count(&mut self, table: &str) -> Result<u64, VerifyError>;

    /// Look up a row by its string identifier.
    async fn find_by_id(
        &mut self,
        table: &str,
        id: &str,
    ) -> Result<Option<DestinationRecord>, VerifyError>;

    /// Release the connection.
    async fn close(self) -> Result<(), VerifyError>;
}
