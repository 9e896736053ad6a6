//! MongoDB source store.
//!
//! Reads user documents and converts them into [`SourceRecord`]s. Document
//! identifiers and group references are converted to strings here, at the
//! boundary, so the verifier only ever compares strings.

use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{options::ClientOptions, Client as MongoClient, Database};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use verify_core::{SourceRecord, SourceStore, VerifyError};

use crate::SourceOpts;

const STORE: &str = "mongodb";

/// Shape of a user document as far as the check is concerned.
#[derive(Debug, Deserialize)]
struct UserDocument {
    #[serde(rename = "_id")]
    id: Bson,
    email: Option<String>,
    name: Option<String>,
    group: Option<Bson>,
}

/// Convert a document identifier to the string stored in the destination `id` column.
///
/// ObjectIds become their 24-character lowercase hex form, strings are kept
/// as-is, integers use their decimal form. Anything else falls back to the
/// BSON display form.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        Bson::Int32(i) => i.to_string(),
        Bson::Int64(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Convert a group reference; absent and null references stay `None`.
pub fn group_to_string(group: Option<&Bson>) -> Option<String> {
    match group {
        None | Some(Bson::Null) | Some(Bson::Undefined) => None,
        Some(reference) => Some(id_to_string(reference)),
    }
}

/// Decode a raw user document into a [`SourceRecord`].
pub fn document_to_record(document: Document) -> Result<SourceRecord, VerifyError> {
    let user: UserDocument =
        bson::from_document(document).map_err(|e| VerifyError::decode(STORE, e))?;
    Ok(SourceRecord {
        id: id_to_string(&user.id),
        email: user.email,
        name: user.name,
        group: group_to_string(user.group.as_ref()),
    })
}

pub struct MongoSource {
    client: MongoClient,
    database: Database,
}

impl MongoSource {
    /// Connect and ping the server so an unreachable store fails here.
    pub async fn connect(opts: &SourceOpts) -> Result<Self, VerifyError> {
        debug!("Parsing MongoDB connection options");
        let mut mongo_options = ClientOptions::parse(&opts.source_uri)
            .await
            .map_err(|e| VerifyError::connection(STORE, e))?;
        // Add connection timeout to prevent hanging
        mongo_options.connect_timeout = Some(Duration::from_secs(10));
        mongo_options.server_selection_timeout = Some(Duration::from_secs(10));

        let client = MongoClient::with_options(mongo_options)
            .map_err(|e| VerifyError::connection(STORE, e))?;
        let database = client.database(&opts.source_database);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| VerifyError::connection(STORE, e))?;

        info!("Connected to MongoDB database '{}'", opts.source_database);
        Ok(Self { client, database })
    }
}

#[async_trait::async_trait]
impl SourceStore for MongoSource {
    async fn count(&mut self, collection: &str) -> Result<u64, VerifyError> {
        let count = self
            .database
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await
            .map_err(|e| VerifyError::query(STORE, e))?;
        debug!("MongoDB collection '{}' has {} documents", collection, count);
        Ok(count)
    }

    async fn sample(
        &mut self,
        collection: &str,
        limit: i64,
    ) -> Result<Vec<SourceRecord>, VerifyError> {
        let cursor = self
            .database
            .collection::<Document>(collection)
            .find(doc! {})
            .limit(limit)
            .await
            .map_err(|e| VerifyError::query(STORE, e))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| VerifyError::query(STORE, e))?;
        debug!(
            "Fetched {} documents from MongoDB collection '{}'",
            documents.len(),
            collection
        );

        documents.into_iter().map(document_to_record).collect()
    }

    async fn close(self) -> Result<(), VerifyError> {
        self.client.shutdown().await;
        debug!("MongoDB client shut down");
        Ok(())
    }
}
