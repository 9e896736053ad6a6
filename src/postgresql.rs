//! PostgreSQL destination store.

use tokio::task::JoinHandle;
use tokio_postgres::{Client, Config, NoTls, Row};
use tracing::{debug, error, info};
use verify_core::{DestinationRecord, DestinationStore, VerifyError};

use crate::DestinationOpts;

const STORE: &str = "postgresql";

/// Build the driver configuration from the destination options.
pub fn pg_config(opts: &DestinationOpts) -> Config {
    let mut config = Config::new();
    config
        .host(&opts.destination_host)
        .port(opts.destination_port)
        .dbname(&opts.destination_database)
        .user(&opts.destination_user)
        .password(&opts.destination_password);
    config
}

pub fn count_query(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {table}")
}

pub fn lookup_query(table: &str) -> String {
    format!("SELECT * FROM {table} WHERE id = $1")
}

fn row_to_record(row: &Row) -> Result<DestinationRecord, VerifyError> {
    Ok(DestinationRecord {
        id: row
            .try_get::<_, String>("id")
            .map_err(|e| VerifyError::decode(STORE, e))?,
        email: row
            .try_get::<_, Option<String>>("email")
            .map_err(|e| VerifyError::decode(STORE, e))?,
        name: row
            .try_get::<_, Option<String>>("name")
            .map_err(|e| VerifyError::decode(STORE, e))?,
        group_id: row
            .try_get::<_, Option<String>>("group_id")
            .map_err(|e| VerifyError::decode(STORE, e))?,
    })
}

pub struct PostgresDestination {
    client: Client,
    connection: JoinHandle<()>,
}

impl PostgresDestination {
    pub async fn connect(opts: &DestinationOpts) -> Result<Self, VerifyError> {
        debug!(
            "Connecting to PostgreSQL at {}:{}",
            opts.destination_host, opts.destination_port
        );
        let (client, connection) = pg_config(opts)
            .connect(NoTls)
            .await
            .map_err(|e| VerifyError::connection(STORE, e))?;

        // Spawn connection handler
        let connection = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("PostgreSQL connection error: {e}");
            }
        });

        info!(
            "Connected to PostgreSQL database '{}'",
            opts.destination_database
        );
        Ok(Self { client, connection })
    }
}

#[async_trait::async_trait]
impl DestinationStore for PostgresDestination {
    async fn count(&mut self, table: &str) -> Result<u64, VerifyError> {
        let row = self
            .client
            .query_one(count_query(table).as_str(), &[])
            .await
            .map_err(|e| VerifyError::query(STORE, e))?;
        let count: i64 = row.try_get(0).map_err(|e| VerifyError::decode(STORE, e))?;
        debug!("PostgreSQL table '{}' has {} rows", table, count);
        u64::try_from(count).map_err(|e| VerifyError::decode(STORE, e))
    }

    async fn find_by_id(
        &mut self,
        table: &str,
        id: &str,
    ) -> Result<Option<DestinationRecord>, VerifyError> {
        let row = self
            .client
            .query_opt(lookup_query(table).as_str(), &[&id])
            .await
            .map_err(|e| VerifyError::query(STORE, e))?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn close(self) -> Result<(), VerifyError> {
        // Dropping the client ends the connection task.
        drop(self.client);
        self.connection
            .await
            .map_err(|e| VerifyError::query(STORE, e))?;
        debug!("PostgreSQL connection closed");
        Ok(())
    }
}
