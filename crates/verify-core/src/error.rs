//! Error types for the migration verifier.

use thiserror::Error;

/// Errors that can abort a verification run.
///
/// Field mismatches and missing counterparts are not errors; they are reported
/// through [`crate::VerificationReport`].
#[derive(Error, Debug)]
pub enum VerifyError {
    /// Either store could not be reached.
    #[error("Connection error ({store}): {message}")]
    Connection {
        store: &'static str,
        message: String,
    },

    /// A count, sample or lookup call failed.
    #[error("Query error ({store}): {message}")]
    Query {
        store: &'static str,
        message: String,
    },

    /// A stored value could not be turned into a record.
    #[error("Decode error ({store}): {message}")]
    Decode {
        store: &'static str,
        message: String,
    },

    /// A panic escaped one of the verification phases.
    #[error("Unexpected failure: {0}")]
    Unexpected(String),

    /// Writing a status line failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl VerifyError {
    pub fn connection(store: &'static str, err: impl std::fmt::Display) -> Self {
        VerifyError::Connection {
            store,
            message: err.to_string(),
        }
    }

    pub fn query(store: &'static str, err: impl std::fmt::Display) -> Self {
        VerifyError::Query {
            store,
            message: err.to_string(),
        }
    }

    pub fn decode(store: &'static str, err: impl std::fmt::Display) -> Self {
        VerifyError::Decode {
            store,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_store() {
        let err = VerifyError::connection("mongodb", "server selection timeout");
        assert_eq!(
            err.to_string(),
            "Connection error (mongodb): server selection timeout"
        );

        let err = VerifyError::query("postgresql", "relation \"users\" does not exist");
        assert!(err.to_string().starts_with("Query error (postgresql)"));
    }
}
