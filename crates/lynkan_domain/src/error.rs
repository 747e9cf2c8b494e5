use std::fmt::Display;

use thiserror::Error;

use crate::RecordKey;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Native identifier source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Failed to read secure record {key}: {message}")]
    StoreRead { key: RecordKey, message: String },

    #[error("Failed to write secure record {key}: {message}")]
    StoreWrite { key: RecordKey, message: String },

    #[error("Failed to delete secure record {key}: {message}")]
    StoreDelete { key: RecordKey, message: String },

    #[error("Secure record {0} does not contain UTF-8 text")]
    Undecodable(RecordKey),

    #[error("Invalid device identifier: {0:?}")]
    InvalidIdentifier(String),
}

impl Error {
    pub fn source_unavailable(reason: impl Display) -> Self {
        Self::SourceUnavailable(reason.to_string())
    }

    pub fn store_read(key: &RecordKey, message: impl Display) -> Self {
        Self::StoreRead { key: key.clone(), message: message.to_string() }
    }

    pub fn store_write(key: &RecordKey, message: impl Display) -> Self {
        Self::StoreWrite { key: key.clone(), message: message.to_string() }
    }

    pub fn store_delete(key: &RecordKey, message: impl Display) -> Self {
        Self::StoreDelete { key: key.clone(), message: message.to_string() }
    }
}

pub type Result<A> = std::result::Result<A, Error>;
