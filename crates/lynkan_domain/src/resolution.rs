use thiserror::Error;

use crate::{DeviceIdentifier, Error};

/// Non-fatal condition observed while resolving. Each one was recovered from
/// locally and never changes the fact that an identifier was produced.
#[derive(Debug, Error)]
pub enum Diagnostic {
    #[error("native id source unavailable: {0}")]
    SourceUnavailable(Error),

    #[error("native id is blank")]
    BlankValue,

    #[error("native id {0:?} is a known bad value")]
    KnownBadValue(String),

    #[error("native id {0:?} is not a printable identifier")]
    InvalidValue(String),

    #[error("stored identifier could not be read: {0}")]
    ReadFailure(Error),

    #[error("generated identifier could not be saved: {0}")]
    PersistenceFailure(Error),

    #[error("vendor id unavailable, generated a random identifier")]
    VendorIdUnavailable,
}

/// Outcome of a resolution: always an identifier, plus anything worth
/// reporting about how it was reached.
#[derive(Debug)]
pub struct Resolution {
    pub identifier: DeviceIdentifier,
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn new(identifier: DeviceIdentifier) -> Self {
        Self { identifier, diagnostics: Vec::new() }
    }

    pub fn with_diagnostics(identifier: DeviceIdentifier, diagnostics: Vec<Diagnostic>) -> Self {
        Self { identifier, diagnostics }
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        self.diagnostics.first()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_identifier(self) -> DeviceIdentifier {
        self.identifier
    }
}
