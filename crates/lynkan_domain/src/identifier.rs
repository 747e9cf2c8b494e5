use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result};

/// Where a resolved identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Origin {
    /// Read straight from the OS and already persisted by it.
    NativeOsId,
    /// Generated (or taken from the vendor id) and saved to the secure store.
    PersistedGenerated,
    /// Synthesized for this call only. A later call yields a different value.
    EphemeralGenerated,
}

/// Opaque, pseudonymous per-installation identifier.
///
/// The value is never empty and only contains printable ASCII, so it can be
/// passed to a backend as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
#[display("{value}")]
pub struct DeviceIdentifier {
    value: String,
    origin: Origin,
}

impl DeviceIdentifier {
    pub fn new(value: impl Into<String>, origin: Origin) -> Result<Self> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(Error::InvalidIdentifier(value));
        }
        Ok(Self { value, origin })
    }

    /// `<prefix><millis>`. Non-printable characters are dropped from the
    /// prefix, so the timestamp digits always make this valid.
    pub fn ephemeral(prefix: &str, millis: i64) -> Self {
        let prefix: String = prefix.chars().filter(|&c| matches!(c, ' '..='~')).collect();
        Self {
            value: format!("{prefix}{millis}"),
            origin: Origin::EphemeralGenerated,
        }
    }

    /// Upper-case hyphenated form, e.g. `3F2504E0-4F89-41D3-9A0C-0305E82C3301`.
    pub fn from_uuid(uuid: Uuid, origin: Origin) -> Self {
        let value = uuid
            .hyphenated()
            .encode_upper(&mut Uuid::encode_buffer())
            .to_string();
        Self { value, origin }
    }

    /// Non-blank and printable ASCII only.
    pub fn is_valid(value: &str) -> bool {
        !value.trim().is_empty() && value.chars().all(|c| matches!(c, ' '..='~'))
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl AsRef<str> for DeviceIdentifier {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
