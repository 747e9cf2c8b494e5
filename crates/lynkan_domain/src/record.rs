use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::{Error, Result};

/// Fixed `(service, account)` pair a secure record is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{service}/{account}")]
pub struct RecordKey {
    pub service: String,
    pub account: String,
}

impl RecordKey {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }
}

/// When the OS lets the app read a secure record.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Accessibility {
    #[default]
    AfterFirstUnlockThisDeviceOnly,
    AfterFirstUnlock,
    WhenUnlockedThisDeviceOnly,
}

impl Accessibility {
    /// Records bound to this device are never exported via backup or sync.
    pub fn is_this_device_only(&self) -> bool {
        matches!(
            self,
            Accessibility::AfterFirstUnlockThisDeviceOnly
                | Accessibility::WhenUnlockedThisDeviceOnly
        )
    }
}

/// A single UTF-8 value held in the platform secure store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureRecord {
    pub key: RecordKey,
    pub value: String,
    pub accessibility: Accessibility,
}

impl SecureRecord {
    pub fn new(key: RecordKey, value: impl Into<String>, accessibility: Accessibility) -> Self {
        Self { key, value: value.into(), accessibility }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.value.as_bytes().to_vec()
    }

    pub fn from_bytes(key: RecordKey, bytes: Vec<u8>, accessibility: Accessibility) -> Result<Self> {
        match String::from_utf8(bytes) {
            Ok(value) => Ok(Self { key, value, accessibility }),
            Err(_) => Err(Error::Undecodable(key)),
        }
    }
}
