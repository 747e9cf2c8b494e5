use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::{Accessibility, RecordKey};

pub const DEFAULT_SERVICE_NAMESPACE: &str = "com.lynkan.app";
pub const DEFAULT_ACCOUNT_KEY: &str = "deviceId";
/// Returned as the secure id by a batch of defective Android builds.
pub const KNOWN_BAD_ANDROID_ID: &str = "9774d56d682e549c";
pub const DEFAULT_FALLBACK_PREFIX: &str = "ANDROID_FALLBACK_";

/// Constants the resolvers are built with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[serde(rename_all = "camelCase", default)]
#[setters(into)]
pub struct DeviceIdConfig {
    /// Service half of the secure record key.
    pub service_namespace: String,
    /// Account half of the secure record key.
    pub account_key: String,
    /// Native id values that must never be trusted.
    pub known_bad_sentinels: Vec<String>,
    /// Prepended to the timestamp of an ephemeral fallback id.
    pub fallback_prefix: String,
    pub accessibility: Accessibility,
}

impl Default for DeviceIdConfig {
    fn default() -> Self {
        Self {
            service_namespace: DEFAULT_SERVICE_NAMESPACE.to_string(),
            account_key: DEFAULT_ACCOUNT_KEY.to_string(),
            known_bad_sentinels: vec![KNOWN_BAD_ANDROID_ID.to_string()],
            fallback_prefix: DEFAULT_FALLBACK_PREFIX.to_string(),
            accessibility: Accessibility::default(),
        }
    }
}

impl DeviceIdConfig {
    pub fn record_key(&self) -> RecordKey {
        RecordKey::new(&self.service_namespace, &self.account_key)
    }

    pub fn is_known_bad(&self, value: &str) -> bool {
        self.known_bad_sentinels.iter().any(|s| s == value)
    }
}
