use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Runtime platform, used once at startup to pick a resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    /// The OS exposes a long-lived secure id that survives reinstall.
    Android,
    /// Only a vendor-scoped id exists, so the value is kept in the keychain.
    Ios,
}

impl Platform {
    /// Platform of the compile target, if it is one we can resolve on.
    pub fn detect() -> Option<Self> {
        if cfg!(target_os = "android") {
            Some(Self::Android)
        } else if cfg!(target_os = "ios") {
            Some(Self::Ios)
        } else {
            None
        }
    }
}
