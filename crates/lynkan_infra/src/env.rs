use std::path::{Path, PathBuf};
use std::str::FromStr;

use lynkan_domain::{Accessibility, DeviceIdConfig, Platform};
use tracing::debug;

/// Builds [`DeviceIdConfig`] from defaults overlaid with `LYNKAN_*`
/// environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `.env` files from `cwd` and its ancestors before reading any
    /// variables.
    pub fn new(cwd: &Path) -> Self {
        Self::dot_env(cwd);
        Self
    }

    pub fn config(&self) -> DeviceIdConfig {
        let mut config = DeviceIdConfig::default();

        if let Some(service) = parse_env::<String>("LYNKAN_DEVICE_ID_SERVICE") {
            config.service_namespace = service;
        }
        if let Some(account) = parse_env::<String>("LYNKAN_DEVICE_ID_ACCOUNT") {
            config.account_key = account;
        }
        if let Some(prefix) = parse_env::<String>("LYNKAN_DEVICE_ID_FALLBACK_PREFIX") {
            config.fallback_prefix = prefix;
        }
        if let Some(accessibility) = parse_env::<Accessibility>("LYNKAN_DEVICE_ID_ACCESSIBILITY") {
            config.accessibility = accessibility;
        }

        // Comma separated, blanks dropped
        if let Some(val) = parse_env::<String>("LYNKAN_DEVICE_ID_SENTINELS") {
            let sentinels: Vec<String> = val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !sentinels.is_empty() {
                config.known_bad_sentinels = sentinels;
            }
        }

        debug!(key = %config.record_key(), "Loaded device id config");
        config
    }

    /// `LYNKAN_PLATFORM` when set and valid, otherwise the compile target.
    pub fn platform(&self) -> Option<Platform> {
        parse_env::<Platform>("LYNKAN_PLATFORM").or_else(Platform::detect)
    }

    /// Load all `.env` files with priority to lower (closer) files.
    fn dot_env(cwd: &Path) {
        let mut paths = vec![];
        let mut current = PathBuf::new();

        for component in cwd.components() {
            current.push(component);
            paths.push(current.clone());
        }

        paths.reverse();

        for path in paths {
            let env_file = path.join(".env");
            if env_file.is_file() {
                dotenvy::from_path(&env_file).ok();
            }
        }
    }
}

trait FromEnvStr: Sized {
    fn from_env_str(s: &str) -> Option<Self>;
}

macro_rules! impl_from_env_str_via_from_str {
    ($($t:ty),* $(,)?) => {
        $(
            impl FromEnvStr for $t {
                fn from_env_str(s: &str) -> Option<Self> {
                    <$t as FromStr>::from_str(s.trim()).ok()
                }
            }
        )*
    };
}

impl_from_env_str_via_from_str! {
    String,
    Platform,
    Accessibility,
}

fn parse_env<T: FromEnvStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|val| T::from_env_str(&val))
}
