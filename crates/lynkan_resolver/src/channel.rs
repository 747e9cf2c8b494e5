use std::sync::Arc;

use lynkan_domain::{DeviceIdConfig, Platform};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{Capabilities, DeviceIdResolver, IdentityResolver};

pub const CHANNEL_NAME: &str = "com.lynkan.app/device_id";
pub const GET_DEVICE_ID: &str = "getDeviceId";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error("Device ID not available: {reason}")]
    Unavailable { reason: String },

    #[error("Method {0} is not implemented")]
    NotImplemented(String),
}

impl ChannelError {
    /// Error code reported to the calling side.
    pub fn code(&self) -> &'static str {
        match self {
            ChannelError::Unavailable { .. } => "UNAVAILABLE",
            ChannelError::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }
}

/// Method-call boundary through which application code asks for the id.
pub struct DeviceIdChannel {
    resolver: Option<Arc<dyn IdentityResolver>>,
}

impl DeviceIdChannel {
    pub fn new(resolver: Arc<dyn IdentityResolver>) -> Self {
        Self { resolver: Some(resolver) }
    }

    /// Startup entry point: picks the resolver for `platform` once, or an
    /// unsupported channel when no platform was detected.
    pub fn for_platform(
        platform: Option<Platform>,
        config: DeviceIdConfig,
        capabilities: &Capabilities,
    ) -> Self {
        match platform {
            Some(platform) => {
                debug!(channel = CHANNEL_NAME, %platform, "Selected device id resolver");
                Self::new(Arc::new(DeviceIdResolver::new(platform, config, capabilities)))
            }
            None => {
                warn!(channel = CHANNEL_NAME, "No device id resolver for this platform");
                Self::unsupported()
            }
        }
    }

    /// Channel for a host with no usable platform; every lookup reports
    /// [`ChannelError::Unavailable`].
    pub fn unsupported() -> Self {
        Self { resolver: None }
    }

    pub fn handle(&self, method: &str) -> Result<String, ChannelError> {
        match method {
            GET_DEVICE_ID => self.get_device_id(),
            other => Err(ChannelError::NotImplemented(other.to_string())),
        }
    }

    pub fn get_device_id(&self) -> Result<String, ChannelError> {
        let resolver = self
            .resolver
            .as_ref()
            .ok_or_else(|| ChannelError::unavailable("no resolver for this platform"))?;

        let resolution = resolver.resolve();
        for diagnostic in &resolution.diagnostics {
            warn!(channel = CHANNEL_NAME, %diagnostic, "Device id resolved with diagnostic");
        }
        let identifier = resolution.into_identifier();
        debug!(channel = CHANNEL_NAME, origin = %identifier.origin(), "Device id resolved");

        Ok(identifier.into_value())
    }
}
