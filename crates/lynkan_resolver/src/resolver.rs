use std::sync::Arc;

use lynkan_domain::{
    Clock, DeviceIdConfig, NativeIdSource, Platform, Resolution, SecureStore, VendorIdSource,
};

use crate::{NativeIdResolver, SecureStoreResolver};

/// Produces the device identifier. Never fails: every problem is recovered
/// from and reported through [`Resolution::diagnostics`].
pub trait IdentityResolver: Send + Sync {
    fn resolve(&self) -> Resolution;
}

/// OS facilities handed in by the host at startup.
#[derive(Clone)]
pub struct Capabilities {
    pub native_id: Arc<dyn NativeIdSource>,
    pub vendor_id: Arc<dyn VendorIdSource>,
    pub secure_store: Arc<dyn SecureStore>,
    pub clock: Arc<dyn Clock>,
}

/// Resolver picked once per process from the platform value.
pub enum DeviceIdResolver {
    Android(NativeIdResolver),
    Ios(SecureStoreResolver),
}

impl DeviceIdResolver {
    pub fn new(platform: Platform, config: DeviceIdConfig, capabilities: &Capabilities) -> Self {
        match platform {
            Platform::Android => Self::Android(NativeIdResolver::new(
                config,
                capabilities.native_id.clone(),
                capabilities.clock.clone(),
            )),
            Platform::Ios => Self::Ios(SecureStoreResolver::new(
                config,
                capabilities.secure_store.clone(),
                capabilities.vendor_id.clone(),
            )),
        }
    }

    pub fn platform(&self) -> Platform {
        match self {
            Self::Android(_) => Platform::Android,
            Self::Ios(_) => Platform::Ios,
        }
    }
}

impl IdentityResolver for DeviceIdResolver {
    fn resolve(&self) -> Resolution {
        match self {
            Self::Android(resolver) => resolver.resolve(),
            Self::Ios(resolver) => resolver.resolve(),
        }
    }
}

impl IdentityResolver for NativeIdResolver {
    fn resolve(&self) -> Resolution {
        NativeIdResolver::resolve(self)
    }
}

impl IdentityResolver for SecureStoreResolver {
    fn resolve(&self) -> Resolution {
        SecureStoreResolver::resolve(self)
    }
}
