use std::sync::Arc;

use lynkan_domain::{
    DeviceIdConfig, DeviceIdentifier, Diagnostic, Origin, Resolution, SecureRecord, SecureStore,
    VendorIdSource,
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Strategy used where the only native id may change on reinstall, so the
/// resolver keeps its own copy in the secure store.
pub struct SecureStoreResolver {
    config: DeviceIdConfig,
    store: Arc<dyn SecureStore>,
    vendor: Arc<dyn VendorIdSource>,
}

impl SecureStoreResolver {
    pub fn new(
        config: DeviceIdConfig,
        store: Arc<dyn SecureStore>,
        vendor: Arc<dyn VendorIdSource>,
    ) -> Self {
        Self { config, store, vendor }
    }

    pub fn resolve(&self) -> Resolution {
        let mut diagnostics = Vec::new();

        match self.load_stored() {
            Ok(Some(identifier)) => {
                debug!(key = %self.config.record_key(), "Resolved stored device id");
                return Resolution::new(identifier);
            }
            Ok(None) => debug!(key = %self.config.record_key(), "No stored device id"),
            Err(diagnostic) => {
                warn!(%diagnostic, "Ignoring unreadable device id record");
                diagnostics.push(diagnostic);
            }
        }

        let identifier = self.generate(&mut diagnostics);
        if let Err(diagnostic) = self.persist(&identifier) {
            warn!(%diagnostic, "Device id not saved, the next call may generate another");
            diagnostics.push(diagnostic);
        }

        Resolution::with_diagnostics(identifier, diagnostics)
    }

    fn load_stored(&self) -> Result<Option<DeviceIdentifier>, Diagnostic> {
        let record = self
            .store
            .load(&self.config.record_key(), self.config.accessibility)
            .map_err(Diagnostic::ReadFailure)?;

        record
            .map(|record| DeviceIdentifier::new(record.value, Origin::PersistedGenerated))
            .transpose()
            .map_err(Diagnostic::ReadFailure)
    }

    fn generate(&self, diagnostics: &mut Vec<Diagnostic>) -> DeviceIdentifier {
        let vendor = self
            .vendor
            .vendor_id()
            .and_then(|value| DeviceIdentifier::new(value, Origin::PersistedGenerated).ok());

        match vendor {
            Some(identifier) => identifier,
            None => {
                debug!("Vendor id unavailable, generating a random device id");
                diagnostics.push(Diagnostic::VendorIdUnavailable);
                DeviceIdentifier::from_uuid(Uuid::new_v4(), Origin::PersistedGenerated)
            }
        }
    }

    fn persist(&self, identifier: &DeviceIdentifier) -> Result<(), Diagnostic> {
        let record = SecureRecord::new(
            self.config.record_key(),
            identifier.value(),
            self.config.accessibility,
        );
        self.store
            .overwrite(&record)
            .map_err(Diagnostic::PersistenceFailure)
    }
}
