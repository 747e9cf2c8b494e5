use lynkan_domain::{Accessibility, Error, RecordKey, Result, SecureRecord, SecureStore};
use security_framework::access_control::{ProtectionMode, SecAccessControl};
use security_framework::passwords::{
    PasswordOptions, delete_generic_password, get_generic_password, set_generic_password_options,
};

/// `errSecItemNotFound`
const ITEM_NOT_FOUND: i32 = -25300;

/// Secure store backed by the Apple keychain as generic passwords, with the
/// record's [`Accessibility`] applied to each item.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeychainStore;

fn protection_mode(accessibility: Accessibility) -> ProtectionMode {
    match accessibility {
        Accessibility::AfterFirstUnlockThisDeviceOnly => {
            ProtectionMode::AccessibleAfterFirstUnlockThisDeviceOnly
        }
        Accessibility::AfterFirstUnlock => ProtectionMode::AccessibleAfterFirstUnlock,
        Accessibility::WhenUnlockedThisDeviceOnly => {
            ProtectionMode::AccessibleWhenUnlockedThisDeviceOnly
        }
    }
}

impl SecureStore for KeychainStore {
    fn read(&self, key: &RecordKey) -> Result<Option<Vec<u8>>> {
        match get_generic_password(&key.service, &key.account) {
            Ok(secret) => Ok(Some(secret)),
            Err(e) if e.code() == ITEM_NOT_FOUND => Ok(None),
            Err(e) => Err(Error::store_read(key, e)),
        }
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        match delete_generic_password(&key.service, &key.account) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == ITEM_NOT_FOUND => Ok(()),
            Err(e) => Err(Error::store_delete(key, e)),
        }
    }

    fn insert(&self, record: &SecureRecord) -> Result<()> {
        let access_control =
            SecAccessControl::create_with_protection(Some(protection_mode(record.accessibility)), 0)
                .map_err(|e| Error::store_write(&record.key, e))?;

        let mut options =
            PasswordOptions::new_generic_password(&record.key.service, &record.key.account);
        options.set_access_control(access_control);

        set_generic_password_options(&record.to_bytes(), options)
            .map_err(|e| Error::store_write(&record.key, e))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_accessibility_maps_to_device_only_mode() {
        let actual = protection_mode(Accessibility::default());

        assert!(matches!(actual, ProtectionMode::AccessibleAfterFirstUnlockThisDeviceOnly));
    }

    #[test]
    fn test_overwrite_then_read() {
        let key = RecordKey::new("com.lynkan.app.test", "roundTrip");
        let store = KeychainStore;

        store
            .overwrite(&SecureRecord::new(key.clone(), "abc-123", Accessibility::default()))
            .unwrap();
        let actual = store.read(&key).unwrap();
        store.delete(&key).unwrap();

        assert_eq!(actual, Some(b"abc-123".to_vec()));
    }
}
