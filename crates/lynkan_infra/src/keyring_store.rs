use keyring::Entry;
use lynkan_domain::{Error, RecordKey, Result, SecureRecord, SecureStore};

/// Secure store backed by the OS credential store, one secret per
/// `(service, account)`.
///
/// On Linux this is the kernel keyutils keyring, which never leaves the
/// machine. Windows Credential Manager entries can roam with the user
/// profile, so "this device only" records are refused there.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl KeyringStore {
    fn entry(key: &RecordKey) -> Result<Entry> {
        Entry::new(&key.service, &key.account).map_err(|e| Error::store_read(key, e))
    }

    fn check_accessibility(record: &SecureRecord) -> Result<()> {
        if cfg!(target_os = "windows") && record.accessibility.is_this_device_only() {
            return Err(Error::store_write(
                &record.key,
                format!("{} is not supported by Credential Manager", record.accessibility),
            ));
        }
        Ok(())
    }
}

impl SecureStore for KeyringStore {
    fn read(&self, key: &RecordKey) -> Result<Option<Vec<u8>>> {
        match Self::entry(key)?.get_secret() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(Error::store_read(key, e)),
        }
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        match Self::entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(Error::store_delete(key, e)),
        }
    }

    fn insert(&self, record: &SecureRecord) -> Result<()> {
        Self::check_accessibility(record)?;
        Self::entry(&record.key)?
            .set_secret(&record.to_bytes())
            .map_err(|e| Error::store_write(&record.key, e))
    }
}
