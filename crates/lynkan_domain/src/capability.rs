use tracing::debug;

use crate::{Accessibility, RecordKey, Result, SecureRecord};

/// OS-provided long-lived identifier, such as the Android secure id.
pub trait NativeIdSource: Send + Sync {
    /// `Ok(None)` when the OS reports no value at all.
    fn read(&self) -> Result<Option<String>>;
}

/// Identifier shared by every app of the same publisher on the device.
pub trait VendorIdSource: Send + Sync {
    fn vendor_id(&self) -> Option<String>;
}

impl<F> VendorIdSource for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn vendor_id(&self) -> Option<String> {
        self()
    }
}

/// Wall clock in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Encrypted key/value facility owned by the OS.
///
/// Implementations must keep at most one record per key. The store's own
/// locking is relied upon for cross-process safety; callers in the same
/// process can race on [`SecureStore::overwrite`] and the last writer wins.
pub trait SecureStore: Send + Sync {
    /// Raw payload for `key`, `Ok(None)` when no record exists.
    fn read(&self, key: &RecordKey) -> Result<Option<Vec<u8>>>;

    /// Removes the record. Removing a missing record is not an error.
    fn delete(&self, key: &RecordKey) -> Result<()>;

    /// Adds a record. Fails if one already exists under the key.
    fn insert(&self, record: &SecureRecord) -> Result<()>;

    /// Reads and decodes the record stored under `key`.
    fn load(&self, key: &RecordKey, accessibility: Accessibility) -> Result<Option<SecureRecord>> {
        self.read(key)?
            .map(|bytes| SecureRecord::from_bytes(key.clone(), bytes, accessibility))
            .transpose()
    }

    /// Delete-then-insert, so the key never holds two records.
    fn overwrite(&self, record: &SecureRecord) -> Result<()> {
        if let Err(error) = self.delete(&record.key) {
            debug!(key = %record.key, %error, "Delete before insert failed, inserting anyway");
        }
        self.insert(record)
    }
}
