use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use lynkan_domain::{Error, RecordKey, Result, SecureRecord, SecureStore};

/// Process-local secure store. Nothing survives the process and nothing
/// leaves it, so every accessibility class is met.
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    records: Mutex<HashMap<RecordKey, Vec<u8>>>,
}

impl MemorySecureStore {
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores raw bytes, bypassing UTF-8 encoding.
    pub fn put_raw(&self, key: &RecordKey, bytes: Vec<u8>) {
        self.lock().insert(key.clone(), bytes);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RecordKey, Vec<u8>>> {
        // A poisoned map is still consistent: every operation is a single
        // HashMap call.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SecureStore for MemorySecureStore {
    fn read(&self, key: &RecordKey) -> Result<Option<Vec<u8>>> {
        Ok(self.lock().get(key).cloned())
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }

    fn insert(&self, record: &SecureRecord) -> Result<()> {
        let mut records = self.lock();
        if records.contains_key(&record.key) {
            return Err(Error::store_write(&record.key, "duplicate item"));
        }
        records.insert(record.key.clone(), record.to_bytes());
        Ok(())
    }
}
