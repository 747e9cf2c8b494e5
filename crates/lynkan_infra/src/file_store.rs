use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use lynkan_domain::{Error, RecordKey, Result, SecureRecord, SecureStore};
use tempfile::NamedTempFile;
use tracing::debug;

/// Secure store backed by one owner-only file per record.
///
/// Used where the OS offers no keychain. Files live at
/// `<base_dir>/<service>/<account>` and persist until removed. Records are
/// plain local files outside any backup or sync the store manages, so every
/// [`Accessibility`](lynkan_domain::Accessibility) class is met as
/// "this device only".
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    base_dir: PathBuf,
}

impl FileRecordStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn record_path(&self, key: &RecordKey) -> PathBuf {
        self.base_dir
            .join(sanitize(&key.service))
            .join(sanitize(&key.account))
    }
}

impl Default for FileRecordStore {
    fn default() -> Self {
        let base_dir = dirs::data_local_dir().unwrap_or(PathBuf::from("."));
        Self::new(base_dir)
    }
}

/// Keeps a key component to a single path segment.
fn sanitize(component: &str) -> String {
    let segment: String = component
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    if segment.chars().all(|c| c == '.') {
        format!("_{segment}")
    } else {
        segment
    }
}

impl SecureStore for FileRecordStore {
    fn read(&self, key: &RecordKey) -> Result<Option<Vec<u8>>> {
        match std::fs::read(self.record_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::store_read(key, e)),
        }
    }

    fn delete(&self, key: &RecordKey) -> Result<()> {
        match std::fs::remove_file(self.record_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::store_delete(key, e)),
        }
    }

    fn insert(&self, record: &SecureRecord) -> Result<()> {
        let path = self.record_path(&record.key);
        let parent = path.parent().unwrap_or(&self.base_dir);
        std::fs::create_dir_all(parent).map_err(|e| Error::store_write(&record.key, e))?;

        // Written beside the target and linked in only once complete, so a
        // failed write never leaves a truncated record behind. The temp file
        // is created owner-only and removed on drop.
        let mut staged = NamedTempFile::new_in(parent)
            .map_err(|e| Error::store_write(&record.key, e))?;
        staged
            .write_all(&record.to_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| Error::store_write(&record.key, e))?;
        staged
            .persist_noclobber(&path)
            .map_err(|e| Error::store_write(&record.key, e.error))?;

        debug!(key = %record.key, path = %path.display(), "Stored secure record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fake::{Fake, Faker};
    use lynkan_domain::Accessibility;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn fixture_key() -> RecordKey {
        RecordKey::new("com.lynkan.app", "deviceId")
    }

    fn record(value: &str) -> SecureRecord {
        SecureRecord::new(fixture_key(), value, Accessibility::default())
    }

    #[test]
    fn test_record_path_layout() {
        let fixture = FileRecordStore::new("/data");

        let actual = fixture.record_path(&RecordKey::new("com.lynkan.app", "../device id"));

        assert_eq!(actual, PathBuf::from("/data/com.lynkan.app/.._device_id"));
    }

    #[test]
    fn test_record_path_never_escapes_base_dir() {
        let fixture = FileRecordStore::new("/data");

        let actual = fixture.record_path(&RecordKey::new("..", ""));

        assert_eq!(actual, PathBuf::from("/data/_../_"));
    }

    #[test]
    fn test_round_trip_is_byte_identical() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());
        let mut values: Vec<String> = (0..8).map(|_| Faker.fake::<String>()).collect();
        values.push("  padded value \n".to_string());
        values.push("设备标识-✓".to_string());

        for value in values {
            store.overwrite(&record(&value)).unwrap();

            let actual = store.read(&fixture_key()).unwrap();

            assert_eq!(actual, Some(value.into_bytes()));
        }
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());

        store.overwrite(&record("V1")).unwrap();
        store.overwrite(&record("V2")).unwrap();

        let actual = store.load(&fixture_key(), Accessibility::default()).unwrap();
        assert_eq!(actual.map(|r| r.value), Some("V2".to_string()));
        let entries = std::fs::read_dir(dir.path().join("com.lynkan.app")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());
        store.insert(&record("V1")).unwrap();

        let actual = store.insert(&record("V2"));

        assert!(matches!(actual, Err(Error::StoreWrite { .. })));
        let stored = store.load(&fixture_key(), Accessibility::default()).unwrap();
        assert_eq!(stored.map(|r| r.value), Some("V1".to_string()));
    }

    #[test]
    fn test_failed_insert_leaves_no_partial_file() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());
        store.insert(&record("3F2504E0-4F89-41D3-9A0C-0305E82C3301")).unwrap();

        let _ = store.insert(&record("3F2504E0-4F"));

        let entries: Vec<_> = std::fs::read_dir(dir.path().join("com.lynkan.app"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("deviceId")]);
        let stored = store.read(&fixture_key()).unwrap();
        assert_eq!(stored, Some(b"3F2504E0-4F89-41D3-9A0C-0305E82C3301".to_vec()));
    }

    #[test]
    fn test_insert_into_unwritable_base_fails_cleanly() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"").unwrap();
        let store = FileRecordStore::new(&blocker);

        let actual = store.insert(&record("abc-123"));

        assert!(matches!(actual, Err(Error::StoreWrite { .. })));
        assert_eq!(store.read(&fixture_key()).map_err(|_| ()).ok().flatten(), None);
    }

    #[test]
    fn test_missing_record_and_delete() {
        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());

        assert_eq!(store.read(&fixture_key()).unwrap(), None);
        assert!(store.delete(&fixture_key()).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_record_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileRecordStore::new(dir.path());
        store.insert(&record("abc-123")).unwrap();

        let actual = std::fs::metadata(store.record_path(&fixture_key()))
            .unwrap()
            .permissions()
            .mode()
            & 0o777;

        assert_eq!(actual, 0o600);
    }
}
