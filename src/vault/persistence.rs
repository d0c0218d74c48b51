//! JSON persistence for vault entries and lock records.
//!
//! Two files live under the vault directory:
//! - `data.json`  — array of entries, in insertion order
//! - `locks.json` — array of lock records
//!
//! Loads degrade to empty collections when a file is missing or
//! unparseable; a corrupt file must never take the vault down.
//! Writes go through a temp file + rename in the same directory so
//! readers never see a half-written file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{DataVaultError, Result};

use super::entry::{LockRecord, VaultEntry};

/// File-backed persistence for the record and lock tables.
pub struct Persistence {
    data_path: PathBuf,
    lock_path: PathBuf,
}

impl Persistence {
    /// Build a persistence handle rooted at `vault_dir`.
    pub fn new(vault_dir: &Path, data_file: &str, lock_file: &str) -> Self {
        Self {
            data_path: vault_dir.join(data_file),
            lock_path: vault_dir.join(lock_file),
        }
    }

    /// Load persisted entries.  Missing or malformed file -> empty.
    pub fn load_entries(&self) -> Vec<VaultEntry> {
        read_json_or_default(&self.data_path)
    }

    /// Persist all entries, preserving their order.
    pub fn save_entries(&self, entries: &[VaultEntry]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| DataVaultError::SerializationError(format!("entries: {e}")))?;
        write_atomic(&self.data_path, &bytes)
    }

    /// Load persisted lock records as a token -> record map.
    /// Missing or malformed file -> empty.
    pub fn load_locks(&self) -> HashMap<String, LockRecord> {
        let records: Vec<LockRecord> = read_json_or_default(&self.lock_path);
        records.into_iter().map(|r| (r.token.clone(), r)).collect()
    }

    /// Persist all lock records, sorted by token for deterministic output.
    pub fn save_locks(&self, locks: &HashMap<String, LockRecord>) -> Result<()> {
        let mut records: Vec<&LockRecord> = locks.values().collect();
        records.sort_by(|a, b| a.token.cmp(&b.token));

        let bytes = serde_json::to_vec_pretty(&records)
            .map_err(|e| DataVaultError::SerializationError(format!("locks: {e}")))?;
        write_atomic(&self.lock_path, &bytes)
    }
}

/// Read and deserialize a JSON file, falling back to `T::default()`
/// when the file is absent or does not parse.
fn read_json_or_default<T: serde::de::DeserializeOwned + Default>(path: &Path) -> T {
    let Ok(bytes) = fs::read(path) else {
        return T::default();
    };
    serde_json::from_slice(&bytes).unwrap_or_default()
}

/// Atomic write: temp file in the same directory, then rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.exists() {
        fs::create_dir_all(parent)?;

        // Restrict the vault directory to the owner.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o700);
            let _ = fs::set_permissions(parent, perms);
        }
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::digest_passkey;
    use chrono::Utc;
    use tempfile::TempDir;

    fn persistence(dir: &TempDir) -> Persistence {
        Persistence::new(dir.path(), "data.json", "locks.json")
    }

    #[test]
    fn missing_files_load_as_empty() {
        let dir = TempDir::new().unwrap();
        let p = persistence(&dir);

        assert!(p.load_entries().is_empty());
        assert!(p.load_locks().is_empty());
    }

    #[test]
    fn malformed_files_load_as_empty() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("data.json"), b"{not json").unwrap();
        fs::write(dir.path().join("locks.json"), b"42").unwrap();

        let p = persistence(&dir);
        assert!(p.load_entries().is_empty());
        assert!(p.load_locks().is_empty());
    }

    #[test]
    fn entries_roundtrip_in_order() {
        let dir = TempDir::new().unwrap();
        let p = persistence(&dir);

        let entries: Vec<VaultEntry> = ["b-tok", "a-tok", "c-tok"]
            .iter()
            .map(|t| VaultEntry {
                token: t.to_string(),
                passkey_digest: digest_passkey("pk"),
                owner: "owner".to_string(),
                created_at: Utc::now(),
            })
            .collect();

        p.save_entries(&entries).unwrap();
        let loaded = p.load_entries();

        let tokens: Vec<&str> = loaded.iter().map(|e| e.token.as_str()).collect();
        assert_eq!(tokens, ["b-tok", "a-tok", "c-tok"]);
    }

    #[test]
    fn locks_roundtrip() {
        let dir = TempDir::new().unwrap();
        let p = persistence(&dir);

        let mut locks = HashMap::new();
        locks.insert(
            "tok".to_string(),
            LockRecord {
                token: "tok".to_string(),
                unlock_at: Utc::now(),
            },
        );

        p.save_locks(&locks).unwrap();
        let loaded = p.load_locks();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("tok"));
    }

    #[test]
    fn save_creates_vault_dir_on_demand() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested").join("deeper");
        let p = Persistence::new(&nested, "data.json", "locks.json");

        p.save_entries(&[]).unwrap();
        assert!(nested.join("data.json").exists());
    }
}
