//! In-memory entry store, keyed by ciphertext token.
//!
//! Entries are kept in insertion order for display (`list`), with a
//! token index on the side for O(1) lookup.  Tokens are effectively
//! unique — every encrypt call draws a fresh nonce — so an overwrite
//! on `put` only happens if the exact same token is reused.
//!
//! No deletion: the entry lifecycle is retain-forever for the session.

use std::collections::HashMap;

use super::entry::VaultEntry;

/// Append/lookup-only collection of vault entries.
#[derive(Debug, Default)]
pub struct VaultStore {
    /// Entries in insertion order.
    entries: Vec<VaultEntry>,

    /// token -> position in `entries`.
    index: HashMap<String, usize>,
}

impl VaultStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from previously persisted entries, preserving
    /// their order.
    pub fn from_entries(entries: Vec<VaultEntry>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.token.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Insert an entry.  A repeated token overwrites in place, keeping
    /// its original position.
    pub fn put(&mut self, entry: VaultEntry) {
        match self.index.get(&entry.token) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.token.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Look up an entry by its token.
    pub fn get(&self, token: &str) -> Option<&VaultEntry> {
        self.index.get(token).map(|&i| &self.entries[i])
    }

    /// All entries in insertion order.
    pub fn list(&self) -> &[VaultEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::digest::digest_passkey;
    use chrono::Utc;

    fn entry(token: &str, owner: &str) -> VaultEntry {
        VaultEntry {
            token: token.to_string(),
            passkey_digest: digest_passkey("pk"),
            owner: owner.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn put_and_get() {
        let mut store = VaultStore::new();
        store.put(entry("tok-a", "alice"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("tok-a").unwrap().owner, "alice");
        assert!(store.get("tok-b").is_none());
    }

    #[test]
    fn list_preserves_insertion_order() {
        let mut store = VaultStore::new();
        store.put(entry("z", "first"));
        store.put(entry("a", "second"));
        store.put(entry("m", "third"));

        let owners: Vec<&str> = store.list().iter().map(|e| e.owner.as_str()).collect();
        assert_eq!(owners, ["first", "second", "third"]);
    }

    #[test]
    fn repeated_token_overwrites_in_place() {
        let mut store = VaultStore::new();
        store.put(entry("tok", "old"));
        store.put(entry("other", "mid"));
        store.put(entry("tok", "new"));

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("tok").unwrap().owner, "new");
        // Position is kept, not re-appended.
        assert_eq!(store.list()[0].owner, "new");
    }

    #[test]
    fn from_entries_rebuilds_index() {
        let store = VaultStore::from_entries(vec![entry("t1", "a"), entry("t2", "b")]);
        assert_eq!(store.get("t2").unwrap().owner, "b");
        assert_eq!(store.list().len(), 2);
    }
}
