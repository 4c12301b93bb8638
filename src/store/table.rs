//! Store implementation
//!
//! HashMap-based key-value table behind a RwLock.

use std::collections::HashMap;

use parking_lot::RwLock;

use super::Value;

/// The in-memory key-value map
///
/// Each operation takes the lock once and is atomic with respect to the map;
/// readers run concurrently, writers are exclusive.
pub struct Store {
    data: RwLock<HashMap<String, Value>>,
}

impl Store {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or overwrite a key, returning the previous value if any
    pub fn set(&self, key: String, value: Value) -> Option<Value> {
        self.data.write().insert(key, value)
    }

    /// Get a value by key (read lock)
    pub fn get(&self, key: &str) -> Option<Value> {
        self.data.read().get(key).cloned()
    }

    /// Remove a key, returning the number of entries removed (0 or 1)
    pub fn delete(&self, key: &str) -> usize {
        match self.data.write().remove(key) {
            Some(_) => 1,
            None => 0,
        }
    }

    /// Check whether a key is present
    pub fn exists(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Snapshot of all keys, in no particular order
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    /// Remove every entry, returning the number removed
    pub fn clear(&self) -> usize {
        let mut data = self.data.write();
        let removed = data.len();
        data.clear();
        removed
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Snapshot of all entries, for equality checks in tests and tooling
    pub fn snapshot(&self) -> HashMap<String, Value> {
        self.data.read().clone()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_and_returns_previous() {
        let store = Store::new();
        assert_eq!(store.set("k".into(), Value::Int(1)), None);
        assert_eq!(
            store.set("k".into(), Value::Str("v".into())),
            Some(Value::Int(1))
        );
        assert_eq!(store.get("k"), Some(Value::Str("v".into())));
    }

    #[test]
    fn delete_reports_count() {
        let store = Store::new();
        store.set("k".into(), Value::Int(1));
        assert_eq!(store.delete("k"), 1);
        assert_eq!(store.delete("k"), 0);
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn clear_empties_the_map() {
        let store = Store::new();
        store.set("a".into(), Value::Int(1));
        store.set("b".into(), Value::Int(2));
        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.clear(), 0);
    }

    #[test]
    fn keys_lists_all_entries() {
        let store = Store::new();
        store.set("a".into(), Value::Int(1));
        store.set("b".into(), Value::Int(2));
        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
