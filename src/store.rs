//! Cumulative key-value result of a form.
//!
//! Every step owns exactly one data key. Its fields live inside that key's
//! [`StepData`] object, so one step saving never touches another step's data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fields saved by a single step.
pub type StepData = Map<String, Value>;

/// Mergeable mapping from step data keys to the data each step saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataStore {
    entries: BTreeMap<String, StepData>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&StepData> {
        self.entries.get(key)
    }

    /// Reads a single field saved under `key`.
    pub fn field(&self, key: &str, field: &str) -> Option<&Value> {
        self.entries.get(key).and_then(|data| data.get(field))
    }

    /// Inserts or replaces the entry for `key`. Other keys are untouched.
    pub fn put(&mut self, key: impl Into<String>, data: StepData) {
        self.entries.insert(key.into(), data);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StepData)> {
        self.entries.iter().map(|(key, data)| (key.as_str(), data))
    }

    /// Folds `other` into this store; entries of `other` win on shared keys.
    pub fn merge(&mut self, other: DataStore) {
        self.entries.extend(other.entries);
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(key, data)| (key.clone(), Value::Object(data.clone())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(field: &str, value: Value) -> StepData {
        let mut data = StepData::new();
        data.insert(field.into(), value);
        data
    }

    #[test]
    fn put_overwrites_only_its_own_key() {
        let mut store = DataStore::new();
        store.put("email", entry("text", json!("a@b.c")));
        store.put("city", entry("text", json!("Berlin")));
        store.put("email", entry("text", json!("x@y.z")));

        assert_eq!(store.len(), 2);
        assert_eq!(store.field("email", "text"), Some(&json!("x@y.z")));
        assert_eq!(store.field("city", "text"), Some(&json!("Berlin")));
    }

    #[test]
    fn merge_prefers_incoming_entries_and_keeps_the_rest() {
        let mut base = DataStore::new();
        base.put("a", entry("text", json!("1")));
        base.put("b", entry("text", json!("2")));

        let mut incoming = DataStore::new();
        incoming.put("b", entry("text", json!("3")));
        incoming.put("c", entry("checked", json!(true)));

        base.merge(incoming);

        assert_eq!(base.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(base.field("b", "text"), Some(&json!("3")));
    }

    #[test]
    fn serializes_as_plain_object() {
        let mut store = DataStore::new();
        store.put("eula", entry("checked", json!(true)));

        let text = serde_json::to_string(&store).unwrap();
        assert_eq!(text, r#"{"eula":{"checked":true}}"#);

        let back: DataStore = serde_json::from_str(&text).unwrap();
        assert_eq!(back, store);
        assert_eq!(store.to_json(), json!({"eula": {"checked": true}}));
    }
}
