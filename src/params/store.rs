//! Last-write-wins parameter store shared by every connection.

use crate::http::request::IMPORTANT_KEY;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<String, String>,
    /// Keys in the order they were first inserted
    order: Vec<String>,
}

impl Entries {
    fn insert(&mut self, key: &str, value: &str) {
        match self.values.get_mut(key) {
            Some(existing) => *existing = value.to_string(),
            None => {
                self.order.push(key.to_string());
                self.values.insert(key.to_string(), value.to_string());
            }
        }
    }

    fn remove(&mut self, key: &str) -> bool {
        if self.values.remove(key).is_none() {
            return false;
        }
        self.order.retain(|k| k != key);
        true
    }
}

/// Cloneable handle to the shared parameter map.
///
/// All access goes through one `RwLock`, so a reader never sees a key
/// without its value. Entries never expire; the map only shrinks through
/// [`ParameterStore::remove`].
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    entries: Arc<RwLock<Entries>>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites each incoming key.
    ///
    /// `important` is only taken when its value is exactly `on` or `off`;
    /// otherwise that one key is skipped and the rest of the batch applies.
    pub async fn merge(&self, params: &HashMap<String, String>) {
        let mut entries = self.entries.write().await;

        for (key, value) in params {
            if key == IMPORTANT_KEY && value != "on" && value != "off" {
                tracing::debug!(value = %value, "Ignoring invalid value for important");
                continue;
            }
            entries.insert(key, value);
        }

        tracing::debug!(merged = params.len(), total = entries.values.len(), "Parameters merged");
    }

    /// Deletes `key`, returning whether it was present.
    pub async fn remove(&self, key: &str) -> bool {
        let removed = self.entries.write().await.remove(key);
        if removed {
            tracing::info!(key = %key, "Parameter removed");
        }
        removed
    }

    /// Consistent copy of every entry, in first-insertion order.
    ///
    /// A key that was removed and later re-added sorts as newly inserted.
    pub async fn snapshot(&self) -> Vec<(String, String)> {
        let entries = self.entries.read().await;
        entries
            .order
            .iter()
            .filter_map(|k| entries.values.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.entries.read().await.values.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.values.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.values.is_empty()
    }
}
