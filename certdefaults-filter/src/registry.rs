use crate::filter::{Filter, FilterArgs};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Thread-safe filter registry.
///
/// Built once at startup, immutable thereafter. Share it behind an `Arc`.
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Register a filter. A filter with the same name is replaced.
    pub fn register(&mut self, filter: Arc<dyn Filter>) {
        let name = filter.name().to_string();
        tracing::info!(filter = %name, "Registered filter");
        self.filters.insert(name, filter);
    }

    /// Get a filter by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Filter>> {
        self.filters.get(name)
    }

    /// List all registered filter names, sorted.
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Run the filter called `name`.
    pub fn apply(&self, name: &str, input: &Value, args: &FilterArgs) -> anyhow::Result<Value> {
        let filter = self
            .get(name)
            .ok_or_else(|| anyhow::anyhow!("unknown filter '{name}'"))?;
        filter.apply(input, args)
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
