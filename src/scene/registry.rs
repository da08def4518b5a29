//! Deduplicating model cache.
//!
//! Scene documents routinely place the same model file dozens of times; the
//! registry guarantees at most one load per distinct path for the lifetime
//! of the owning [`Scene`](crate::scene::Scene). Entries are never reloaded
//! and never evicted; dropping the Scene releases every entry exactly once.

use std::collections::HashMap;

pub struct ModelRegistry<M> {
    entries: HashMap<String, M>,
}

impl<M> ModelRegistry<M> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Return the cached model for `path`, loading and inserting it first if
    /// this exact path string has not been seen before.
    pub fn get_or_load<E>(
        &mut self,
        path: &str,
        load: impl FnOnce() -> Result<M, E>,
    ) -> Result<&M, E> {
        if !self.entries.contains_key(path) {
            let model = load()?;
            self.entries.insert(path.to_string(), model);
        }
        Ok(&self.entries[path])
    }

    pub fn get(&self, path: &str) -> Option<&M> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M> Default for ModelRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}
