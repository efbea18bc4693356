use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Scope, StorageError};

/// An in-process scope. Clones share the same values.
#[derive(Clone, Default)]
pub struct MemoryScope {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let scope = Self::new();
        {
            let mut values = scope.lock();
            for (k, v) in pairs {
                values.insert(k.to_string(), v.to_string());
            }
        }
        scope
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // values are plain strings, a poisoned map is still consistent
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scope for MemoryScope {
    fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.lock().insert(key.into(), value.into());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.lock().clear();
        Ok(())
    }
}
