use std::collections::HashMap;
use std::sync::RwLock;

use super::{CacheError, ResultCache};

/// In-process result cache for tests/dev.
#[derive(Debug)]
pub struct InMemoryResultCache {
    inner: RwLock<HashMap<String, f64>>,
}

impl InMemoryResultCache {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ResultCache for InMemoryResultCache {
    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<f64>, CacheError> {
        let map = self
            .inner
            .read()
            .map_err(|_| CacheError::Command("lock poisoned".to_string()))?;
        Ok(map.get(key).copied())
    }

    async fn set(&self, key: &str, value: f64) -> Result<(), CacheError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| CacheError::Command("lock poisoned".to_string()))?;
        map.insert(key.to_string(), value);
        Ok(())
    }
}
