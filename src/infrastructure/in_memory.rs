use crate::domain::authorization::Authorization;
use crate::domain::ports::AuthorizationStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for authorizations.
///
/// Uses `Arc<RwLock<HashMap<String, Arc<Authorization>>>>`: the map lock is held only for
/// the duration of a single get/put/delete, and readers receive the shared instance so
/// that per-authorization locking keeps working across callers.
#[derive(Default, Clone)]
pub struct InMemoryAuthorizationStore {
    authorizations: Arc<RwLock<HashMap<String, Arc<Authorization>>>>,
}

impl InMemoryAuthorizationStore {
    /// Creates a new, empty in-memory authorization store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuthorizationStore for InMemoryAuthorizationStore {
    async fn store(&self, id: &str, authorization: Arc<Authorization>) -> Result<()> {
        let mut authorizations = self.authorizations.write().await;
        authorizations.insert(id.to_string(), authorization);
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Option<Arc<Authorization>>> {
        let authorizations = self.authorizations.read().await;
        Ok(authorizations.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut authorizations = self.authorizations.write().await;
        authorizations.remove(id);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Arc<Authorization>>> {
        let authorizations = self.authorizations.read().await;
        Ok(authorizations.values().cloned().collect())
    }
}
