use super::authorization::Authorization;
use super::card::Card;
use super::settlement::{SettlementAction, SettlementReceipt};
use crate::error::{Result, SettlementError};
use async_trait::async_trait;
use std::sync::Arc;

/// Key-value storage for live authorizations.
///
/// Implementations hand out the shared instance (never a copy) so that every caller
/// mutates the same ledger. Only single-key operations are atomic.
#[async_trait]
pub trait AuthorizationStore: Send + Sync {
    async fn store(&self, id: &str, authorization: Arc<Authorization>) -> Result<()>;
    async fn fetch(&self, id: &str) -> Result<Option<Arc<Authorization>>>;
    async fn delete(&self, id: &str) -> Result<()>;
    async fn all(&self) -> Result<Vec<Arc<Authorization>>>;
}

/// The external card network that actually moves money.
#[async_trait]
pub trait SettlementNetwork: Send + Sync {
    async fn perform(
        &self,
        card: &Card,
        action: SettlementAction,
    ) -> std::result::Result<SettlementReceipt, SettlementError>;
}

/// Supplies a fresh nonce for every new authorization identifier.
pub trait SaltSource: Send + Sync {
    fn next_salt(&self) -> String;
}

/// Storage is shared between the factory (writes) and the gateway (reads).
pub type AuthorizationStoreRef = Arc<dyn AuthorizationStore>;
pub type SettlementNetworkBox = Box<dyn SettlementNetwork>;
pub type SaltSourceBox = Box<dyn SaltSource>;
