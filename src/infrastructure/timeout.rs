use crate::domain::card::Card;
use crate::domain::ports::{SettlementNetwork, SettlementNetworkBox};
use crate::domain::settlement::{SettlementAction, SettlementReceipt};
use crate::error::SettlementError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::error;

/// Bounds how long a caller waits on the wrapped network.
///
/// An elapsed timeout is reported as [`SettlementError::Timeout`]. The in-flight call is
/// dropped, so the authorization ledger is left as it was.
pub struct TimeoutNetwork {
    inner: SettlementNetworkBox,
    timeout: Duration,
}

impl TimeoutNetwork {
    pub fn new(inner: SettlementNetworkBox, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl SettlementNetwork for TimeoutNetwork {
    async fn perform(
        &self,
        card: &Card,
        action: SettlementAction,
    ) -> Result<SettlementReceipt, SettlementError> {
        match tokio::time::timeout(self.timeout, self.inner.perform(card, action)).await {
            Ok(result) => result,
            Err(_) => {
                error!(%action, timeout = ?self.timeout, "settlement timed out");
                Err(SettlementError::Timeout(self.timeout))
            }
        }
    }
}
