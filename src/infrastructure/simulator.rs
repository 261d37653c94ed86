use crate::config::SentinelCards;
use crate::domain::card::Card;
use crate::domain::ports::SettlementNetwork;
use crate::domain::settlement::{SettlementAction, SettlementReceipt};
use crate::error::SettlementError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error};

/// Stand-in for the card network.
///
/// Every call waits for a fixed latency, then succeeds unless the card is one of the
/// configured failure sentinels paired with the matching action:
///
/// * `capture_failure` card + charge fails with [`SettlementError::CaptureFailed`]
/// * `refund_failure` card + refund fails with [`SettlementError::RefundFailed`]
#[derive(Debug, Clone)]
pub struct SimulatedCardNetwork {
    latency: Duration,
    capture_failure_card: String,
    refund_failure_card: String,
}

impl SimulatedCardNetwork {
    /// Creates a simulator using the default sentinel cards.
    pub fn new(latency: Duration) -> Self {
        Self::with_sentinels(latency, &SentinelCards::default())
    }

    pub fn with_sentinels(latency: Duration, sentinels: &SentinelCards) -> Self {
        Self {
            latency,
            capture_failure_card: sentinels.capture_failure.clone(),
            refund_failure_card: sentinels.refund_failure.clone(),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl SettlementNetwork for SimulatedCardNetwork {
    async fn perform(
        &self,
        card: &Card,
        action: SettlementAction,
    ) -> Result<SettlementReceipt, SettlementError> {
        tokio::time::sleep(self.latency).await;

        match action {
            SettlementAction::Charge if card.number == self.capture_failure_card => {
                error!("simulated capture failure");
                Err(SettlementError::CaptureFailed)
            }
            SettlementAction::Refund if card.number == self.refund_failure_card => {
                error!("simulated refund failure");
                Err(SettlementError::RefundFailed)
            }
            SettlementAction::Charge => {
                debug!(%action, "settlement succeeded");
                Ok(SettlementReceipt::new(action, "Charge Successful!"))
            }
            SettlementAction::Refund => {
                debug!(%action, "settlement succeeded");
                Ok(SettlementReceipt::new(action, "Refund Successful!"))
            }
        }
    }
}
