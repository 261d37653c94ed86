use super::factory::AuthorizationFactory;
use crate::config::GatewayConfig;
use crate::domain::authorization::{Authorization, AuthorizationSummary, Capture, Refund};
use crate::domain::money::Amount;
use crate::domain::ports::{AuthorizationStoreRef, SaltSourceBox, SettlementNetworkBox};
use crate::error::{PaymentError, Result};
use crate::infrastructure::clock::ClockSalt;
use crate::infrastructure::in_memory::InMemoryAuthorizationStore;
use crate::infrastructure::simulator::SimulatedCardNetwork;
use crate::infrastructure::timeout::TimeoutNetwork;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::warn;

/// The main entry point for authorization processing.
///
/// `PaymentGateway` owns its collaborators (storage, card network, salt source) and
/// resolves authorization identifiers to the shared instances kept in storage. Every
/// monetary operation is delegated to the [`Authorization`] itself, which serializes
/// concurrent calls on the same identifier.
pub struct PaymentGateway {
    factory: AuthorizationFactory,
    store: AuthorizationStoreRef,
    network: SettlementNetworkBox,
    salt: SaltSourceBox,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway` instance.
    ///
    /// # Arguments
    ///
    /// * `store` - The store for live authorizations.
    /// * `network` - The card network used for captures and refunds.
    /// * `salt` - Source of identifier salts.
    /// * `decline_card` - Card number always declined at authorization time.
    pub fn new(
        store: AuthorizationStoreRef,
        network: SettlementNetworkBox,
        salt: SaltSourceBox,
        decline_card: impl Into<String>,
    ) -> Self {
        Self {
            factory: AuthorizationFactory::new(Arc::clone(&store), decline_card),
            store,
            network,
            salt,
        }
    }

    /// Wires the in-memory store, the simulated network and the clock salt from `config`.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let simulator =
            SimulatedCardNetwork::with_sentinels(config.settlement_latency(), &config.sentinels);
        let network: SettlementNetworkBox = match config.settlement_timeout() {
            Some(timeout) => Box::new(TimeoutNetwork::new(Box::new(simulator), timeout)),
            None => Box::new(simulator),
        };

        Self::new(
            Arc::new(InMemoryAuthorizationStore::new()),
            network,
            Box::new(ClockSalt::new()),
            config.sentinels.decline.clone(),
        )
    }

    /// Creates and stores an authorization from a raw JSON request, salted with a
    /// fresh value from the salt source.
    pub async fn authorize(&self, raw_request: &[u8]) -> Result<Arc<Authorization>> {
        let salt = self.salt.next_salt();
        self.factory.create(raw_request, &salt).await
    }

    pub async fn capture(&self, id: &str, amount: Decimal) -> Result<Capture> {
        let amount = Amount::new(amount)?;
        let authorization = self.fetch(id).await?;
        authorization
            .capture(amount, authorization.currency(), self.network.as_ref())
            .await
    }

    pub async fn refund(&self, id: &str, amount: Decimal) -> Result<Refund> {
        let amount = Amount::new(amount)?;
        let authorization = self.fetch(id).await?;
        authorization
            .refund(amount, authorization.currency(), self.network.as_ref())
            .await
    }

    pub async fn void(&self, id: &str) -> Result<()> {
        self.fetch(id).await?.void().await
    }

    pub async fn summary(&self, id: &str) -> Result<AuthorizationSummary> {
        Ok(self.fetch(id).await?.summary().await)
    }

    /// Looks up the shared instance stored under `id`.
    pub async fn fetch(&self, id: &str) -> Result<Arc<Authorization>> {
        match self.store.fetch(id).await? {
            Some(authorization) => Ok(authorization),
            None => {
                warn!(%id, "unknown authorization id");
                Err(PaymentError::UnknownAuthorization(id.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CAPTURE_FAILURE_CARD, REFUND_FAILURE_CARD};
    use crate::domain::ports::SaltSource;
    use crate::error::{SettlementError, StateError, ValidationError};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    struct FixedSalt;

    impl SaltSource for FixedSalt {
        fn next_salt(&self) -> String {
            "fixed".to_string()
        }
    }

    fn gateway() -> PaymentGateway {
        let config = GatewayConfig {
            settlement_latency_ms: 0,
            ..GatewayConfig::default()
        };
        PaymentGateway::from_config(&config)
    }

    fn request(number: &str) -> Vec<u8> {
        format!(
            r#"{{"credit_card":{{"number":"{number}","expiry":"12/22","cvv":"123"}},"amount":"200.00","currency":"EUR"}}"#
        )
        .into_bytes()
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let gateway = gateway();
        let auth = gateway
            .authorize(&request("4000 0000 0000 0123"))
            .await
            .unwrap();
        let id = auth.id().to_string();

        let capture = gateway.capture(&id, dec!(100.00)).await.unwrap();
        assert_eq!(capture.currency, "EUR");

        let err = gateway.capture(&id, dec!(150.00)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::State(StateError::ExceedsBalance)
        ));

        gateway.refund(&id, dec!(50.00)).await.unwrap();

        let summary = gateway.summary(&id).await.unwrap();
        assert_eq!(summary.captured, dec!(50.00));
        assert_eq!(summary.balance, dec!(150.00));
        assert!(!summary.void);
    }

    #[tokio::test]
    async fn test_each_authorize_gets_new_id() {
        let gateway = gateway();
        let body = request("4000 0000 0000 0123");
        let first = gateway.authorize(&body).await.unwrap();
        let second = gateway.authorize(&body).await.unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[tokio::test]
    async fn test_injected_salt_is_used() {
        let gateway = PaymentGateway::new(
            Arc::new(InMemoryAuthorizationStore::new()),
            Box::new(SimulatedCardNetwork::new(Duration::ZERO)),
            Box::new(FixedSalt),
            "never",
        );
        let body = request("4000 0000 0000 0123");
        let auth = gateway.authorize(&body).await.unwrap();
        assert_eq!(
            auth.id(),
            crate::application::factory::generate_id(&body, "fixed")
        );
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let gateway = gateway();
        let err = gateway.capture("missing", dec!(1)).await.unwrap_err();
        assert!(matches!(err, PaymentError::UnknownAuthorization(_)));
        let err = gateway.void("missing").await.unwrap_err();
        assert_eq!(err.to_string(), "Wrong auth Id: missing");
    }

    #[tokio::test]
    async fn test_negative_amounts_rejected() {
        let gateway = gateway();
        let auth = gateway
            .authorize(&request("4000 0000 0000 0123"))
            .await
            .unwrap();

        let err = gateway.capture(auth.id(), dec!(-1)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Validation(ValidationError::NegativeAmount)
        ));
        let err = gateway.refund(auth.id(), dec!(-1)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Validation(ValidationError::NegativeAmount)
        ));
    }

    #[tokio::test]
    async fn test_capture_failure_card() {
        let gateway = gateway();
        let auth = gateway.authorize(&request(CAPTURE_FAILURE_CARD)).await.unwrap();

        let err = gateway.capture(auth.id(), dec!(10.00)).await.unwrap_err();
        assert_eq!(err.to_string(), "Capture failure - Unknown Error");
        assert!(auth.captures().await.is_empty());
        assert_eq!(auth.balance().await, dec!(200.00));
    }

    #[tokio::test]
    async fn test_refund_failure_card() {
        let gateway = gateway();
        let auth = gateway.authorize(&request(REFUND_FAILURE_CARD)).await.unwrap();

        gateway.capture(auth.id(), dec!(10.00)).await.unwrap();
        let err = gateway.refund(auth.id(), dec!(10.00)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Settlement(SettlementError::RefundFailed)
        ));
        assert!(auth.refunds().await.is_empty());
        assert_eq!(auth.total_captured().await, dec!(10.00));
    }

    #[tokio::test]
    async fn test_void_then_capture() {
        let gateway = gateway();
        let auth = gateway
            .authorize(&request("4000 0000 0000 0123"))
            .await
            .unwrap();

        gateway.void(auth.id()).await.unwrap();
        let err = gateway.capture(auth.id(), dec!(1.00)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::State(StateError::Voided { .. })
        ));
    }

    #[tokio::test]
    async fn test_settlement_timeout_from_config() {
        let config = GatewayConfig {
            settlement_latency_ms: 5_000,
            settlement_timeout_ms: Some(20),
            ..GatewayConfig::default()
        };
        let gateway = PaymentGateway::from_config(&config);
        let auth = gateway
            .authorize(&request("4000 0000 0000 0123"))
            .await
            .unwrap();

        let err = gateway.capture(auth.id(), dec!(1.00)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Settlement(SettlementError::Timeout(_))
        ));
        assert!(auth.captures().await.is_empty());
    }
}
