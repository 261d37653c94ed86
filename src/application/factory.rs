use crate::domain::authorization::{Authorization, AuthorizationRequest};
use crate::domain::money::Amount;
use crate::domain::ports::AuthorizationStoreRef;
use crate::error::{PaymentError, Result};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, error};

/// Builds, validates and persists new authorizations.
pub struct AuthorizationFactory {
    store: AuthorizationStoreRef,
    decline_card: String,
}

impl AuthorizationFactory {
    /// # Arguments
    ///
    /// * `store` - Where created authorizations are persisted.
    /// * `decline_card` - Card number that is always declined upfront.
    pub fn new(store: AuthorizationStoreRef, decline_card: impl Into<String>) -> Self {
        Self {
            store,
            decline_card: decline_card.into(),
        }
    }

    /// Creates an authorization from a raw JSON request.
    ///
    /// The identifier is derived from `raw_request` and `salt`, so the caller must
    /// supply a fresh salt for every request.
    pub async fn create(&self, raw_request: &[u8], salt: &str) -> Result<Arc<Authorization>> {
        let request: AuthorizationRequest = serde_json::from_slice(raw_request).map_err(|e| {
            error!(err = %e, "could not parse authorization request");
            PaymentError::MalformedRequest(e.to_string())
        })?;

        let Some(card) = request.credit_card else {
            error!("authorization request without credit card");
            return Err(PaymentError::MalformedRequest(
                "No Credit Card provided".to_string(),
            ));
        };

        if let Err(e) = card.validate() {
            error!(err = %e, "invalid credit card");
            return Err(e.into());
        }

        let amount = Amount::new(request.amount)?;

        if card.number == self.decline_card {
            error!("authorization declined by card network");
            return Err(PaymentError::AuthorizationDeclined);
        }

        let id = generate_id(raw_request, salt);
        let authorization = Arc::new(Authorization::new(
            id.clone(),
            card,
            amount,
            request.currency,
        ));
        self.store.store(&id, Arc::clone(&authorization)).await?;

        debug!(%id, %amount, currency = authorization.currency(), "authorization created");
        Ok(authorization)
    }
}

/// Lowercase hex SHA-256 of `payload ‖ salt`.
pub fn generate_id(payload: &[u8], salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
