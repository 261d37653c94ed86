use super::card::Card;
use super::money::Amount;
use super::ports::SettlementNetwork;
use super::settlement::SettlementAction;
use crate::error::{Operation, Result, StateError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

/// Payload accepted when creating an authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub credit_card: Option<Card>,
    pub amount: Decimal,
    #[serde(default)]
    pub currency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationState {
    #[default]
    Open,
    Voided,
}

/// Money settled against an authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Identifier of the owning authorization.
    pub authorization_id: String,
    pub amount: Amount,
    pub currency: String,
}

/// Reversal of previously captured money.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    /// Identifier of the owning authorization.
    pub authorization_id: String,
    pub amount: Amount,
    pub currency: String,
}

/// Point-in-time view of an authorization, taken under its lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationSummary {
    pub id: String,
    pub amount: Decimal,
    pub currency: String,
    pub captured: Decimal,
    pub balance: Decimal,
    pub void: bool,
}

#[derive(Debug, Default)]
struct Ledger {
    captures: Vec<Capture>,
    refunds: Vec<Refund>,
    state: AuthorizationState,
}

// Captures are guarded by `can_capture` and refunds never exceed captures, so the gross
// sums below stay within `Decimal::MAX`.
impl Ledger {
    fn captured(&self) -> Decimal {
        self.captures.iter().map(|c| c.amount).sum::<Amount>().value()
    }

    fn refunded(&self) -> Decimal {
        self.refunds.iter().map(|r| r.amount).sum::<Amount>().value()
    }

    fn total_captured(&self) -> Decimal {
        self.captured() - self.refunded()
    }

    fn balance(&self, authorized: Amount) -> Decimal {
        authorized.value() - self.captured() + self.refunded()
    }

    fn can_capture(&self, amount: Amount) -> bool {
        self.captured().checked_add(amount.value()).is_some()
    }
}

/// A reserved claim against a card for up to a fixed amount.
///
/// The immutable part (id, card, amount, currency) is readable without locking. The
/// ledger of captures, refunds and the void flag sits behind a single async mutex which
/// every mutating operation holds for its whole body, settlement round-trip included.
/// Two concurrent captures can therefore never both pass the balance check.
#[derive(Debug)]
pub struct Authorization {
    id: String,
    card: Card,
    amount: Amount,
    currency: String,
    ledger: Mutex<Ledger>,
}

impl Authorization {
    pub fn new(
        id: impl Into<String>,
        card: Card,
        amount: Amount,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            card,
            amount,
            currency: currency.into(),
            ledger: Mutex::new(Ledger::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    /// The originally authorized amount.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Remaining capturable amount: `amount - captured + refunded`.
    pub async fn balance(&self) -> Decimal {
        self.ledger.lock().await.balance(self.amount)
    }

    /// Net captured amount: `captured - refunded`.
    pub async fn total_captured(&self) -> Decimal {
        self.ledger.lock().await.total_captured()
    }

    pub async fn state(&self) -> AuthorizationState {
        self.ledger.lock().await.state
    }

    pub async fn is_void(&self) -> bool {
        self.state().await == AuthorizationState::Voided
    }

    pub async fn captures(&self) -> Vec<Capture> {
        self.ledger.lock().await.captures.clone()
    }

    pub async fn refunds(&self) -> Vec<Refund> {
        self.ledger.lock().await.refunds.clone()
    }

    pub async fn summary(&self) -> AuthorizationSummary {
        let ledger = self.ledger.lock().await;
        AuthorizationSummary {
            id: self.id.clone(),
            amount: self.amount.value(),
            currency: self.currency.clone(),
            captured: ledger.total_captured(),
            balance: ledger.balance(self.amount),
            void: ledger.state == AuthorizationState::Voided,
        }
    }

    /// Settles `amount` against the card.
    ///
    /// Limit checks run before the card network is called; the ledger only changes once
    /// the network confirms the charge.
    pub async fn capture(
        &self,
        amount: Amount,
        currency: &str,
        network: &dyn SettlementNetwork,
    ) -> Result<Capture> {
        let mut ledger = self.ledger.lock().await;

        if ledger.state == AuthorizationState::Voided {
            warn!(id = %self.id, "capture rejected: authorization is void");
            return Err(StateError::Voided {
                operation: Operation::Capture,
            }
            .into());
        }

        if amount > self.amount {
            warn!(id = %self.id, %amount, authorized = %self.amount, "capture rejected: exceeds authorized amount");
            return Err(StateError::ExceedsAuthorized.into());
        }

        let balance = ledger.balance(self.amount);
        if amount.value() > balance {
            warn!(id = %self.id, %amount, %balance, "capture rejected: exceeds remaining balance");
            return Err(StateError::ExceedsBalance.into());
        }

        if !ledger.can_capture(amount) {
            warn!(id = %self.id, %amount, "capture rejected: ledger total would overflow");
            return Err(StateError::LedgerOverflow.into());
        }

        self.note_currency(currency);

        if let Err(err) = network.perform(&self.card, SettlementAction::Charge).await {
            error!(id = %self.id, %amount, %err, "capture settlement failed");
            return Err(err.into());
        }

        let capture = Capture {
            authorization_id: self.id.clone(),
            amount,
            currency: self.currency.clone(),
        };
        ledger.captures.push(capture.clone());

        debug!(id = %self.id, %amount, balance = %ledger.balance(self.amount), "capture applied");
        Ok(capture)
    }

    /// Returns previously captured money to the card.
    pub async fn refund(
        &self,
        amount: Amount,
        currency: &str,
        network: &dyn SettlementNetwork,
    ) -> Result<Refund> {
        let mut ledger = self.ledger.lock().await;

        if ledger.state == AuthorizationState::Voided {
            warn!(id = %self.id, "refund rejected: authorization is void");
            return Err(StateError::Voided {
                operation: Operation::Refund,
            }
            .into());
        }

        let captured = ledger.total_captured();
        if amount.value() > captured {
            warn!(id = %self.id, %amount, %captured, "refund rejected: exceeds captured amount");
            return Err(StateError::ExceedsCaptured.into());
        }

        self.note_currency(currency);

        if let Err(err) = network.perform(&self.card, SettlementAction::Refund).await {
            error!(id = %self.id, %amount, %err, "refund settlement failed");
            return Err(err.into());
        }

        let refund = Refund {
            authorization_id: self.id.clone(),
            amount,
            currency: self.currency.clone(),
        };
        ledger.refunds.push(refund.clone());

        debug!(id = %self.id, %amount, captured = %ledger.total_captured(), "refund applied");
        Ok(refund)
    }

    /// Cancels the reservation. Only possible while nothing is captured.
    pub async fn void(&self) -> Result<()> {
        let mut ledger = self.ledger.lock().await;

        if ledger.state == AuthorizationState::Voided {
            warn!(id = %self.id, "void rejected: already void");
            return Err(StateError::AlreadyVoided.into());
        }

        if ledger.total_captured() > Decimal::ZERO {
            warn!(id = %self.id, "void rejected: authorization has captures");
            return Err(StateError::HasCaptures.into());
        }

        ledger.state = AuthorizationState::Voided;
        debug!(id = %self.id, "void applied");
        Ok(())
    }

    // Currency is carried, not converted.
    fn note_currency(&self, requested: &str) {
        if !requested.is_empty() && requested != self.currency {
            debug!(id = %self.id, requested, currency = %self.currency, "ignoring requested currency");
        }
    }
}
