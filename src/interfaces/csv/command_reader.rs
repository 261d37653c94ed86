use crate::domain::authorization::AuthorizationRequest;
use crate::domain::card::Card;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Authorize,
    Capture,
    Refund,
    Void,
}

/// One line of a batch script.
///
/// `auth` is a caller-chosen reference; identifiers are only known once the
/// authorization has been created.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Command {
    pub r#type: CommandType,
    pub auth: String,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub cvv: Option<String>,
}

impl Command {
    /// Builds the JSON authorization request for an `authorize` line.
    pub fn to_request_body(&self) -> Result<Vec<u8>> {
        let amount = self.amount.ok_or_else(|| {
            PaymentError::MalformedRequest(format!("missing amount for '{}'", self.auth))
        })?;
        let request = AuthorizationRequest {
            credit_card: Some(Card::new(
                self.number.clone().unwrap_or_default(),
                self.expiry.clone().unwrap_or_default(),
                self.cvv.clone().unwrap_or_default(),
            )),
            amount,
            currency: self.currency.clone().unwrap_or_default(),
        };
        serde_json::to_vec(&request).map_err(|e| PaymentError::InternalError(Box::new(e)))
    }

    /// Amount of a `capture` or `refund` line.
    pub fn required_amount(&self) -> Result<Decimal> {
        self.amount.ok_or_else(|| {
            PaymentError::MalformedRequest(format!(
                "missing amount for {:?} on '{}'",
                self.r#type, self.auth
            ))
        })
    }
}

/// Reads batch commands from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<Command>`.
/// It handles whitespace trimming and flexible record lengths automatically.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes commands.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PaymentError::from))
    }
}
