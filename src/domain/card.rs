use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Credit card details attached to an authorization.
///
/// Fields are opaque strings at this layer: no Luhn or expiry-date checks are made.
/// Missing fields deserialize as empty strings so that [`Card::validate`] reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl Card {
    pub fn new(
        number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Checks presence of every field, then that the CVV is made of decimal digits only.
    /// The first failing rule is reported.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.number.is_empty() {
            return Err(ValidationError::MissingNumber);
        }
        if self.expiry.is_empty() {
            return Err(ValidationError::MissingExpiry);
        }
        if self.cvv.is_empty() {
            return Err(ValidationError::MissingCvv);
        }
        if !self.cvv.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidCvv);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_card() {
        let card = Card::new("4000 0000 0000 0123", "12/22", "123");
        assert_eq!(card.validate(), Ok(()));
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            Card::new("", "12/22", "123").validate(),
            Err(ValidationError::MissingNumber)
        );
        assert_eq!(
            Card::new("4000 0000 0000 0123", "", "123").validate(),
            Err(ValidationError::MissingExpiry)
        );
        assert_eq!(
            Card::new("4000 0000 0000 0123", "12/22", "").validate(),
            Err(ValidationError::MissingCvv)
        );
    }

    #[test]
    fn test_first_failure_wins() {
        assert_eq!(
            Card::new("", "", "abc").validate(),
            Err(ValidationError::MissingNumber)
        );
        assert_eq!(
            Card::new("4000", "", "").validate(),
            Err(ValidationError::MissingExpiry)
        );
    }

    #[test]
    fn test_cvv_must_be_digits() {
        assert_eq!(
            Card::new("4000 0000 0000 0123", "12/22", "aaa").validate(),
            Err(ValidationError::InvalidCvv)
        );
        assert_eq!(
            Card::new("4000 0000 0000 0123", "12/22", "-12").validate(),
            Err(ValidationError::InvalidCvv)
        );
    }

    #[test]
    fn test_number_and_expiry_are_opaque() {
        assert_eq!(Card::new("aaa", "aaa", "123").validate(), Ok(()));
    }

    #[test]
    fn test_missing_json_fields_default_to_empty() {
        let card: Card = serde_json::from_str(r#"{"number": "4000", "cvv": "123"}"#).unwrap();
        assert_eq!(card.expiry, "");
        assert_eq!(card.validate(), Err(ValidationError::MissingExpiry));
    }
}
