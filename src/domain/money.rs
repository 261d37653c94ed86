use crate::error::ValidationError;
use rust_decimal::Decimal;
use std::fmt;
use std::iter::Sum;

/// A non-negative monetary amount.
///
/// Wraps `rust_decimal::Decimal` so that repeated capture/refund sequences stay exact
/// (no binary floating-point drift) and negative values never enter a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(ValidationError::NegativeAmount)
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|amount| amount.0).sum())
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(Amount::new(dec!(0.0)).is_ok());
        assert_eq!(
            Amount::new(dec!(-0.01)),
            Err(ValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_amount_sum_is_exact() {
        let parts = vec![Amount::new(dec!(0.1)).unwrap(); 30];
        let total: Amount = parts.iter().sum();
        assert_eq!(total.value(), dec!(3.0));
    }
}
