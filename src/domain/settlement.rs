use std::fmt;

/// Action requested from the card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementAction {
    Charge,
    Refund,
}

impl SettlementAction {
    /// Wire literal understood by the card network.
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementAction::Charge => "charge",
            SettlementAction::Refund => "refund",
        }
    }
}

impl fmt::Display for SettlementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub action: SettlementAction,
    pub message: String,
}

impl SettlementReceipt {
    pub fn new(action: SettlementAction, message: impl Into<String>) -> Self {
        Self {
            action,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_wire_literals() {
        assert_eq!(SettlementAction::Charge.as_str(), "charge");
        assert_eq!(SettlementAction::Refund.to_string(), "refund");
    }
}
