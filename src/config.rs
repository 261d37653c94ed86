//! Runtime configuration for the gateway.
//!
//! Everything has a default, so an empty JSON object (or no file at all) is a valid
//! configuration. Command-line flags are applied on top by the binary.

use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Card number whose authorization is always declined upfront.
pub const DECLINE_CARD: &str = "4000 0000 0000 0119";
/// Card number whose charges always fail at settlement.
pub const CAPTURE_FAILURE_CARD: &str = "4000 0000 0000 0259";
/// Card number whose refunds always fail at settlement.
pub const REFUND_FAILURE_CARD: &str = "4000 0000 0000 3238";

/// Simulated round-trip to the card network.
pub const DEFAULT_SETTLEMENT_LATENCY: Duration = Duration::from_millis(200);

/// Test card numbers that trigger deterministic failures.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SentinelCards {
    pub decline: String,
    pub capture_failure: String,
    pub refund_failure: String,
}

impl Default for SentinelCards {
    fn default() -> Self {
        Self {
            decline: DECLINE_CARD.to_string(),
            capture_failure: CAPTURE_FAILURE_CARD.to_string(),
            refund_failure: REFUND_FAILURE_CARD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub settlement_latency_ms: u64,
    /// No timeout when absent.
    pub settlement_timeout_ms: Option<u64>,
    pub sentinels: SentinelCards,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            settlement_latency_ms: DEFAULT_SETTLEMENT_LATENCY.as_millis() as u64,
            settlement_timeout_ms: None,
            sentinels: SentinelCards::default(),
        }
    }
}

impl GatewayConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_json_slice(&bytes)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| PaymentError::ConfigError(e.to_string()))
    }

    pub fn settlement_latency(&self) -> Duration {
        Duration::from_millis(self.settlement_latency_ms)
    }

    pub fn settlement_timeout(&self) -> Option<Duration> {
        self.settlement_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.settlement_latency(), Duration::from_millis(200));
        assert_eq!(config.settlement_timeout(), None);
        assert_eq!(config.sentinels.decline, DECLINE_CARD);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GatewayConfig::from_json_slice(
            br#"{"settlement_latency_ms": 5, "sentinels": {"decline": "1111"}}"#,
        )
        .unwrap();
        assert_eq!(config.settlement_latency(), Duration::from_millis(5));
        assert_eq!(config.sentinels.decline, "1111");
        assert_eq!(config.sentinels.capture_failure, CAPTURE_FAILURE_CARD);
        assert_eq!(config.sentinels.refund_failure, REFUND_FAILURE_CARD);
    }

    #[test]
    fn test_invalid_json() {
        let err = GatewayConfig::from_json_slice(b"{not json").unwrap_err();
        assert!(matches!(err, PaymentError::ConfigError(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"settlement_timeout_ms": 1000}}"#).unwrap();

        let config = GatewayConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.settlement_timeout(), Some(Duration::from_secs(1)));
    }
}
