//! Environment configuration.
//!
//! | variable | default |
//! |----------|---------|
//! | `THRIFTUP_WHATSAPP_NUMBER` | `6281234567890` |
//! | `THRIFTUP_WHATSAPP_BASE_URL` | `https://wa.me` |
//! | `THRIFTUP_SERVICE_FEE` | `rate:0.10` (`none`, `rate:<fraction>`, `flat:<amount>`) |
//! | `THRIFTUP_STOCK_POLICY` | `unchecked` (or `enforce`) |

use thiserror::Error;

use thriftup_cart::StockPolicy;
use thriftup_checkout::{FeePolicy, WhatsAppLink, link::DEFAULT_BASE_URL};

pub const WHATSAPP_NUMBER_VAR: &str = "THRIFTUP_WHATSAPP_NUMBER";
pub const WHATSAPP_BASE_URL_VAR: &str = "THRIFTUP_WHATSAPP_BASE_URL";
pub const SERVICE_FEE_VAR: &str = "THRIFTUP_SERVICE_FEE";
pub const STOCK_POLICY_VAR: &str = "THRIFTUP_STOCK_POLICY";

const DEFAULT_WHATSAPP_NUMBER: &str = "6281234567890";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub channel: WhatsAppLink,
    pub fee: FeePolicy,
    pub stock_policy: StockPolicy,
}

impl StorefrontConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (the environment, a map in tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = lookup(WHATSAPP_NUMBER_VAR).unwrap_or_else(|| {
            tracing::warn!(
                "{WHATSAPP_NUMBER_VAR} not set; using placeholder destination {DEFAULT_WHATSAPP_NUMBER}"
            );
            DEFAULT_WHATSAPP_NUMBER.to_string()
        });
        let base_url =
            lookup(WHATSAPP_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let channel = WhatsAppLink::new(base_url, &number).map_err(|e| ConfigError {
            var: WHATSAPP_NUMBER_VAR,
            message: e.to_string(),
        })?;

        let fee = match lookup(SERVICE_FEE_VAR) {
            Some(raw) => raw.parse::<FeePolicy>().map_err(|e| ConfigError {
                var: SERVICE_FEE_VAR,
                message: e.to_string(),
            })?,
            None => FeePolicy::default(),
        };

        let stock_policy = match lookup(STOCK_POLICY_VAR) {
            Some(raw) => parse_stock_policy(&raw)?,
            None => StockPolicy::default(),
        };

        Ok(Self {
            channel,
            fee,
            stock_policy,
        })
    }
}

fn parse_stock_policy(raw: &str) -> Result<StockPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "unchecked" => Ok(StockPolicy::Unchecked),
        "enforce" => Ok(StockPolicy::Enforce),
        other => Err(ConfigError {
            var: STOCK_POLICY_VAR,
            message: format!("expected `unchecked` or `enforce`, got `{other}`"),
        }),
    }
}
