//! Service fee policy.
//!
//! Storefront variants have charged a percentage, a flat amount, or nothing.
//! The policy is configuration, not code.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use thriftup_core::{DomainError, DomainResult, Money};

const BASIS_POINTS_PER_UNIT: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FeePolicy {
    None,
    /// Percentage of the subtotal in basis points (1000 = 10%).
    Rate { basis_points: u32 },
    Flat { amount: Money },
}

impl Default for FeePolicy {
    /// 10% of the subtotal.
    fn default() -> Self {
        FeePolicy::Rate { basis_points: 1_000 }
    }
}

impl FeePolicy {
    /// Build a rate policy from a decimal fraction (`0.10` for 10%).
    pub fn from_rate(rate: f64) -> DomainResult<Self> {
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(DomainError::validation(format!(
                "service fee rate must be between 0 and 1, got {rate}"
            )));
        }
        let basis_points = (rate * f64::from(BASIS_POINTS_PER_UNIT)).round() as u32;
        Ok(FeePolicy::Rate { basis_points })
    }

    /// Fee charged on `subtotal`. Rate fees round half up to the nearest rupiah.
    pub fn fee_for(&self, subtotal: Money) -> Money {
        match *self {
            FeePolicy::None => Money::ZERO,
            FeePolicy::Flat { amount } => amount,
            FeePolicy::Rate { basis_points } => {
                let scaled = u128::from(subtotal.amount()) * u128::from(basis_points);
                let half = u128::from(BASIS_POINTS_PER_UNIT / 2);
                let fee = (scaled + half) / u128::from(BASIS_POINTS_PER_UNIT);
                Money::new(u64::try_from(fee).unwrap_or(u64::MAX))
            }
        }
    }

    /// Label for the fee line in a summary, or `None` when no fee is charged.
    pub fn label(&self) -> Option<String> {
        match *self {
            FeePolicy::None => None,
            FeePolicy::Flat { .. } => Some("Biaya Layanan".to_string()),
            FeePolicy::Rate { basis_points } => {
                Some(format!("Biaya Layanan ({})", format_percent(basis_points)))
            }
        }
    }
}

/// `1000` -> `10%`, `250` -> `2,5%`, `1234` -> `12,34%` (id-ID decimal comma).
fn format_percent(basis_points: u32) -> String {
    let whole = basis_points / 100;
    let frac = basis_points % 100;
    if frac == 0 {
        format!("{whole}%")
    } else if frac % 10 == 0 {
        format!("{whole},{}%", frac / 10)
    } else {
        format!("{whole},{frac:02}%")
    }
}

impl FromStr for FeePolicy {
    type Err = DomainError;

    /// Accepts `none`, `rate:<fraction>` or `flat:<amount>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(FeePolicy::None);
        }
        let (kind, value) = s
            .split_once(':')
            .ok_or_else(|| DomainError::validation(format!("unrecognized fee policy: {s}")))?;
        match kind.trim().to_ascii_lowercase().as_str() {
            "rate" => {
                let rate: f64 = value.trim().parse().map_err(|_| {
                    DomainError::validation(format!("invalid fee rate: {value}"))
                })?;
                FeePolicy::from_rate(rate)
            }
            "flat" => {
                let amount: u64 = value.trim().parse().map_err(|_| {
                    DomainError::validation(format!("invalid flat fee: {value}"))
                })?;
                Ok(FeePolicy::Flat {
                    amount: Money::new(amount),
                })
            }
            other => Err(DomainError::validation(format!(
                "unrecognized fee policy: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_percent_of_subtotal() {
        let fee = FeePolicy::from_rate(0.10).unwrap();
        assert_eq!(fee, FeePolicy::default());
        assert_eq!(fee.fee_for(Money::new(550_000)), Money::new(55_000));
    }

    #[test]
    fn rate_fee_rounds_half_up() {
        let fee = FeePolicy::Rate { basis_points: 1_000 };
        assert_eq!(fee.fee_for(Money::new(15)), Money::new(2));
        assert_eq!(fee.fee_for(Money::new(14)), Money::new(1));
        assert_eq!(fee.fee_for(Money::ZERO), Money::ZERO);
    }

    #[test]
    fn flat_and_none() {
        let flat = FeePolicy::Flat {
            amount: Money::new(5_000),
        };
        assert_eq!(flat.fee_for(Money::new(550_000)), Money::new(5_000));
        assert_eq!(FeePolicy::None.fee_for(Money::new(550_000)), Money::ZERO);
    }

    #[test]
    fn labels() {
        assert_eq!(FeePolicy::default().label().as_deref(), Some("Biaya Layanan (10%)"));
        assert_eq!(
            FeePolicy::Rate { basis_points: 250 }.label().as_deref(),
            Some("Biaya Layanan (2,5%)")
        );
        assert_eq!(
            FeePolicy::Rate { basis_points: 1_234 }.label().as_deref(),
            Some("Biaya Layanan (12,34%)")
        );
        assert_eq!(FeePolicy::None.label(), None);
    }

    #[test]
    fn parses_from_config_strings() {
        assert_eq!("none".parse::<FeePolicy>().unwrap(), FeePolicy::None);
        assert_eq!(
            "rate:0.10".parse::<FeePolicy>().unwrap(),
            FeePolicy::Rate { basis_points: 1_000 }
        );
        assert_eq!(
            "flat: 2500".parse::<FeePolicy>().unwrap(),
            FeePolicy::Flat {
                amount: Money::new(2_500)
            }
        );
        assert!("rate:1.5".parse::<FeePolicy>().is_err());
        assert!("rate:abc".parse::<FeePolicy>().is_err());
        assert!("percent:10".parse::<FeePolicy>().is_err());
        assert!("10%".parse::<FeePolicy>().is_err());
    }
}
