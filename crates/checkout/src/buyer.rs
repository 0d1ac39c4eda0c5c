use serde::{Deserialize, Serialize};

use thriftup_core::{DomainError, DomainResult, ValueObject};

/// Delivery details typed into the checkout form. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl ValueObject for BuyerInfo {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyerField {
    Name,
    Phone,
    Address,
}

impl core::fmt::Display for BuyerField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            BuyerField::Name => "name",
            BuyerField::Phone => "phone",
            BuyerField::Address => "address",
        })
    }
}

impl BuyerInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<BuyerField> {
        [
            (BuyerField::Name, &self.name),
            (BuyerField::Phone, &self.phone),
            (BuyerField::Address, &self.address),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn validate(&self) -> DomainResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
        Err(DomainError::validation(format!(
            "missing buyer fields: {}",
            names.join(", ")
        )))
    }
}
