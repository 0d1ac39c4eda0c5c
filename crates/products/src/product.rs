use serde::{Deserialize, Serialize};

use thriftup_core::{DomainError, DomainResult, Entity, Money, ProductId};

/// Stock a listing gets when the seller does not say otherwise.
pub const DEFAULT_STOCK: u32 = 1;

/// A product listing as the storefront sees it.
///
/// Read-only from the cart's perspective: the cart stores a clone taken at
/// the moment of adding. Price and stock are unsigned, so the non-negative
/// invariants hold by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Unit price in whole rupiah.
    pub price: Money,
    pub size: Option<String>,
    pub condition: Option<String>,
    /// Image URL (hosted by the upload service).
    pub image: Option<String>,
    pub description: Option<String>,
    pub stock: u32,
    /// Seller's WhatsApp number as entered on the listing form.
    pub seller_contact: String,
}

impl Product {
    /// Minimal listing with default stock and no optional fields.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            size: None,
            condition: None,
            image: None,
            description: None,
            stock: DEFAULT_STOCK,
            seller_contact: String::new(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = non_blank(Some(size.into()));
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = non_blank(Some(condition.into()));
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_seller_contact(mut self, contact: impl Into<String>) -> Self {
        self.seller_contact = contact.into();
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Identifier as it appears in stored documents: the store's `_id` string,
/// or a numeric `id` on older seeded records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(u64),
}

impl RecordId {
    fn into_product_id(self) -> DomainResult<ProductId> {
        match self {
            RecordId::Text(s) => ProductId::new(s),
            RecordId::Number(n) => ProductId::new(n.to_string()),
        }
    }
}

/// Raw catalog document, field names as stored.
///
/// Every field is optional here; [`Product::try_from`] decides which ones
/// are required and fills defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Store key. Preferred when both keys are present.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<RecordId>,
    /// Virtual `id`, present alongside `_id` when the store serializes
    /// virtuals, or alone on older seeded records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub seller_whatsapp: Option<String>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = record
            .store_id
            .or(record.id)
            .ok_or_else(|| DomainError::invalid_id("product record has no id"))?
            .into_product_id()?;

        let name = non_blank(record.name)
            .ok_or_else(|| DomainError::validation(format!("product {id}: name is required")))?;

        let price = match record.price {
            Some(p) if p < 0 => {
                return Err(DomainError::validation(format!(
                    "product {id}: price cannot be negative"
                )));
            }
            Some(p) => Money::new(p as u64),
            None => {
                return Err(DomainError::validation(format!(
                    "product {id}: price is required"
                )));
            }
        };

        let stock = match record.stock {
            Some(s) if s < 0 => {
                return Err(DomainError::validation(format!(
                    "product {id}: stock cannot be negative"
                )));
            }
            Some(s) => u32::try_from(s).map_err(|_| {
                DomainError::validation(format!("product {id}: stock {s} is out of range"))
            })?,
            None => DEFAULT_STOCK,
        };

        Ok(Product {
            id,
            name,
            price,
            size: non_blank(record.size),
            condition: non_blank(record.condition),
            image: non_blank(record.image),
            description: non_blank(record.description),
            stock,
            seller_contact: record.seller_whatsapp.unwrap_or_default().trim().to_string(),
        })
    }
}

/// A new listing as submitted by a seller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub price: u64,
    pub size: Option<String>,
    pub condition: Option<String>,
    pub image: Option<String>,
    pub stock: Option<u32>,
    pub seller_contact: String,
}

impl ProductDraft {
    /// Validate the draft into a listing under `id`.
    ///
    /// Name and a non-zero price are required. A missing or zero stock
    /// becomes [`DEFAULT_STOCK`].
    pub fn into_product(self, id: ProductId) -> DomainResult<Product> {
        let name = non_blank(Some(self.name))
            .ok_or_else(|| DomainError::validation("name and price are required"))?;
        if self.price == 0 {
            return Err(DomainError::validation("name and price are required"));
        }

        Ok(Product {
            id,
            name,
            price: Money::new(self.price),
            size: non_blank(self.size),
            condition: non_blank(self.condition),
            image: non_blank(self.image),
            description: None,
            stock: self.stock.filter(|s| *s > 0).unwrap_or(DEFAULT_STOCK),
            seller_contact: self.seller_contact.trim().to_string(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
