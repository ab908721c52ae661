use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SkuId = i64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkuStatus {
    #[default]
    Saved,
    Submitted,
}

impl std::fmt::Display for SkuStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkuStatus::Saved => write!(f, "Saved"),
            SkuStatus::Submitted => write!(f, "Submitted"),
        }
    }
}

/// An enriched product SKU shown in the product enrichment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSku {
    pub id: SkuId,
    pub mpn: String,
    pub product_name: String,
    pub seller: String,
    pub brand: String,
    pub category: String,
    pub status: SkuStatus,
    pub date_uploaded: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProductSku {
    pub mpn: String,
    pub product_name: String,
    pub seller: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub status: Option<SkuStatus>,
}

/// Sparse update: `None` keeps the current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSkuPatch {
    pub mpn: Option<String>,
    pub product_name: Option<String>,
    pub seller: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub status: Option<SkuStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkuSortKey {
    Mpn,
    ProductName,
    #[default]
    DateUploaded,
    Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}
