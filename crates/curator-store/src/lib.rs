use std::sync::Arc;

use curator_core::{MappingId, SkuId, VariantId};
use thiserror::Error;
use tokio::sync::RwLock;

pub mod grouping;
pub mod mappings;
pub mod seed;
pub mod skus;
pub mod variant_store;
pub mod variants;

pub use grouping::{MoveOutcome, MoveReport, SplitReport};
pub use mappings::{
    approve_category_mappings, list_category_mappings, update_category_mapping, MappingStore,
};
pub use seed::catalog_from_seed;
pub use skus::{
    create_product_sku, list_product_skus, update_product_sku, SkuListFilters, SkuPage, SkuStore,
};
pub use variant_store::VariantStore;
pub use variants::{
    approve_groupings, get_variant, list_variants, move_tag, replace_variant_tags, split_group,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("product variant {0} not found")]
    VariantNotFound(VariantId),
    #[error("no product variant carries tag '{0}'")]
    TagNotFound(String),
    #[error("product variant {variant_id} does not carry tag '{tag}'")]
    TagNotOnVariant { variant_id: VariantId, tag: String },
    #[error("category mapping {0} not found")]
    MappingNotFound(MappingId),
    #[error("product SKU {0} not found")]
    SkuNotFound(SkuId),
    #[error("cannot move tag '{tag}' onto its own product variant {variant_id}")]
    SelfMove { variant_id: VariantId, tag: String },
    #[error(
        "product variants {from_id} ({from_class}) and {to_id} ({to_class}) must share seller, category and brand"
    )]
    IncompatibleAttributes {
        from_id: VariantId,
        to_id: VariantId,
        from_class: String,
        to_class: String,
    },
    #[error("tag '{0}' is an anchor and cannot be moved")]
    AnchorTag(String),
    #[error("{0}")]
    Validation(String),
}

/// Coarse classification of a [`StoreError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidOperation,
    IncompatibleAttributes,
    Forbidden,
    ValidationError,
}

impl StoreError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::VariantNotFound(_)
            | StoreError::TagNotFound(_)
            | StoreError::TagNotOnVariant { .. }
            | StoreError::MappingNotFound(_)
            | StoreError::SkuNotFound(_) => ErrorKind::NotFound,
            StoreError::SelfMove { .. } => ErrorKind::InvalidOperation,
            StoreError::IncompatibleAttributes { .. } => ErrorKind::IncompatibleAttributes,
            StoreError::AnchorTag(_) => ErrorKind::Forbidden,
            StoreError::Validation(_) => ErrorKind::ValidationError,
        }
    }
}

/// Process-wide handle to the in-memory catalog.
///
/// Each store sits behind its own lock. Grouping operations take the variant
/// lock for writing once and apply every write of the operation under it, so
/// readers never see a tag half-moved.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) variants: Arc<RwLock<VariantStore>>,
    pub(crate) mappings: Arc<RwLock<MappingStore>>,
    pub(crate) skus: Arc<RwLock<SkuStore>>,
}

/// Record counts reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSummary {
    pub variants: usize,
    pub mappings: usize,
    pub skus: usize,
}

impl Catalog {
    #[must_use]
    pub fn from_stores(variants: VariantStore, mappings: MappingStore, skus: SkuStore) -> Self {
        Self {
            variants: Arc::new(RwLock::new(variants)),
            mappings: Arc::new(RwLock::new(mappings)),
            skus: Arc::new(RwLock::new(skus)),
        }
    }

    pub async fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            variants: self.variants.read().await.len(),
            mappings: self.mappings.read().await.len(),
            skus: self.skus.read().await.len(),
        }
    }
}
