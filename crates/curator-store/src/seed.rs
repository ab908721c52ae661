use curator_core::seed::SeedFile;
use curator_core::{NewProductSku, Variant};

use crate::{Catalog, MappingStore, SkuStore, StoreError, VariantStore};

/// Build a catalog from a validated seed file.
///
/// Records receive ids in file order, starting at 1.
///
/// # Errors
///
/// Returns [`StoreError::Validation`] if a SKU entry has a blank field.
pub fn catalog_from_seed(seed: &SeedFile) -> Result<Catalog, StoreError> {
    let mut mappings = MappingStore::default();
    for m in &seed.category_mappings {
        mappings.insert(
            m.serial_number,
            m.incoming_seller_category.clone(),
            m.ml_suggested_category.clone(),
            m.selected_category
                .clone()
                .unwrap_or_else(|| m.ml_suggested_category.clone()),
        );
    }

    let mut variants = VariantStore::new();
    for v in &seed.product_variants {
        let id = variants.next_id()?;
        variants.put(Variant {
            id,
            serial_number: v.serial_number,
            seller: v.seller.clone(),
            category: v.category.clone(),
            brand: v.brand.clone(),
            tags: v.tags.clone(),
            grouping_logic: v.grouping_logic.clone(),
        });
    }

    let mut skus = SkuStore::default();
    for s in &seed.product_skus {
        skus.insert(
            NewProductSku {
                mpn: s.mpn.clone(),
                product_name: s.product_name.clone(),
                seller: s.seller.clone(),
                brand: s.brand.clone(),
                category: s.category.clone(),
                status: Some(s.status),
            },
            s.date_uploaded,
        )?;
    }

    tracing::debug!(
        variants = variants.len(),
        mappings = mappings.len(),
        skus = skus.len(),
        "catalog seeded"
    );

    Ok(Catalog::from_stores(variants, mappings, skus))
}
