//! Enriched product SKUs and the filtered listing behind the enrichment table.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use curator_core::{
    NewProductSku, ProductSku, ProductSkuPatch, SkuId, SkuSortKey, SkuStatus, SortOrder,
};

use crate::{Catalog, StoreError};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Default)]
pub struct SkuListFilters<'a> {
    pub seller: Option<&'a str>,
    pub brand: Option<&'a str>,
    pub category: Option<&'a str>,
    pub status: Option<SkuStatus>,
    /// Case-insensitive substring match on MPN or product name.
    pub search: Option<&'a str>,
    pub sort_by: SkuSortKey,
    pub sort_order: SortOrder,
    /// 1-based page number.
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// One page of SKUs plus the number of SKUs matching the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuPage {
    pub items: Vec<ProductSku>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug)]
pub struct SkuStore {
    skus: BTreeMap<SkuId, ProductSku>,
    next_id: SkuId,
}

impl Default for SkuStore {
    fn default() -> Self {
        Self {
            skus: BTreeMap::new(),
            next_id: 1,
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation(format!("{field} must be non-empty")));
    }
    Ok(trimmed.to_owned())
}

fn matches_exact(filter: Option<&str>, value: &str) -> bool {
    filter.map_or(true, |f| f == value)
}

fn compare(a: &ProductSku, b: &ProductSku, key: SkuSortKey) -> Ordering {
    let primary = match key {
        SkuSortKey::Mpn => a.mpn.cmp(&b.mpn),
        SkuSortKey::ProductName => a.product_name.cmp(&b.product_name),
        SkuSortKey::DateUploaded => a.date_uploaded.cmp(&b.date_uploaded),
        SkuSortKey::Status => a.status.cmp(&b.status),
    };
    primary.then(a.id.cmp(&b.id))
}

impl SkuStore {
    /// Insert a validated SKU with an explicit upload time.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] if any text field is blank.
    pub fn insert(
        &mut self,
        new: NewProductSku,
        date_uploaded: DateTime<Utc>,
    ) -> Result<&ProductSku, StoreError> {
        let sku = ProductSku {
            id: self.next_id,
            mpn: require_text("mpn", &new.mpn)?,
            product_name: require_text("productName", &new.product_name)?,
            seller: require_text("seller", &new.seller)?,
            brand: require_text("brand", &new.brand)?,
            category: require_text("category", &new.category)?,
            status: new.status.unwrap_or_default(),
            date_uploaded,
        };
        self.next_id += 1;
        Ok(self.skus.entry(sku.id).or_insert(sku))
    }

    /// # Errors
    ///
    /// [`StoreError::Validation`] if a provided field is blank, or
    /// [`StoreError::SkuNotFound`].
    pub fn update(&mut self, id: SkuId, patch: ProductSkuPatch) -> Result<&ProductSku, StoreError> {
        let mpn = patch.mpn.as_deref().map(|v| require_text("mpn", v)).transpose()?;
        let product_name = patch
            .product_name
            .as_deref()
            .map(|v| require_text("productName", v))
            .transpose()?;
        let seller = patch
            .seller
            .as_deref()
            .map(|v| require_text("seller", v))
            .transpose()?;
        let brand = patch
            .brand
            .as_deref()
            .map(|v| require_text("brand", v))
            .transpose()?;
        let category = patch
            .category
            .as_deref()
            .map(|v| require_text("category", v))
            .transpose()?;

        let sku = self.skus.get_mut(&id).ok_or(StoreError::SkuNotFound(id))?;
        if let Some(v) = mpn {
            sku.mpn = v;
        }
        if let Some(v) = product_name {
            sku.product_name = v;
        }
        if let Some(v) = seller {
            sku.seller = v;
        }
        if let Some(v) = brand {
            sku.brand = v;
        }
        if let Some(v) = category {
            sku.category = v;
        }
        if let Some(v) = patch.status {
            sku.status = v;
        }
        Ok(sku)
    }

    #[must_use]
    pub fn list(&self, filters: &SkuListFilters<'_>) -> SkuPage {
        let needle = filters
            .search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut matched: Vec<&ProductSku> = self
            .skus
            .values()
            .filter(|s| matches_exact(filters.seller, &s.seller))
            .filter(|s| matches_exact(filters.brand, &s.brand))
            .filter(|s| matches_exact(filters.category, &s.category))
            .filter(|s| filters.status.map_or(true, |st| st == s.status))
            .filter(|s| {
                needle.as_deref().map_or(true, |n| {
                    s.mpn.to_lowercase().contains(n) || s.product_name.to_lowercase().contains(n)
                })
            })
            .collect();

        matched.sort_by(|a, b| {
            let ord = compare(a, b, filters.sort_by);
            match filters.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });

        let limit = filters
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = filters.page.unwrap_or(1).max(1);
        let total = matched.len();
        let items = matched
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .collect();

        SkuPage {
            items,
            total,
            page,
            limit,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skus.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skus.is_empty()
    }
}

pub async fn list_product_skus(catalog: &Catalog, filters: &SkuListFilters<'_>) -> SkuPage {
    catalog.skus.read().await.list(filters)
}

/// Create a SKU stamped with the current time.
///
/// # Errors
///
/// See [`SkuStore::insert`].
pub async fn create_product_sku(
    catalog: &Catalog,
    new: NewProductSku,
) -> Result<ProductSku, StoreError> {
    let mut store = catalog.skus.write().await;
    let sku = store.insert(new, Utc::now())?.clone();
    tracing::info!(sku_id = sku.id, mpn = %sku.mpn, "product SKU created");
    Ok(sku)
}

/// # Errors
///
/// See [`SkuStore::update`].
pub async fn update_product_sku(
    catalog: &Catalog,
    id: SkuId,
    patch: ProductSkuPatch,
) -> Result<ProductSku, StoreError> {
    let mut store = catalog.skus.write().await;
    let sku = store.update(id, patch)?.clone();
    tracing::info!(sku_id = id, status = %sku.status, "product SKU updated");
    Ok(sku)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn new_sku(mpn: &str, name: &str, seller: &str, status: SkuStatus) -> NewProductSku {
        NewProductSku {
            mpn: mpn.to_string(),
            product_name: name.to_string(),
            seller: seller.to_string(),
            brand: "Samsung".to_string(),
            category: "TV".to_string(),
            status: Some(status),
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap()
    }

    fn sample_store() -> SkuStore {
        let mut store = SkuStore::default();
        store
            .insert(new_sku("B-200", "QLED 55", "Westcoast", SkuStatus::Saved), day(2))
            .unwrap();
        store
            .insert(new_sku("A-100", "QLED 43", "Westcoast", SkuStatus::Submitted), day(1))
            .unwrap();
        store
            .insert(new_sku("C-300", "Beats Solo", "Exertis", SkuStatus::Saved), day(3))
            .unwrap();
        store
    }

    fn mpns(page: &SkuPage) -> Vec<&str> {
        page.items.iter().map(|s| s.mpn.as_str()).collect()
    }

    #[test]
    fn default_listing_is_newest_first() {
        let page = sample_store().list(&SkuListFilters::default());
        assert_eq!(mpns(&page), vec!["C-300", "B-200", "A-100"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn filters_combine_and_total_counts_matches() {
        let page = sample_store().list(&SkuListFilters {
            seller: Some("Westcoast"),
            status: Some(SkuStatus::Saved),
            ..SkuListFilters::default()
        });
        assert_eq!(mpns(&page), vec!["B-200"]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn search_is_case_insensitive_over_mpn_and_name() {
        let store = sample_store();
        let by_name = store.list(&SkuListFilters {
            search: Some("qled"),
            sort_by: SkuSortKey::Mpn,
            sort_order: SortOrder::Asc,
            ..SkuListFilters::default()
        });
        assert_eq!(mpns(&by_name), vec!["A-100", "B-200"]);

        let by_mpn = store.list(&SkuListFilters {
            search: Some("c-3"),
            ..SkuListFilters::default()
        });
        assert_eq!(mpns(&by_mpn), vec!["C-300"]);
    }

    #[test]
    fn pagination_clamps_and_skips() {
        let store = sample_store();
        let second = store.list(&SkuListFilters {
            sort_by: SkuSortKey::Mpn,
            sort_order: SortOrder::Asc,
            page: Some(2),
            limit: Some(2),
            ..SkuListFilters::default()
        });
        assert_eq!(mpns(&second), vec!["C-300"]);
        assert_eq!(second.total, 3);

        let clamped = store.list(&SkuListFilters {
            page: Some(0),
            limit: Some(0),
            ..SkuListFilters::default()
        });
        assert_eq!(clamped.page, 1);
        assert_eq!(clamped.limit, 1);
        assert_eq!(clamped.items.len(), 1);
    }

    #[test]
    fn insert_rejects_blank_fields_and_defaults_status() {
        let mut store = SkuStore::default();
        let mut blank = new_sku("X", "Y", "Z", SkuStatus::Saved);
        blank.mpn = "  ".to_string();
        assert!(matches!(
            store.insert(blank, day(1)),
            Err(StoreError::Validation(ref m)) if m.contains("mpn")
        ));

        let mut no_status = new_sku("X", "Y", "Z", SkuStatus::Submitted);
        no_status.status = None;
        let sku = store.insert(no_status, day(1)).unwrap();
        assert_eq!(sku.status, SkuStatus::Saved);
        assert_eq!(sku.id, 1);
    }

    #[test]
    fn update_is_sparse_and_validated() {
        let mut store = sample_store();
        let updated = store
            .update(
                1,
                ProductSkuPatch {
                    status: Some(SkuStatus::Submitted),
                    ..ProductSkuPatch::default()
                },
            )
            .unwrap();
        assert_eq!(updated.status, SkuStatus::Submitted);
        assert_eq!(updated.mpn, "B-200");

        assert!(matches!(
            store.update(
                1,
                ProductSkuPatch {
                    brand: Some(String::new()),
                    ..ProductSkuPatch::default()
                }
            ),
            Err(StoreError::Validation(_))
        ));
        assert_eq!(
            store.update(99, ProductSkuPatch::default()).unwrap_err(),
            StoreError::SkuNotFound(99)
        );
    }
}
