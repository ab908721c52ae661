//! Category mapping records.

use std::collections::BTreeMap;

use curator_core::{CategoryMapping, MappingId};

use crate::{Catalog, StoreError};

#[derive(Debug)]
pub struct MappingStore {
    mappings: BTreeMap<MappingId, CategoryMapping>,
    next_id: MappingId,
}

impl Default for MappingStore {
    fn default() -> Self {
        Self {
            mappings: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MappingStore {
    /// Insert a new mapping, assigning its id.
    pub fn insert(
        &mut self,
        serial_number: i64,
        incoming_seller_category: Vec<String>,
        ml_suggested_category: String,
        selected_category: String,
    ) -> &CategoryMapping {
        let id = self.next_id;
        self.next_id += 1;
        self.mappings.entry(id).or_insert(CategoryMapping {
            id,
            serial_number,
            incoming_seller_category,
            ml_suggested_category,
            selected_category,
        })
    }

    pub fn list(&self) -> impl Iterator<Item = &CategoryMapping> {
        self.mappings.values()
    }

    /// # Errors
    ///
    /// [`StoreError::Validation`] for a blank category, or
    /// [`StoreError::MappingNotFound`].
    pub fn update_selected_category(
        &mut self,
        id: MappingId,
        selected_category: &str,
    ) -> Result<&CategoryMapping, StoreError> {
        let selected_category = selected_category.trim();
        if selected_category.is_empty() {
            return Err(StoreError::Validation(
                "selectedCategory is required".to_string(),
            ));
        }
        let mapping = self
            .mappings
            .get_mut(&id)
            .ok_or(StoreError::MappingNotFound(id))?;
        selected_category.clone_into(&mut mapping.selected_category);
        Ok(mapping)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Returns all category mappings, ordered by id.
pub async fn list_category_mappings(catalog: &Catalog) -> Vec<CategoryMapping> {
    catalog.mappings.read().await.list().cloned().collect()
}

/// # Errors
///
/// See [`MappingStore::update_selected_category`].
pub async fn update_category_mapping(
    catalog: &Catalog,
    id: MappingId,
    selected_category: &str,
) -> Result<CategoryMapping, StoreError> {
    let mut store = catalog.mappings.write().await;
    let mapping = store.update_selected_category(id, selected_category)?.clone();
    tracing::info!(
        mapping_id = id,
        selected_category = %mapping.selected_category,
        "category mapping updated"
    );
    Ok(mapping)
}

/// Acknowledge the current mappings. Nothing is persisted; returns how many
/// mappings were acknowledged.
pub async fn approve_category_mappings(catalog: &Catalog) -> usize {
    let count = catalog.mappings.read().await.len();
    tracing::info!(mappings = count, "category mappings approved");
    count
}
