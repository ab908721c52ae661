//! Keyed storage for product variants.

use std::collections::BTreeMap;

use curator_core::{Variant, VariantId};

use crate::StoreError;

/// Arena of variants keyed by id. Each variant owns its tags by value.
///
/// `max_id` and `max_serial` only ever grow; `put` raises them to any id or
/// serial number it stores, so values are never handed out twice.
#[derive(Debug, Default)]
pub struct VariantStore {
    variants: BTreeMap<VariantId, Variant>,
    max_id: VariantId,
    max_serial: i64,
}

impl VariantStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`StoreError::VariantNotFound`] if `id` is unknown.
    pub fn get(&self, id: VariantId) -> Result<&Variant, StoreError> {
        self.variants
            .get(&id)
            .ok_or(StoreError::VariantNotFound(id))
    }

    /// All variants, ordered by id.
    pub fn list(&self) -> impl Iterator<Item = &Variant> {
        self.variants.values()
    }

    /// Insert or overwrite by id.
    pub fn put(&mut self, variant: Variant) {
        self.max_id = self.max_id.max(variant.id);
        self.max_serial = self.max_serial.max(variant.serial_number);
        self.variants.insert(variant.id, variant);
    }

    /// # Errors
    ///
    /// [`StoreError::Validation`] once the id space is used up.
    pub fn next_id(&mut self) -> Result<VariantId, StoreError> {
        let id = self
            .max_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Validation("product variant ids exhausted".to_string()))?;
        self.max_id = id;
        Ok(id)
    }

    /// One past the largest serial number ever stored.
    ///
    /// # Errors
    ///
    /// [`StoreError::Validation`] once the largest serial is `i64::MAX`.
    pub fn next_serial_number(&mut self) -> Result<i64, StoreError> {
        let serial = self.max_serial.checked_add(1).ok_or_else(|| {
            StoreError::Validation("product variant serial numbers exhausted".to_string())
        })?;
        self.max_serial = serial;
        Ok(serial)
    }

    /// Variant that a drag of `text` originates from.
    ///
    /// Prefers the lowest-id variant holding a movable tag with that text and
    /// falls back to any holder, so anchor-only texts still resolve.
    #[must_use]
    pub fn find_tag_owner(&self, text: &str) -> Option<&Variant> {
        self.variants
            .values()
            .find(|v| v.movable_tag(text).is_some())
            .or_else(|| self.variants.values().find(|v| v.has_tag(text)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}
