//! Async entry points for product variants. Each call takes the variant
//! store's lock exactly once.

use curator_core::{Tag, Variant, VariantId};

use crate::grouping::{self, MoveReport, SplitReport};
use crate::{Catalog, StoreError};

/// Returns all product variants, ordered by id.
pub async fn list_variants(catalog: &Catalog) -> Vec<Variant> {
    catalog.variants.read().await.list().cloned().collect()
}

/// # Errors
///
/// Returns [`StoreError::VariantNotFound`] if `id` is unknown.
pub async fn get_variant(catalog: &Catalog, id: VariantId) -> Result<Variant, StoreError> {
    catalog.variants.read().await.get(id).cloned()
}

/// Atomically move a tag onto another variant. See [`grouping::move_tag`].
///
/// # Errors
///
/// Propagates the rejection from [`grouping::move_tag`]; the store is unchanged.
pub async fn move_tag(
    catalog: &Catalog,
    tag_text: &str,
    target_id: VariantId,
) -> Result<MoveReport, StoreError> {
    let mut store = catalog.variants.write().await;
    match grouping::move_tag(&mut store, tag_text, target_id) {
        Ok(report) => {
            tracing::info!(
                tag = tag_text,
                from = report.source.id,
                to = report.target.id,
                outcome = report.outcome.as_str(),
                "tag move applied"
            );
            Ok(report)
        }
        Err(e) => {
            tracing::warn!(tag = tag_text, to = target_id, error = %e, "tag move rejected");
            Err(e)
        }
    }
}

/// Split a tag into a new variant group. See [`grouping::split_group`].
///
/// # Errors
///
/// Propagates the rejection from [`grouping::split_group`]; the store is unchanged.
pub async fn split_group(
    catalog: &Catalog,
    source_id: VariantId,
    tag_text: &str,
) -> Result<SplitReport, StoreError> {
    let mut store = catalog.variants.write().await;
    match grouping::split_group(&mut store, source_id, tag_text) {
        Ok(report) => {
            tracing::info!(
                tag = tag_text,
                from = source_id,
                created = report.created.id,
                serial_number = report.created.serial_number,
                "new variant group created"
            );
            Ok(report)
        }
        Err(e) => {
            tracing::warn!(tag = tag_text, from = source_id, error = %e, "group split rejected");
            Err(e)
        }
    }
}

/// Replace a variant's tags wholesale. See [`grouping::replace_tags`].
///
/// # Errors
///
/// Propagates the rejection from [`grouping::replace_tags`].
pub async fn replace_variant_tags(
    catalog: &Catalog,
    variant_id: VariantId,
    tags: Vec<Tag>,
) -> Result<Variant, StoreError> {
    let mut store = catalog.variants.write().await;
    let variant = grouping::replace_tags(&mut store, variant_id, tags)?;
    tracing::info!(
        variant_id,
        tag_count = variant.tags.len(),
        "variant tags replaced"
    );
    Ok(variant)
}

/// Acknowledge the current grouping. Nothing is persisted; returns the number
/// of variants acknowledged.
pub async fn approve_groupings(catalog: &Catalog) -> usize {
    let count = catalog.variants.read().await.len();
    tracing::info!(variants = count, "product groupings approved");
    count
}
