//! Tag grouping rules for product variants.
//!
//! Every operation validates completely before it writes, so a rejected call
//! leaves the store untouched. Callers hold the store's write lock for the
//! duration of a call; see [`crate::variants`].

use curator_core::{Tag, Variant, VariantId};

use crate::{StoreError, VariantStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The tag left the source variant and was appended to the target.
    Moved,
    /// The target already carried the text; nothing changed.
    AlreadyPresent,
}

impl MoveOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::AlreadyPresent => "already_present",
        }
    }
}

/// State of both rows after a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub outcome: MoveOutcome,
    pub source: Variant,
    pub target: Variant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    pub source: Variant,
    pub created: Variant,
}

/// Move the movable tag `tag_text` from whichever variant holds it onto
/// `target_id`.
///
/// Checks run in this order: the text must be held somewhere, the target must
/// exist, the source must hold the text as movable and never as an anchor,
/// source and target must differ, and both must share seller, category and
/// brand. Duplicate movable entries all leave the source, so the text ends up
/// on exactly one variant.
///
/// # Errors
///
/// [`StoreError::TagNotFound`], [`StoreError::VariantNotFound`],
/// [`StoreError::AnchorTag`], [`StoreError::SelfMove`] or
/// [`StoreError::IncompatibleAttributes`].
pub fn move_tag(
    store: &mut VariantStore,
    tag_text: &str,
    target_id: VariantId,
) -> Result<MoveReport, StoreError> {
    let source = store
        .find_tag_owner(tag_text)
        .ok_or_else(|| StoreError::TagNotFound(tag_text.to_owned()))?;
    let target = store.get(target_id)?;

    let Some(tag) = source.movable_tag(tag_text).cloned() else {
        return Err(StoreError::AnchorTag(tag_text.to_owned()));
    };
    if source.has_anchor_tag(tag_text) {
        return Err(StoreError::AnchorTag(tag_text.to_owned()));
    }

    if source.id == target.id {
        return Err(StoreError::SelfMove {
            variant_id: source.id,
            tag: tag_text.to_owned(),
        });
    }

    if !source.is_compatible_with(target) {
        return Err(StoreError::IncompatibleAttributes {
            from_id: source.id,
            to_id: target.id,
            from_class: source.compatibility_class().to_string(),
            to_class: target.compatibility_class().to_string(),
        });
    }

    let mut source = source.clone();
    let mut target = target.clone();

    if target.has_tag(tag_text) {
        return Ok(MoveReport {
            outcome: MoveOutcome::AlreadyPresent,
            source,
            target,
        });
    }

    source.remove_tag(tag_text);
    target.tags.push(tag);

    store.put(source.clone());
    store.put(target.clone());

    Ok(MoveReport {
        outcome: MoveOutcome::Moved,
        source,
        target,
    })
}

/// Detach `tag_text` from `source_id` into a brand-new variant that copies the
/// source's seller, category, brand and grouping logic.
///
/// # Errors
///
/// [`StoreError::Validation`] for a blank tag, [`StoreError::VariantNotFound`],
/// [`StoreError::TagNotOnVariant`] when the source does not hold the text, or
/// [`StoreError::AnchorTag`] when any entry with that text is an anchor.
pub fn split_group(
    store: &mut VariantStore,
    source_id: VariantId,
    tag_text: &str,
) -> Result<SplitReport, StoreError> {
    if tag_text.trim().is_empty() {
        return Err(StoreError::Validation("tagText must be non-empty".to_string()));
    }

    let source = store.get(source_id)?;
    if !source.has_tag(tag_text) {
        return Err(StoreError::TagNotOnVariant {
            variant_id: source_id,
            tag: tag_text.to_owned(),
        });
    }
    if source.has_anchor_tag(tag_text) {
        return Err(StoreError::AnchorTag(tag_text.to_owned()));
    }

    let mut source = source.clone();
    let serial_number = store.next_serial_number()?;
    let id = store.next_id()?;
    source.remove_tag(tag_text);

    let created = Variant {
        id,
        serial_number,
        seller: source.seller.clone(),
        category: source.category.clone(),
        brand: source.brand.clone(),
        tags: vec![Tag::movable_product(tag_text)],
        grouping_logic: source.grouping_logic.clone(),
    };

    store.put(source.clone());
    store.put(created.clone());

    Ok(SplitReport { source, created })
}

/// Overwrite a variant's tag list wholesale.
///
/// Kept for clients that perform a move as two separate updates. It does not
/// check other variants, so callers relying on it own the cross-row
/// consistency that [`move_tag`] provides.
///
/// # Errors
///
/// [`StoreError::Validation`] if any tag text is blank, or
/// [`StoreError::VariantNotFound`].
pub fn replace_tags(
    store: &mut VariantStore,
    variant_id: VariantId,
    tags: Vec<Tag>,
) -> Result<Variant, StoreError> {
    if tags.iter().any(|t| t.text.trim().is_empty()) {
        return Err(StoreError::Validation(
            "every tag must have non-empty text".to_string(),
        ));
    }

    let mut variant = store.get(variant_id)?.clone();
    variant.tags = tags;
    store.put(variant.clone());
    Ok(variant)
}
