use serde::{Deserialize, Serialize};

pub type VariantId = i64;

/// Descriptive classification of a tag. Never consulted by grouping rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Group,
    Product,
}

/// Controls whether a tag may be dragged to another variant.
///
/// Legacy payloads encode the role as a colour: `blue` tags are movable,
/// `red` tags are anchors that only accept drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagRole {
    #[serde(alias = "blue")]
    Movable,
    #[serde(alias = "red")]
    Anchor,
}

impl std::fmt::Display for TagRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagRole::Movable => write!(f, "movable"),
            TagRole::Anchor => write!(f, "anchor"),
        }
    }
}

/// A label attached to a product variant. Tags are identified by `text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
    #[serde(alias = "type")]
    pub kind: TagKind,
    #[serde(alias = "color")]
    pub role: TagRole,
}

impl Tag {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: TagKind, role: TagRole) -> Self {
        Self {
            text: text.into(),
            kind,
            role,
        }
    }

    /// The tag a freshly split variant starts with.
    #[must_use]
    pub fn movable_product(text: impl Into<String>) -> Self {
        Self::new(text, TagKind::Product, TagRole::Movable)
    }

    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.role == TagRole::Movable
    }
}

/// The `(seller, category, brand)` triple that must match for two variants
/// to exchange tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompatibilityClass<'a> {
    pub seller: &'a str,
    pub category: &'a str,
    pub brand: &'a str,
}

impl std::fmt::Display for CompatibilityClass<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.seller, self.category, self.brand)
    }
}

/// A row of the product grouping table: one group of product listings that
/// share a seller, category and brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub serial_number: i64,
    pub seller: String,
    #[serde(alias = "eeCategory")]
    pub category: String,
    pub brand: String,
    #[serde(alias = "productTags")]
    pub tags: Vec<Tag>,
    pub grouping_logic: String,
}

impl Variant {
    #[must_use]
    pub fn compatibility_class(&self) -> CompatibilityClass<'_> {
        CompatibilityClass {
            seller: &self.seller,
            category: &self.category,
            brand: &self.brand,
        }
    }

    #[must_use]
    pub fn is_compatible_with(&self, other: &Variant) -> bool {
        self.compatibility_class() == other.compatibility_class()
    }

    #[must_use]
    pub fn has_tag(&self, text: &str) -> bool {
        self.tags.iter().any(|t| t.text == text)
    }

    /// Returns the first movable tag carrying `text`, if any.
    #[must_use]
    pub fn movable_tag(&self, text: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.text == text && t.is_movable())
    }

    /// `true` if an anchor entry carries `text`, even when a movable one does too.
    #[must_use]
    pub fn has_anchor_tag(&self, text: &str) -> bool {
        self.tags.iter().any(|t| t.text == text && !t.is_movable())
    }

    /// Removes every tag whose text equals `text`, returning how many were dropped.
    pub fn remove_tag(&mut self, text: &str) -> usize {
        let before = self.tags.len();
        self.tags.retain(|t| t.text != text);
        before - self.tags.len()
    }
}
