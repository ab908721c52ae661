use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::skus::SkuStatus;
use crate::variants::Tag;
use crate::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct MappingSeed {
    pub serial_number: i64,
    pub incoming_seller_category: Vec<String>,
    pub ml_suggested_category: String,
    /// Defaults to the suggested category when omitted.
    pub selected_category: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VariantSeed {
    pub serial_number: i64,
    pub seller: String,
    pub category: String,
    pub brand: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub grouping_logic: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkuSeed {
    pub mpn: String,
    pub product_name: String,
    pub seller: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub status: SkuStatus,
    pub date_uploaded: DateTime<Utc>,
}

/// Initial contents of the in-memory catalog.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub category_mappings: Vec<MappingSeed>,
    #[serde(default)]
    pub product_variants: Vec<VariantSeed>,
    #[serde(default)]
    pub product_skus: Vec<SkuSeed>,
}

/// Load and validate a seed file from YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed(path: &Path) -> Result<SeedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_seed(&content)
}

/// Parse and validate seed YAML that is already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_seed(content: &str) -> Result<SeedFile, ConfigError> {
    let seed: SeedFile = serde_yaml::from_str(content)?;
    validate_seed(&seed)?;
    Ok(seed)
}

fn validate_seed(seed: &SeedFile) -> Result<(), ConfigError> {
    let mut mapping_serials = HashSet::new();
    for mapping in &seed.category_mappings {
        if !mapping_serials.insert(mapping.serial_number) {
            return Err(ConfigError::Validation(format!(
                "duplicate category mapping serial number {}",
                mapping.serial_number
            )));
        }
        if mapping.ml_suggested_category.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "category mapping {} has an empty suggested category",
                mapping.serial_number
            )));
        }
    }

    let mut variant_serials = HashSet::new();
    // tag text -> serial number of the variant that owns it
    let mut owners: HashMap<&str, i64> = HashMap::new();

    for variant in &seed.product_variants {
        let serial = variant.serial_number;
        // New groups take max + 1, which must still fit.
        if serial == i64::MAX {
            return Err(ConfigError::Validation(format!(
                "product variant serial number {serial} leaves no room for new groups"
            )));
        }
        if !variant_serials.insert(serial) {
            return Err(ConfigError::Validation(format!(
                "duplicate product variant serial number {serial}"
            )));
        }

        for (field, value) in [
            ("seller", &variant.seller),
            ("category", &variant.category),
            ("brand", &variant.brand),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "product variant {serial} has an empty {field}"
                )));
            }
        }

        for tag in &variant.tags {
            if tag.text.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "product variant {serial} has a tag with empty text"
                )));
            }
            match owners.get(tag.text.as_str()) {
                Some(&owner) if owner != serial => {
                    return Err(ConfigError::Validation(format!(
                        "tag '{}' is attached to variants {owner} and {serial}",
                        tag.text
                    )));
                }
                _ => {
                    owners.insert(&tag.text, serial);
                }
            }
        }
    }

    for sku in &seed.product_skus {
        if sku.mpn.trim().is_empty() || sku.product_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product SKU mpn and product_name must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}
