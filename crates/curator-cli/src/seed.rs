//! Seed file validation.

use std::path::{Path, PathBuf};

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum SeedCommands {
    /// Parse and validate a seed file, then print record counts
    Check {
        /// Seed file to check (defaults to --seed-path)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Validate the seed file at `path` and print a JSON summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or fails validation.
pub(crate) fn run_seed_check(path: &Path) -> anyhow::Result<()> {
    let seed = curator_core::load_seed(path)?;
    let tags: usize = seed.product_variants.iter().map(|v| v.tags.len()).sum();

    let summary = serde_json::json!({
        "path": path.display().to_string(),
        "valid": true,
        "categoryMappings": seed.category_mappings.len(),
        "productVariants": seed.product_variants.len(),
        "tags": tags,
        "productSkus": seed.product_skus.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
