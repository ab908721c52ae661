//! Grouping operations run against an in-memory catalog built from the seed
//! file. Nothing is written back to disk.

use std::path::Path;

use clap::Subcommand;
use curator_core::VariantId;
use curator_store::Catalog;

#[derive(Debug, Subcommand)]
pub enum VariantsCommands {
    /// List product variants with their tags
    List,
    /// Move a tag onto another variant in memory; the seed file is not modified
    Move {
        /// Exact tag text
        #[arg(long)]
        tag: String,
        /// Target variant id
        #[arg(long)]
        to: VariantId,
    },
    /// Split a tag into a new group in memory; the seed file is not modified
    Split {
        /// Source variant id
        #[arg(long)]
        from: VariantId,
        /// Exact tag text
        #[arg(long)]
        tag: String,
    },
}

fn load_catalog(seed_path: &Path) -> anyhow::Result<Catalog> {
    let seed = curator_core::load_seed(seed_path)?;
    tracing::debug!(path = %seed_path.display(), "seed loaded");
    Ok(curator_store::catalog_from_seed(&seed)?)
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// # Errors
///
/// Returns an error if the seed cannot be loaded or the operation is rejected.
pub(crate) async fn run_variants_command(
    seed_path: &Path,
    command: VariantsCommands,
) -> anyhow::Result<()> {
    let catalog = load_catalog(seed_path)?;

    match command {
        VariantsCommands::List => {
            let variants = curator_store::list_variants(&catalog).await;
            print_json(&serde_json::to_value(variants)?)
        }
        VariantsCommands::Move { tag, to } => {
            let report = curator_store::move_tag(&catalog, &tag, to).await?;
            print_json(&serde_json::json!({
                "outcome": report.outcome.as_str(),
                "source": report.source,
                "target": report.target,
            }))
        }
        VariantsCommands::Split { from, tag } => {
            let report = curator_store::split_group(&catalog, from, &tag).await?;
            print_json(&serde_json::json!({
                "source": report.source,
                "created": report.created,
            }))
        }
    }
}
