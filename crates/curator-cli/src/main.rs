mod seed;
mod variants;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::{seed::SeedCommands, variants::VariantsCommands};

#[derive(Debug, Parser)]
#[command(name = "curator-cli")]
#[command(about = "Catalog curation command line interface")]
struct Cli {
    /// Seed file the catalog is loaded from
    #[arg(
        long,
        global = true,
        env = "CURATOR_SEED_PATH",
        default_value = "./config/seed.yaml"
    )]
    seed_path: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Seed file commands
    Seed {
        #[command(subcommand)]
        command: SeedCommands,
    },
    /// Product variant grouping commands
    Variants {
        #[command(subcommand)]
        command: VariantsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Seed {
            command: SeedCommands::Check { path },
        }) => seed::run_seed_check(path.as_deref().unwrap_or(cli.seed_path.as_path()))?,
        Some(Commands::Variants { command }) => {
            variants::run_variants_command(&cli.seed_path, command).await?;
        }
        None => println!("curator-cli ready; run with --help for commands"),
    }

    Ok(())
}
