pub mod app_config;
pub mod config;
pub mod mappings;
pub mod seed;
pub mod skus;
pub mod variants;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use mappings::{CategoryMapping, MappingId};
pub use seed::{load_seed, SeedFile};
pub use skus::{NewProductSku, ProductSku, ProductSkuPatch, SkuId, SkuSortKey, SkuStatus, SortOrder};
pub use variants::{CompatibilityClass, Tag, TagKind, TagRole, Variant, VariantId};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),
    #[error("invalid seed data: {0}")]
    Validation(String),
}
