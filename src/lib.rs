pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpInstaller, LocalStager};
pub use config::{EnvConfig, StagingArgs};
pub use crate::core::{finalize::Finalizer, supply::Supplier};
pub use domain::model::{Credentials, SupplyOutcome, TenantInfo};
pub use utils::error::{ExtensionError, Result};
