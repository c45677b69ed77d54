pub mod buildpack;
pub mod env;

pub use env::EnvConfig;

use crate::adapters::LocalStager;
use crate::utils::error::Result;
use crate::utils::validation::{validate_deps_index, validate_staging_dir, Validate};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "dynatrace-hwc-extension")]
#[command(about = "Cloud Foundry extension buildpack injecting the Dynatrace .NET agent")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit log lines as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Install the Dynatrace agent when a Dynatrace service is bound
    Supply(StagingArgs),
    /// Finalize the droplet
    Finalize {
        #[command(flatten)]
        staging: StagingArgs,
        /// Directory for the app's profile.d scripts
        profile_dir: Option<PathBuf>,
    },
}

/// `--help` succeeds; any other argument error fails the staging step with
/// exit code 1 like every other fatal error.
#[cfg(feature = "cli")]
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Positional arguments handed over by the staging lifecycle.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(Args))]
pub struct StagingArgs {
    pub build_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub deps_dir: PathBuf,
    pub deps_idx: String,
}

impl StagingArgs {
    pub fn stager(&self) -> LocalStager {
        LocalStager::new(
            self.build_dir.clone(),
            self.cache_dir.clone(),
            self.deps_dir.clone(),
            self.deps_idx.clone(),
        )
    }
}

impl Validate for StagingArgs {
    fn validate(&self) -> Result<()> {
        validate_staging_dir("build_dir", &self.build_dir.to_string_lossy())?;
        validate_staging_dir("cache_dir", &self.cache_dir.to_string_lossy())?;
        validate_staging_dir("deps_dir", &self.deps_dir.to_string_lossy())?;
        validate_deps_index("deps_idx", &self.deps_idx)?;
        Ok(())
    }
}
