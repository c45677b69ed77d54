use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ExtensionError, Result};
use std::env;
use std::path::PathBuf;

pub const VCAP_SERVICES: &str = "VCAP_SERVICES";
pub const BUILDPACK_DIR: &str = "BUILDPACK_DIR";
pub const BP_DEBUG: &str = "BP_DEBUG";

/// Platform configuration read from the staging container's environment.
#[derive(Debug, Clone, Default)]
pub struct EnvConfig;

impl EnvConfig {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigProvider for EnvConfig {
    fn vcap_services(&self) -> Option<String> {
        env::var(VCAP_SERVICES).ok()
    }

    /// `BUILDPACK_DIR`, or the buildpack root two levels above `bin/<exe>`.
    fn buildpack_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = env::var(BUILDPACK_DIR) {
            if !dir.is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        let exe = env::current_exe()?;
        exe.parent()
            .and_then(|bin| bin.parent())
            .map(PathBuf::from)
            .ok_or_else(|| ExtensionError::ConfigError {
                message: format!(
                    "Unable to determine buildpack directory from {}",
                    exe.display()
                ),
            })
    }

    fn debug_enabled(&self) -> bool {
        env::var(BP_DEBUG).map(|v| !v.is_empty()).unwrap_or(false)
    }
}
