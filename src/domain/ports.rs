use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Source of the implicit platform configuration (environment in production).
pub trait ConfigProvider: Send + Sync {
    /// Raw `VCAP_SERVICES` JSON, if the platform set it.
    fn vcap_services(&self) -> Option<String>;
    fn buildpack_dir(&self) -> Result<PathBuf>;
    fn debug_enabled(&self) -> bool;
}

/// Directory layout handed over by the staging lifecycle.
pub trait Stager: Send + Sync {
    fn build_dir(&self) -> &Path;
    fn cache_dir(&self) -> &Path;
    fn deps_dir(&self) -> &Path;
    fn deps_idx(&self) -> &str;

    /// Install directory of this buildpack's dependency slot.
    fn dep_dir(&self) -> PathBuf {
        self.deps_dir().join(self.deps_idx())
    }

    /// Writes a launch-time script into the slot's `profile.d` directory.
    fn write_profile_d(&self, name: &str, content: &str) -> Result<()>;
}

#[async_trait]
pub trait Installer: Send + Sync {
    /// Downloads `url` into the file at `dest`.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
    /// Unpacks the archive at `archive` into `dest`.
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<()>;
}
