use crate::domain::ports::Stager;
use crate::utils::error::Result;
use crate::utils::logger::begin_step;
use std::path::PathBuf;

/// Finalize phase. The agent is fully wired up during supply, so there is
/// nothing left to prepare for launch.
pub struct Finalizer<S: Stager> {
    stager: S,
    profile_dir: Option<PathBuf>,
}

impl<S: Stager> Finalizer<S> {
    pub fn new(stager: S, profile_dir: Option<PathBuf>) -> Self {
        Self { stager, profile_dir }
    }

    pub fn run(&self) -> Result<()> {
        begin_step("Configuring dynatrace-hwc-extension");
        tracing::debug!("BuildDir: {}", self.stager.build_dir().display());
        if let Some(profile_dir) = &self.profile_dir {
            tracing::debug!("ProfileDir: {}", profile_dir.display());
        }
        Ok(())
    }
}
