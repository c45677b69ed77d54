use crate::utils::error::{ExtensionError, Result};
use std::path::Path;

pub const PROCFILE: &str = "Procfile";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcfileSource {
    App,
    Buildpack,
    Missing,
}

/// Makes sure the app has a Procfile so the platform can start `hwc`.
///
/// The app's own Procfile always wins; otherwise the buildpack default is
/// copied in. Having neither is left for the platform to resolve.
pub fn resolve_procfile(build_dir: &Path, buildpack_dir: &Path) -> Result<ProcfileSource> {
    let app_procfile = build_dir.join(PROCFILE);
    if app_procfile.try_exists().unwrap_or(false) {
        tracing::info!("Using Procfile provided in the app folder");
        return Ok(ProcfileSource::App);
    }
    tracing::info!("No Procfile found in the app folder");

    let buildpack_procfile = buildpack_dir.join(PROCFILE);
    let exists = buildpack_procfile
        .try_exists()
        .map_err(|source| ExtensionError::ProcfileError {
            path: buildpack_procfile.clone(),
            source,
        })?;

    if !exists {
        tracing::info!("No Procfile provided by the buildpack");
        return Ok(ProcfileSource::Missing);
    }

    tracing::info!("Using Procfile provided with the buildpack");
    std::fs::copy(&buildpack_procfile, &app_procfile).map_err(|source| {
        tracing::error!("Error copying Procfile provided by the buildpack");
        ExtensionError::ProcfileError {
            path: buildpack_procfile.clone(),
            source,
        }
    })?;
    tracing::info!("Copied Procfile from buildpack to app folder");

    Ok(ProcfileSource::Buildpack)
}
