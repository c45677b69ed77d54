use crate::domain::model::TenantInfo;
use crate::utils::error::{ExtensionError, Result};
use crate::utils::fs::write_file;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const STANDALONE_CONF: &str = "agent/conf/standalone.conf";

/// Reads `manifest.json` from the extracted agent.
///
/// The manifest comes from the archive that was just downloaded, so malformed
/// content falls back to empty fields instead of failing the staging.
pub fn read_tenant_info(agent_dir: &Path) -> Result<TenantInfo> {
    let manifest_path = agent_dir.join(MANIFEST_FILE);
    let content = std::fs::read(&manifest_path).map_err(|source| {
        tracing::error!("Error opening manifest.json file");
        ExtensionError::ManifestError {
            path: manifest_path.clone(),
            source,
        }
    })?;

    Ok(serde_json::from_slice(&content).unwrap_or_else(|e| {
        tracing::debug!("Ignoring malformed {}: {}", manifest_path.display(), e);
        TenantInfo::default()
    }))
}

pub fn render_standalone_conf(info: &TenantInfo) -> String {
    format!(
        "tenant {}\ntenanttoken {}\nserver {}",
        info.tenant,
        info.tenant_token,
        info.communication_endpoints.join(";")
    )
}

/// Writes `agent/conf/standalone.conf`, the tenant connection file the agent
/// reads at process start.
pub fn create_standalone_file(agent_dir: &Path) -> Result<PathBuf> {
    let info = read_tenant_info(agent_dir)?;
    let standalone = agent_dir.join(STANDALONE_CONF);

    write_file(&standalone, &render_standalone_conf(&info)).map_err(|e| {
        tracing::error!("Unable to write to standalone.conf file");
        e
    })?;

    tracing::info!("Wrote {}", standalone.display());
    Ok(standalone)
}
