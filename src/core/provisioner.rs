use crate::domain::model::Credentials;
use crate::domain::ports::Installer;
use crate::utils::error::{ExtensionError, Result};
use crate::utils::logger::begin_step;
use crate::utils::validation::validate_download_url;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const INSTALLER_PATH: &str = "/v1/deployment/installer/agent/windows/paas/latest";
pub const AGENT_ARCHIVE_NAME: &str = "DynatraceAgent.zip";

/// Builds the agent download URL, including the `Api-Token` parameter.
///
/// A custom agent URL is used verbatim. Otherwise the installer endpoint is
/// derived from the API URL, or from the SaaS URL of the environment when no
/// API URL is configured. Optional query keys are encoded in sorted order and
/// `Api-Token` always comes last.
pub fn download_url(creds: &Credentials) -> Result<String> {
    if !creds.custom_oneagent_url.is_empty() {
        let separator = if creds.custom_oneagent_url.contains('?') { '&' } else { '?' };
        let token = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("Api-Token", &creds.paas_token)
            .finish();
        let download_url = format!("{}{}{}", creds.custom_oneagent_url, separator, token);
        validate_download_url("customoneagenturl", &download_url)?;
        return Ok(download_url);
    }

    let api_url = if creds.api_url.is_empty() {
        format!("https://{}.live.dynatrace.com/api", creds.environment_id)
    } else {
        creds.api_url.trim_end_matches('/').to_string()
    };
    let base = format!("{}{}", api_url, INSTALLER_PATH);
    validate_download_url("apiurl", &base)?;

    let mut params = BTreeMap::new();
    if !creds.network_zone.is_empty() {
        params.insert("networkzone", creds.network_zone.as_str());
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .append_pair("Api-Token", &creds.paas_token)
        .finish();

    Ok(format!("{}?{}", base, query))
}

/// Download URL with the token value masked, for logging.
pub fn redact_token(download_url: &str) -> String {
    match download_url.find("Api-Token=") {
        Some(start) => {
            let value_start = start + "Api-Token=".len();
            let value_end = download_url[value_start..]
                .find('&')
                .map(|offset| value_start + offset)
                .unwrap_or(download_url.len());
            format!(
                "{}***{}",
                &download_url[..value_start],
                &download_url[value_end..]
            )
        }
        None => download_url.to_string(),
    }
}

pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| ExtensionError::CreateDirError {
        path: path.to_path_buf(),
        source,
    })
}

/// Fetches the agent archive and unpacks it into `agent_dir`.
pub struct AgentProvisioner<'a, I: Installer> {
    installer: &'a I,
}

impl<'a, I: Installer> AgentProvisioner<'a, I> {
    pub fn new(installer: &'a I) -> Self {
        Self { installer }
    }

    pub async fn provision(
        &self,
        creds: &Credentials,
        downloads_dir: &Path,
        agent_dir: &Path,
    ) -> Result<PathBuf> {
        create_dir(downloads_dir)?;
        create_dir(agent_dir)?;

        let archive = downloads_dir.join(AGENT_ARCHIVE_NAME);
        tracing::info!("Dynatrace Agent Path: {}", agent_dir.display());

        let download_url = download_url(creds)?;

        begin_step("Downloading Dynatrace agent...");
        tracing::debug!("Downloading from [{}]", redact_token(&download_url));
        tracing::info!("Saving to [{}]", archive.display());
        self.installer.download(&download_url, &archive).await?;

        begin_step(&format!("Extracting Dynatrace Agent to {}", agent_dir.display()));
        self.installer.extract(&archive, agent_dir).await?;

        Ok(agent_dir.to_path_buf())
    }
}
