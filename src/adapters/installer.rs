use crate::domain::ports::Installer;
use crate::utils::error::{ExtensionError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(100);

/// Downloads the agent over HTTP and unpacks zip archives.
pub struct HttpInstaller {
    client: Client,
}

impl HttpInstaller {
    pub fn new() -> Result<Self> {
        let client = Client::builder().timeout(DOWNLOAD_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Installer for HttpInstaller {
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        // reqwest errors carry the URL, which includes the token
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        tracing::debug!("Download response status: {}", response.status());

        if response.status() != StatusCode::OK {
            return Err(ExtensionError::DownloadStatusError {
                status: response.status().to_string(),
            });
        }

        let mut out = tokio::fs::File::create(dest).await?;
        let mut written = 0usize;
        while let Some(chunk) = response.chunk().await.map_err(reqwest::Error::without_url)? {
            out.write_all(&chunk).await?;
            written += chunk.len();
        }
        out.flush().await?;

        tracing::debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(())
    }

    async fn extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        let file = std::fs::File::open(archive).map_err(zip::result::ZipError::Io)?;
        let mut zip = zip::ZipArchive::new(file).map_err(|e| {
            tracing::error!("Error Extracting Dynatrace Agent");
            e
        })?;
        tracing::debug!("Extracting {} entries", zip.len());
        zip.extract(dest)?;
        Ok(())
    }
}
