use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtensionError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Download failed: bad status: {status}")]
    DownloadStatusError { status: String },

    #[error("Download failed: {0}")]
    DownloadError(#[from] reqwest::Error),

    #[error("Error extracting Dynatrace agent: {0}")]
    ExtractError(#[from] zip::result::ZipError),

    #[error("Error opening manifest file {}: {source}", .path.display())]
    ManifestError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to write {}: {source}", .path.display())]
    WriteFileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error copying Procfile {}: {source}", .path.display())]
    ProcfileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid download URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Buildpack metadata error: {0}")]
    MetadataError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ExtensionError {
    /// Name of the staging step that produced the error.
    pub fn step(&self) -> &'static str {
        match self {
            Self::CreateDirError { .. } => "create directory",
            Self::DownloadStatusError { .. } | Self::DownloadError(_) | Self::UrlError(_) => {
                "download agent"
            }
            Self::ExtractError(_) => "extract agent",
            Self::ManifestError { .. } => "read agent manifest",
            Self::WriteFileError { .. } => "write file",
            Self::ProcfileError { .. } => "resolve Procfile",
            Self::MetadataError(_) | Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "configuration"
            }
            Self::IoError(_) => "filesystem",
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CreateDirError { .. } | Self::WriteFileError { .. } | Self::IoError(_) => {
                "Check that the staging directories are writable"
            }
            Self::DownloadStatusError { .. } => {
                "Verify the environment ID, API URL and Paas token of the Dynatrace service"
            }
            Self::DownloadError(_) | Self::UrlError(_) => {
                "Check network access from the staging container to the Dynatrace API"
            }
            Self::ExtractError(_) | Self::ManifestError { .. } => {
                "The downloaded agent archive looks corrupt; re-stage the application"
            }
            Self::ProcfileError { .. } => "Provide a Procfile in the application folder",
            Self::MetadataError(_) => "Fix or remove buildpack.toml in the buildpack folder",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the arguments passed by the staging lifecycle"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtensionError>;
