use crate::utils::error::{ExtensionError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field_name: &str, value: &str, reason: String) -> ExtensionError {
    ExtensionError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason,
    }
}

/// The agent can only be fetched over http(s); `field_name` names the
/// service credential the URL was built from.
pub fn validate_download_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(
            field_name,
            url_str,
            "agent download URL is empty".to_string(),
        ));
    }

    let url = Url::parse(url_str).map_err(|e| {
        invalid(
            field_name,
            url_str,
            format!("agent download URL is not absolute ({})", e),
        )
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(
            field_name,
            url_str,
            format!("agent can only be downloaded over http or https, not {}", scheme),
        )),
    }
}

/// Staging directories are handed over by the lifecycle and must name a path.
pub fn validate_staging_dir(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(invalid(
            field_name,
            path,
            "staging directory argument is empty".to_string(),
        ));
    }

    if path.contains('\0') {
        return Err(invalid(
            field_name,
            path,
            "staging directory contains a NUL byte".to_string(),
        ));
    }

    Ok(())
}

/// Dependency slots are referenced by ordinal, e.g. `%DEPS_DIR%\0`.
pub fn validate_deps_index(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            field_name,
            value,
            "dependency index must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
