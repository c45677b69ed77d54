use crate::utils::error::{ExtensionError, Result};
use std::path::Path;

/// Writes `content` to `path`, creating parent directories and replacing any
/// existing file.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    let to_error = |source| ExtensionError::WriteFileError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, content).map_err(to_error)
}
