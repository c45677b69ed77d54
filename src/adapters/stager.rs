use crate::domain::ports::Stager;
use crate::utils::error::Result;
use crate::utils::fs::write_file;
use std::path::{Path, PathBuf};

/// Staging directories as passed on the buildpack command line.
#[derive(Debug, Clone)]
pub struct LocalStager {
    build_dir: PathBuf,
    cache_dir: PathBuf,
    deps_dir: PathBuf,
    deps_idx: String,
}

impl LocalStager {
    pub fn new(build_dir: PathBuf, cache_dir: PathBuf, deps_dir: PathBuf, deps_idx: String) -> Self {
        Self {
            build_dir,
            cache_dir,
            deps_dir,
            deps_idx,
        }
    }
}

impl Stager for LocalStager {
    fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn deps_dir(&self) -> &Path {
        &self.deps_dir
    }

    fn deps_idx(&self) -> &str {
        &self.deps_idx
    }

    fn write_profile_d(&self, name: &str, content: &str) -> Result<()> {
        let script = self.dep_dir().join("profile.d").join(name);
        tracing::debug!("Writing profile.d script {}", script.display());
        write_file(&script, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dep_dir_uses_index() {
        let stager = LocalStager::new(
            PathBuf::from("/tmp/app"),
            PathBuf::from("/tmp/cache"),
            PathBuf::from("/tmp/deps"),
            "2".to_string(),
        );
        assert_eq!(stager.dep_dir(), PathBuf::from("/tmp/deps/2"));
    }

    #[test]
    fn test_write_profile_d_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let stager = LocalStager::new(
            temp_dir.path().join("app"),
            temp_dir.path().join("cache"),
            temp_dir.path().join("deps"),
            "0".to_string(),
        );

        stager.write_profile_d("dynatrace.bat", "set A=1\n").unwrap();

        let written = temp_dir.path().join("deps/0/profile.d/dynatrace.bat");
        assert_eq!(std::fs::read_to_string(written).unwrap(), "set A=1\n");
    }
}
