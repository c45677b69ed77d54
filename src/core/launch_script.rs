use crate::domain::ports::Stager;
use crate::utils::error::Result;
use std::path::Path;

pub const PROFILE_D_SCRIPT: &str = "dynatrace.bat";

const PROFILER_GUID: &str = "{B7038F67-52FC-4DA2-AB02-969B3C1EDA03}";
const LOADER_32: &str = r"dynatrace\agent\lib\oneagentloader.dll";
const LOADER_64: &str = r"dynatrace\agent\lib64\oneagentloader.dll";

/// Batch script that attaches the agent to the launched .NET process.
///
/// Loader paths are rooted at `%DEPS_DIR%`, which the platform expands at
/// launch time, so the text depends only on the dependency index.
pub fn render_profiler_settings(deps_idx: &str) -> String {
    let deps_dir = format!(r"%DEPS_DIR%\{}", deps_idx);

    [
        "set COR_ENABLE_PROFILING=1".to_string(),
        format!("set COR_PROFILER={}", PROFILER_GUID),
        "set DT_AGENTACTIVE=true".to_string(),
        "set DT_BLOCKLIST=powershell*".to_string(),
        format!(r"set COR_PROFILER_PATH_32={}\{}", deps_dir, LOADER_32),
        format!(r"set COR_PROFILER_PATH_64={}\{}", deps_dir, LOADER_64),
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}

pub fn build_profile_d<S: Stager>(stager: &S, agent_dir: &Path) -> Result<()> {
    tracing::info!("Setting environment variables for Dynatrace .net agent");
    tracing::debug!("Agent installed at {}", agent_dir.display());

    stager.write_profile_d(PROFILE_D_SCRIPT, &render_profiler_settings(stager.deps_idx()))
}
