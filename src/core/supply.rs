use crate::config::buildpack::BuildpackInfo;
use crate::core::detector::detect_dynatrace_service;
use crate::core::launch_script::build_profile_d;
use crate::core::procfile::resolve_procfile;
use crate::core::provisioner::{create_dir, AgentProvisioner};
use crate::core::tenant::create_standalone_file;
use crate::domain::model::SupplyOutcome;
use crate::domain::ports::{ConfigProvider, Installer, Stager};
use crate::utils::error::Result;
use crate::utils::logger::begin_step;

pub const AGENT_DIR_NAME: &str = "dynatrace";
pub const DOWNLOADS_DIR_NAME: &str = "downloads";

/// Supply phase: detect the service, install the agent and wire it into the
/// app's launch environment. Each step aborts the run on failure.
pub struct Supplier<C: ConfigProvider, S: Stager, I: Installer> {
    config: C,
    stager: S,
    installer: I,
}

impl<C: ConfigProvider, S: Stager, I: Installer> Supplier<C, S, I> {
    pub fn new(config: C, stager: S, installer: I) -> Self {
        Self {
            config,
            stager,
            installer,
        }
    }

    pub async fn run(&self) -> Result<SupplyOutcome> {
        let debug = self.config.debug_enabled();
        if debug {
            tracing::debug!("HOOKS: before supply");
        }

        let outcome = self.supply().await;

        if debug {
            tracing::debug!("HOOKS: after supply ({})", if outcome.is_ok() { "ok" } else { "failed" });
        }
        outcome
    }

    async fn supply(&self) -> Result<SupplyOutcome> {
        begin_step("Supplying Dynatrace HWC Extension");
        self.log_layout();

        let vcap_services = self.config.vcap_services();
        let Some(creds) = detect_dynatrace_service(vcap_services.as_deref()) else {
            tracing::info!("No Dynatrace service to bind to...");
            return Ok(SupplyOutcome::NotBound);
        };

        begin_step("Installing Dynatrace .Net Agent");

        let buildpack_dir = self.config.buildpack_dir().map_err(|e| {
            tracing::error!("Unable to install Dynatrace: {}", e);
            e
        })?;
        tracing::info!("buildpackDir: {}", buildpack_dir.display());
        if let Some(info) = BuildpackInfo::from_dir(&buildpack_dir)? {
            tracing::info!("{} {}", info.buildpack.name, info.buildpack.version);
        }

        let cache_dir = self.stager.cache_dir();
        begin_step(&format!("Creating cache directory {}", cache_dir.display()));
        create_dir(cache_dir)?;

        let dep_dir = self.stager.dep_dir();
        let agent_dir = AgentProvisioner::new(&self.installer)
            .provision(
                &creds,
                &dep_dir.join(DOWNLOADS_DIR_NAME),
                &dep_dir.join(AGENT_DIR_NAME),
            )
            .await?;

        create_standalone_file(&agent_dir)?;
        resolve_procfile(self.stager.build_dir(), &buildpack_dir)?;
        build_profile_d(&self.stager, &agent_dir)?;

        tracing::info!("Installing Dynatrace Agent Completed.");
        Ok(SupplyOutcome::Installed { agent_dir })
    }

    fn log_layout(&self) {
        tracing::info!("BuildDir: {}", self.stager.build_dir().display());
        tracing::info!("DepDir  : {}", self.stager.dep_dir().display());
        tracing::info!("DepsIdx : {}", self.stager.deps_idx());
        tracing::info!("DepsDir : {}", self.stager.deps_dir().display());
        tracing::info!("CacheDir: {}", self.stager.cache_dir().display());
    }
}
