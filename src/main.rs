use clap::Parser;
use dynatrace_hwc_extension::config::{usage_exit_code, Command};
use dynatrace_hwc_extension::domain::ports::ConfigProvider;
use dynatrace_hwc_extension::utils::{logger, validation::Validate};
use dynatrace_hwc_extension::{
    CliConfig, EnvConfig, ExtensionError, Finalizer, HttpInstaller, StagingArgs, Supplier,
    SupplyOutcome,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(e) => {
            let code = usage_exit_code(&e);
            e.print()?;
            std::process::exit(code);
        }
    };
    let env_config = EnvConfig::new();

    let verbose = config.verbose || env_config.debug_enabled();
    if config.json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let result = match &config.command {
        Command::Supply(staging) => supply(staging, env_config).await,
        Command::Finalize {
            staging,
            profile_dir,
        } => validated(staging)
            .and_then(|_| Finalizer::new(staging.stager(), profile_dir.clone()).run()),
    };

    if let Err(e) = result {
        tracing::error!("Failed during step '{}': {}", e.step(), e);
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("Dynatrace HWC extension failed ({}): {}", e.step(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn validated(staging: &StagingArgs) -> Result<(), ExtensionError> {
    staging.validate().map_err(|e| {
        tracing::error!("Configuration validation failed: {}", e);
        e
    })
}

async fn supply(staging: &StagingArgs, env_config: EnvConfig) -> Result<(), ExtensionError> {
    validated(staging)?;

    let supplier = Supplier::new(env_config, staging.stager(), HttpInstaller::new()?);
    match supplier.run().await? {
        SupplyOutcome::NotBound => {
            println!("No Dynatrace service bound, skipping agent installation");
        }
        SupplyOutcome::Installed { agent_dir } => {
            println!("Dynatrace agent installed to {}", agent_dir.display());
        }
    }
    Ok(())
}
