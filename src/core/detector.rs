use crate::domain::model::{Credentials, ServiceBinding, ServiceDescriptor};

const DYNATRACE_SERVICE_MARKER: &str = "dynatrace";

/// Looks for a bound Dynatrace service in the raw `VCAP_SERVICES` JSON.
///
/// Missing or malformed binding metadata is the normal state for apps that
/// are not bound to Dynatrace, so it yields `None` rather than an error.
/// Every Dynatrace descriptor is checked: the first one with complete
/// credentials wins, and each incomplete one is reported and skipped.
pub fn detect_dynatrace_service(vcap_services: Option<&str>) -> Option<Credentials> {
    tracing::info!("Detecting Dynatrace...");

    let Some(raw) = vcap_services else {
        tracing::info!("VCAP_SERVICES is not set");
        return None;
    };

    let binding: ServiceBinding = match serde_json::from_str(raw) {
        Ok(binding) => binding,
        Err(e) => {
            tracing::info!("Failed to unmarshal VCAP_SERVICES");
            tracing::debug!("VCAP_SERVICES parse error: {}", e);
            return None;
        }
    };

    let mut found = None;
    for service in binding.values().flatten().flatten() {
        tracing::info!("Service name is {}", service.name);
        if !service.name.to_lowercase().contains(DYNATRACE_SERVICE_MARKER) {
            continue;
        }

        let creds = credentials_from(service);
        if !creds.is_complete() {
            tracing::warn!(
                "Incomplete credentials for {}. environment ID: {}, Paas Token: {}",
                creds.service_name,
                creds.environment_id,
                if creds.paas_token.is_empty() { "<empty>" } else { "<set>" }
            );
        } else if found.is_none() {
            found = Some(creds);
        }
    }

    if let Some(creds) = &found {
        tracing::info!("Found one matching service: {}", creds.service_name);
        tracing::debug!("skiperrors is {} for {}", creds.skip_errors, creds.service_name);
    }

    found
}

fn credentials_from(service: &ServiceDescriptor) -> Credentials {
    let query_string = |key: &str| -> String {
        service
            .credentials
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    Credentials {
        service_name: service.name.clone(),
        environment_id: query_string("environmentid"),
        api_token: query_string("apitoken"),
        api_url: query_string("apiurl"),
        custom_oneagent_url: query_string("customoneagenturl"),
        skip_errors: query_string("skiperrors") == "true",
        network_zone: query_string("networkzone"),
        paas_token: query_string("paastoken"),
    }
}
