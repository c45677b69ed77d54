use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// One entry of a service group in `VCAP_SERVICES`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credentials: HashMap<String, serde_json::Value>,
}

/// `VCAP_SERVICES`: service-group name to its bound service instances.
/// Groups are kept sorted so detection visits them in a stable order; a
/// `null` group holds no instances.
pub type ServiceBinding = BTreeMap<String, Option<Vec<ServiceDescriptor>>>;

/// Unrelated services may carry `null` fields; they must not spoil the parse.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// User settings extracted from a bound Dynatrace service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub service_name: String,
    pub environment_id: String,
    pub custom_oneagent_url: String,
    pub api_token: String,
    pub paas_token: String,
    pub api_url: String,
    pub skip_errors: bool,
    pub network_zone: String,
}

impl Credentials {
    pub fn is_complete(&self) -> bool {
        (!self.environment_id.is_empty() && !self.paas_token.is_empty())
            || !self.custom_oneagent_url.is_empty()
    }
}

/// Tenant connection data shipped in the agent's `manifest.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantInfo {
    #[serde(rename = "tenantUUID")]
    pub tenant: String,
    #[serde(rename = "tenantToken")]
    pub tenant_token: String,
    #[serde(rename = "communicationEndpoints")]
    pub communication_endpoints: Vec<String>,
}

/// Result of the supply phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplyOutcome {
    NotBound,
    Installed { agent_dir: PathBuf },
}
