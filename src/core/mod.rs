pub mod detector;
pub mod finalize;
pub mod launch_script;
pub mod procfile;
pub mod provisioner;
pub mod supply;
pub mod tenant;

pub use crate::domain::model::{Credentials, SupplyOutcome, TenantInfo};
pub use crate::domain::ports::{ConfigProvider, Installer, Stager};
pub use crate::utils::error::Result;
