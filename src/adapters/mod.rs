// Adapters layer: concrete implementations of the staging capabilities.

pub mod installer;
pub mod stager;

pub use installer::HttpInstaller;
pub use stager::LocalStager;
