// Domain layer: models and the capability ports injected into the pipeline.

pub mod model;
pub mod ports;
