// Domain layer: core models and ports (interfaces). Only std, serde and chrono.

pub mod model;
pub mod ports;
