// Domain layer: response models and ports (interfaces). No HTTP or runtime dependencies.

pub mod model;
pub mod ports;
