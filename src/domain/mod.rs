// Domain layer: request/story models, region data and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod regions;
