// Domain layer: the closed vocabularies and the ports the core depends on.

pub mod model;
pub mod ports;
