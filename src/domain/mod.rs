// Domain layer: media models and the ports the picker talks through.

pub mod model;
pub mod ports;
