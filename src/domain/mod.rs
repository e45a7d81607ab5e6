// Domain layer: models and ports (interfaces). No filesystem or XML code here.

pub mod model;
pub mod ports;
