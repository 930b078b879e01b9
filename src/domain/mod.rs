// Domain layer: the library aggregate and the ports the persistence layer plugs into.

pub mod model;
pub mod ports;
