//! Port traits: the seams between the domain and the outside world.

pub mod catalog_port;
pub mod config_port;
pub mod export_port;
pub mod macro_port;
