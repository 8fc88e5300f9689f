pub mod cluster;
pub mod common;
pub mod config;
pub mod indexing;
pub mod vector;

pub use self::config::{CureConfig, CureConfigBuilder};
