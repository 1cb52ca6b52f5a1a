//! Tuning configuration persisted as RON.
//!
//! Every gameplay constant has a default matching the shipped balance; a
//! config file only needs the fields it overrides, and unknown future fields
//! are ignored so configs stay forward and backward compatible.

mod config;
mod error;

pub use config::{Config, DebugConfig, ItemConfig, NetworkConfig, PlayerConfig, TerrainConfig};
pub use error::ConfigError;
