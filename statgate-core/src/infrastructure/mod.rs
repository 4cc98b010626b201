// statgate-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod bulletin;
pub mod config;
pub mod error;
pub mod fs;
