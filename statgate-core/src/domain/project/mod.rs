pub mod configuration;

pub use configuration::{ApprovalDefaults, ProjectConfig};
