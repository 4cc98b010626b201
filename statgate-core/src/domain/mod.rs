pub mod approval;
pub mod dataset;
pub mod error;
pub mod project;
pub mod publication;
pub mod quality;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use approval::{ApprovalPolicy, is_eligible};
pub use dataset::Dataset;
pub use error::DomainError;
pub use publication::{PublicationMetadata, ReleaseVersion};
pub use quality::{Rule, RuleKind, ValidationReport, Validator, evaluate};
