// statgate-core/src/domain/quality/mod.rs

pub mod report;
pub mod rules;
pub mod validator;

pub use report::{Rule, RuleKind, ValidationReport, quality_score};
pub use validator::{ExpectedColumns, Validator, evaluate};
