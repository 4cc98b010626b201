// statgate-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Dataset Error: {0}")]
    #[diagnostic(
        code(statgate::domain::dataset),
        help("The record batches could not be assembled into a single table.")
    )]
    DatasetError(String),

    #[error("No free release name left for version '{version}' after {attempts} attempts")]
    #[diagnostic(
        code(statgate::domain::release_name),
        help("Too many releases were published within the same second. Retry in a moment.")
    )]
    ReleaseNameExhausted { version: String, attempts: u32 },
}
