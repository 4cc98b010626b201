// statgate-core/src/application/mod.rs

pub mod catalog;
pub mod ports;
pub mod publication;

pub mod pipeline;
pub mod validation;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use statgate_core::application::{assess, release, Publisher};`
// without knowing the file layout.

pub use catalog::{ReleaseCatalog, ReleaseSummary, list_releases};
pub use pipeline::{ReleaseOutcome, SignOff, release};
pub use publication::Publisher;
pub use validation::{Assessment, assess};
