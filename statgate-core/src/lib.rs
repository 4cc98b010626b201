// statgate-core/src/lib.rs

// 1. Documentation is not mandatory yet
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Ports (Interfaces / Traits)
// Contracts for dataset loading.
pub mod ports;

// 2. Domain (business core)
// Dataset, quality rules, approval policy, release naming.
// Reads no files and no environment.
pub mod domain;

// 3. Infrastructure (Adapters)
// CSV via Arrow, project config files, bulletin template, atomic file writes.
pub mod infrastructure;

// 4. Application (Use Cases)
// Assessment, gated release, publication, release catalog.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::StatgateError;
