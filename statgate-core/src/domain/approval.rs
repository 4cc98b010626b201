// statgate-core/src/domain/approval.rs

use crate::domain::quality::ValidationReport;

/// Minimum quality score (inclusive) required to publish.
pub const DEFAULT_QUALITY_THRESHOLD: f64 = 95.0;

/// Eligibility gate applied by the caller between validation and publication.
/// Kept apart from scoring so the cutoff can change without touching the rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApprovalPolicy {
    threshold: f64,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_QUALITY_THRESHOLD)
    }
}

impl ApprovalPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_eligible(&self, report: &ValidationReport) -> bool {
        self.accepts_score(report.quality_score)
    }

    /// Same gate on a bare score, e.g. one read back from a release's metadata.
    pub fn accepts_score(&self, quality_score: f64) -> bool {
        quality_score >= self.threshold
    }

    /// Points missing to reach the threshold, 0 when eligible.
    pub fn shortfall(&self, report: &ValidationReport) -> f64 {
        (self.threshold - report.quality_score).max(0.0)
    }
}

/// Eligibility under the default 95% threshold.
pub fn is_eligible(report: &ValidationReport) -> bool {
    ApprovalPolicy::default().is_eligible(report)
}
