// statgate-core/src/application/pipeline.rs

use std::path::PathBuf;

use chrono::Local;
use tracing::{info, instrument, warn};

use crate::application::ports::TemplateEngine;
use crate::application::publication::Publisher;
use crate::application::validation::Assessment;
use crate::domain::approval::ApprovalPolicy;
use crate::domain::publication::PublicationMetadata;
use crate::domain::quality::ValidationReport;
use crate::error::StatgateError;

/// Who signs the release off, and what it contains.
#[derive(Debug, Clone)]
pub struct SignOff {
    pub approved_by: String,
    pub description: String,
}

#[derive(Debug)]
pub enum ReleaseOutcome {
    /// Below the threshold. Nothing was written.
    Rejected {
        report: ValidationReport,
        threshold: f64,
    },
    Published {
        report: ValidationReport,
        metadata: PublicationMetadata,
        location: PathBuf,
    },
}

impl ReleaseOutcome {
    pub fn report(&self) -> &ValidationReport {
        match self {
            ReleaseOutcome::Rejected { report, .. } | ReleaseOutcome::Published { report, .. } => {
                report
            }
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, ReleaseOutcome::Published { .. })
    }
}

/// Applies the approval gate and, when it holds, publishes the assessed dataset.
///
/// This is the only place the threshold is enforced before writing; the
/// publisher itself records whatever it is given.
#[instrument(skip_all, fields(threshold = policy.threshold(), quality = assessment.report.quality_score))]
pub fn release<R: TemplateEngine>(
    assessment: Assessment,
    policy: &ApprovalPolicy,
    publisher: &Publisher<R>,
    sign_off: SignOff,
) -> Result<ReleaseOutcome, StatgateError> {
    let Assessment { dataset, report } = assessment;

    if !policy.is_eligible(&report) {
        warn!(
            shortfall = policy.shortfall(&report),
            "Quality below threshold, release rejected"
        );
        return Ok(ReleaseOutcome::Rejected {
            report,
            threshold: policy.threshold(),
        });
    }

    let metadata = PublicationMetadata::for_report(
        &report,
        sign_off.approved_by,
        sign_off.description,
        Local::now(),
    );
    let location = publisher.publish(&dataset, &metadata)?;
    info!(location = %location.display(), "Release approved and published");

    Ok(ReleaseOutcome::Published {
        report,
        metadata,
        location,
    })
}
