// statgate-core/src/application/validation.rs

use std::path::Path;

use tracing::{info, instrument};

use crate::domain::dataset::Dataset;
use crate::domain::quality::{ValidationReport, Validator};
use crate::error::StatgateError;
use crate::ports::dataset_source::DatasetSource;

/// A loaded dataset together with its quality report.
///
/// Carried between the validation and publication steps so the data that was
/// scored is exactly the data that gets published.
#[derive(Debug, Clone)]
pub struct Assessment {
    pub dataset: Dataset,
    pub report: ValidationReport,
}

/// Loads `input` through `source` and evaluates it.
///
/// Only the loader can fail; a dataset that loads always gets a report.
#[instrument(skip(source, validator), fields(input = %input.display()))]
pub fn assess<S: DatasetSource>(
    source: &S,
    validator: &Validator,
    input: &Path,
) -> Result<Assessment, StatgateError> {
    let dataset = source.load(input)?;
    let report = validator.evaluate(&dataset);
    info!(
        records = report.total_records,
        errors = report.error_count,
        quality = report.quality_score,
        "Dataset assessed"
    );
    Ok(Assessment { dataset, report })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::{ExpectedColumns, RuleKind};
    use crate::infrastructure::adapters::CsvSource;
    use crate::infrastructure::error::InfrastructureError;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_assess_clean_file() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("encuesta.csv");
        fs::write(
            &input,
            "anio,mes,hogar_id,personas,ingreso_total\n2024,1,H1,3,1500\n2024,2,H2,4,1800\n",
        )?;

        let assessment = assess(&CsvSource, &Validator::default(), &input)?;

        assert_eq!(assessment.dataset.num_rows(), 2);
        assert_eq!(assessment.report.total_records, 2);
        assert_eq!(assessment.report.quality_score, 100.0);
        Ok(())
    }

    #[test]
    fn test_assess_uses_configured_columns() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("survey.csv");
        fs::write(&input, "year,month,hh,size,income\n2024,14,H1,2,100\n")?;
        let validator = Validator::new(ExpectedColumns {
            year: "year".into(),
            month: "month".into(),
            household_id: "hh".into(),
            household_size: "size".into(),
            income: "income".into(),
        });

        let assessment = assess(&CsvSource, &validator, &input)?;

        let month_rule = assessment
            .report
            .rules_of(RuleKind::MonthRange)
            .next()
            .unwrap();
        assert_eq!(month_rule.affected_count, Some(1));
        Ok(())
    }

    #[test]
    fn test_missing_input_is_a_load_error() {
        let result = assess(
            &CsvSource,
            &Validator::default(),
            Path::new("/nonexistent/encuesta.csv"),
        );
        assert!(matches!(
            result,
            Err(StatgateError::Infrastructure(InfrastructureError::Io(_)))
        ));
    }
}
