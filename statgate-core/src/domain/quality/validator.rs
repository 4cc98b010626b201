// statgate-core/src/domain/quality/validator.rs

use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::domain::dataset::Dataset;
use crate::domain::quality::report::ValidationReport;
use crate::domain::quality::rules;

/// Names of the columns the rule battery looks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExpectedColumns {
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub year: String,
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub month: String,
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub household_id: String,
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub household_size: String,
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub income: String,
}

impl Default for ExpectedColumns {
    fn default() -> Self {
        Self {
            year: "anio".to_string(),
            month: "mes".to_string(),
            household_id: "hogar_id".to_string(),
            household_size: "personas".to_string(),
            income: "ingreso_total".to_string(),
        }
    }
}

impl ExpectedColumns {
    /// Identifier columns that must never be null, in report order.
    pub fn key_columns(&self) -> [&str; 3] {
        [&self.year, &self.month, &self.household_id]
    }
}

/// Stateless rule engine. Evaluation never mutates the dataset and never fails.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    columns: ExpectedColumns,
}

impl Validator {
    pub fn new(columns: ExpectedColumns) -> Self {
        Self { columns }
    }

    pub fn evaluate(&self, dataset: &Dataset) -> ValidationReport {
        let c = &self.columns;

        let mut checks = rules::not_null(dataset, &c.key_columns());
        checks.extend(rules::month_range(dataset, &c.month));
        checks.extend(rules::household_size(dataset, &c.household_size));
        checks.extend(rules::income(dataset, &c.income));
        checks.extend(rules::year_over_year(dataset, &c.year, &c.income));

        let report = ValidationReport::from_rules(dataset.num_rows() as u64, checks);
        debug!(
            records = report.total_records,
            errors = report.error_count,
            score = report.quality_score,
            "Dataset evaluated"
        );
        report
    }
}

/// Evaluates `dataset` against the default column names.
pub fn evaluate(dataset: &Dataset) -> ValidationReport {
    Validator::default().evaluate(dataset)
}
