// statgate-core/src/domain/quality/report.rs

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    NotNull,
    MonthRange,
    HouseholdSize,
    Income,
    YearOverYear,
}

/// Outcome of one quality check.
///
/// `affected_count` is `None` for dataset-level checks that cannot be counted in
/// rows (a failed year-over-year trend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub kind: RuleKind,
    pub name: String,
    pub satisfied: bool,
    pub affected_count: Option<u64>,
}

impl Rule {
    /// A row-level rule: satisfied iff no row violates it.
    pub fn row_level(kind: RuleKind, name: impl Into<String>, affected: u64) -> Self {
        Self {
            kind,
            name: name.into(),
            satisfied: affected == 0,
            affected_count: Some(affected),
        }
    }

    /// A dataset-level rule: 0 affected when satisfied, not countable otherwise.
    pub fn dataset_level(kind: RuleKind, name: impl Into<String>, satisfied: bool) -> Self {
        Self {
            kind,
            name: name.into(),
            satisfied,
            affected_count: satisfied.then_some(0),
        }
    }

    /// What this rule adds to the report's error tally.
    /// A failed dataset-level rule weighs exactly one error.
    pub fn error_contribution(&self) -> u64 {
        if self.satisfied {
            0
        } else {
            self.affected_count.unwrap_or(1)
        }
    }
}

/// Quality report of one dataset. Rules keep their evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub total_records: u64,
    pub error_count: u64,
    pub quality_score: f64,
    pub rules: Vec<Rule>,
}

impl ValidationReport {
    /// Tallies the rules. A row breaking two rules is counted twice: the tally is
    /// an estimate of implicated rows, not a deduplicated defect count.
    pub fn from_rules(total_records: u64, rules: Vec<Rule>) -> Self {
        let error_count = rules.iter().map(Rule::error_contribution).sum();
        Self {
            total_records,
            error_count,
            quality_score: quality_score(error_count, total_records),
            rules,
        }
    }

    pub fn rules_of(&self, kind: RuleKind) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.kind == kind)
    }
}

/// `max(0, 100 * (1 - errors / max(1, total)))`, rounded to 2 decimals.
pub fn quality_score(error_count: u64, total_records: u64) -> f64 {
    let ratio = error_count as f64 / total_records.max(1) as f64;
    let score = (100.0 * (1.0 - ratio)).max(0.0);
    (score * 100.0).round() / 100.0
}
