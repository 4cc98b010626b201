// statgate-core/src/domain/quality/rules.rs
//
// The fixed battery of quality checks. Every check degrades gracefully: an
// absent column either becomes a worst-case violation (key fields) or removes
// the check from the report.

use std::collections::BTreeMap;

use crate::domain::dataset::Dataset;
use crate::domain::quality::report::{Rule, RuleKind};

/// Mean income may fall at most 80% between the last two years...
pub const MIN_YEARLY_CHANGE: f64 = -0.8;
/// ...and rise at most 300%.
pub const MAX_YEARLY_CHANGE: f64 = 3.0;

fn count_where(values: &[Option<f64>], predicate: impl Fn(f64) -> bool) -> u64 {
    values.iter().flatten().filter(|v| predicate(**v)).count() as u64
}

/// One rule per key column. An absent column implicates every row.
pub fn not_null(dataset: &Dataset, key_columns: &[&str]) -> Vec<Rule> {
    let total = dataset.num_rows() as u64;
    key_columns
        .iter()
        .map(|name| {
            let missing = dataset.missing_count(name).map_or(total, |n| n as u64);
            Rule::row_level(RuleKind::NotNull, format!("Sin nulos en {name}"), missing)
        })
        .collect()
}

pub fn month_range(dataset: &Dataset, column: &str) -> Option<Rule> {
    let months = dataset.float_values(column)?;
    let outside = count_where(&months, |m| !(1.0..=12.0).contains(&m));
    Some(Rule::row_level(
        RuleKind::MonthRange,
        "Mes entre 1 y 12",
        outside,
    ))
}

pub fn household_size(dataset: &Dataset, column: &str) -> Option<Rule> {
    let sizes = dataset.float_values(column)?;
    let non_positive = count_where(&sizes, |n| n <= 0.0);
    Some(Rule::row_level(
        RuleKind::HouseholdSize,
        "Personas > 0",
        non_positive,
    ))
}

pub fn income(dataset: &Dataset, column: &str) -> Option<Rule> {
    let incomes = dataset.float_values(column)?;
    let invalid = incomes
        .iter()
        .filter(|v| v.is_none_or(|x| x < 0.0))
        .count() as u64;
    Some(Rule::row_level(
        RuleKind::Income,
        "Ingreso total >= 0 y no nulo",
        invalid,
    ))
}

/// Relative change of mean income between the last two years, ascending by year.
///
/// Rows without a year are ignored. A year whose incomes are all missing has a
/// NaN mean, which propagates into the change. `None` below two distinct years.
pub fn yearly_mean_change(years: &[Option<i64>], incomes: &[Option<f64>]) -> Option<f64> {
    let mut by_year: BTreeMap<i64, (f64, u64)> = BTreeMap::new();
    for (year, income) in years.iter().zip(incomes) {
        let Some(year) = year else { continue };
        let (sum, count) = by_year.entry(*year).or_insert((0.0, 0));
        if let Some(income) = income {
            *sum += income;
            *count += 1;
        }
    }

    let means: Vec<f64> = by_year
        .values()
        .map(|(sum, count)| {
            if *count == 0 {
                f64::NAN
            } else {
                sum / *count as f64
            }
        })
        .collect();

    let [.., previous, last] = means.as_slice() else {
        return None;
    };
    Some((last - previous) / previous)
}

pub fn year_over_year(dataset: &Dataset, year_column: &str, income_column: &str) -> Option<Rule> {
    let years = dataset.integer_values(year_column)?;
    let incomes = dataset.float_values(income_column)?;
    let change = yearly_mean_change(&years, &incomes)?;

    // NaN compares false on both sides and passes.
    let extreme_swing = change < MIN_YEARLY_CHANGE || change > MAX_YEARLY_CHANGE;
    Some(Rule::dataset_level(
        RuleKind::YearOverYear,
        "Consistencia interanual (media ingresos)",
        !extreme_swing,
    ))
}
