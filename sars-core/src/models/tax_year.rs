use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::models::{RebateTable, TaxBracket};

/// Errors raised when assembling a year's tables from supplied data.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// No brackets were supplied for the year.
    #[error("no tax brackets supplied for tax year {0}")]
    NoBrackets(i32),

    /// A bracket row carries a different year than the table it was added to.
    #[error("bracket for tax year {found} supplied to the {expected} table")]
    BracketYearMismatch { expected: i32, found: i32 },

    /// The rebate row carries a different year than the table it was added to.
    #[error("rebates for tax year {found} supplied to the {expected} table")]
    RebateYearMismatch { expected: i32, found: i32 },

    /// The lowest bracket does not start at zero income.
    #[error("tax year {0} has no bracket starting at zero income")]
    MissingBottomBracket(i32),

    /// Adjacent brackets do not meet, or a bracket's bounds are inverted.
    #[error("tax year {year} brackets are not contiguous at income {at}")]
    NotContiguous { year: i32, at: Decimal },

    /// The highest bracket is bounded; the top slice must be open-ended.
    #[error("tax year {0} has no open-ended top bracket")]
    MissingTopBracket(i32),

    /// A rate, threshold, base tax or rebate amount is negative.
    #[error("negative amount in the tables for tax year {0}")]
    NegativeAmount(i32),
}

/// The complete lookup tables for a single tax year: the progressive bracket
/// schedule plus the age rebates.
///
/// Construction validates the shape of the schedule (contiguous ascending
/// slices from zero to an open-ended top). It deliberately does not recompute
/// the cumulative `base_tax` figures from the thresholds and rates: SARS
/// publishes rounded values and the supplied tables are taken as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxYearTable {
    tax_year: i32,
    brackets: Vec<TaxBracket>,
    rebates: RebateTable,
}

impl TaxYearTable {
    /// Builds a validated year table. Brackets may be supplied in any order.
    pub fn new(
        tax_year: i32,
        mut brackets: Vec<TaxBracket>,
        rebates: RebateTable,
    ) -> Result<Self, TableError> {
        if brackets.is_empty() {
            return Err(TableError::NoBrackets(tax_year));
        }
        if rebates.tax_year != tax_year {
            return Err(TableError::RebateYearMismatch {
                expected: tax_year,
                found: rebates.tax_year,
            });
        }
        if let Some(bracket) = brackets.iter().find(|b| b.tax_year != tax_year) {
            return Err(TableError::BracketYearMismatch {
                expected: tax_year,
                found: bracket.tax_year,
            });
        }

        let negative = brackets.iter().any(|b| {
            b.min_income < Decimal::ZERO
                || b.tax_rate < Decimal::ZERO
                || b.base_tax < Decimal::ZERO
                || b.max_income.is_some_and(|max| max < Decimal::ZERO)
        }) || rebates.primary < Decimal::ZERO
            || rebates.secondary < Decimal::ZERO
            || rebates.tertiary < Decimal::ZERO;
        if negative {
            return Err(TableError::NegativeAmount(tax_year));
        }

        brackets.sort_by_key(|b| b.min_income);

        if brackets.first().is_some_and(|b| b.min_income != Decimal::ZERO) {
            return Err(TableError::MissingBottomBracket(tax_year));
        }
        for pair in brackets.windows(2) {
            let expected = pair[1].min_income;
            if pair[0].max_income != Some(expected) || expected <= pair[0].min_income {
                return Err(TableError::NotContiguous {
                    year: tax_year,
                    at: expected,
                });
            }
        }
        if brackets.last().is_some_and(|b| b.max_income.is_some()) {
            return Err(TableError::MissingTopBracket(tax_year));
        }

        Ok(Self {
            tax_year,
            brackets,
            rebates,
        })
    }

    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// The bracket schedule, ascending by `min_income`.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn rebates(&self) -> &RebateTable {
        &self.rebates
    }
}

/// The immutable set of year tables the engine computes over.
///
/// Built once at startup from the built-in data or loaded files, then shared
/// read-only; lookups for years that were never configured return `None` so
/// callers can surface an unknown-year error rather than default silently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxTables {
    years: BTreeMap<i32, TaxYearTable>,
}

impl TaxTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a year table, replacing any previous table for the same year.
    pub fn insert(&mut self, table: TaxYearTable) -> Option<TaxYearTable> {
        self.years.insert(table.tax_year(), table)
    }

    pub fn get(&self, tax_year: i32) -> Option<&TaxYearTable> {
        self.years.get(&tax_year)
    }

    /// Configured years in ascending order.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rebates(year: i32) -> RebateTable {
        RebateTable {
            tax_year: year,
            primary: dec!(17230),
            secondary: dec!(9400),
            tertiary: dec!(3100),
        }
    }

    fn bracket(
        year: i32,
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
        base: Decimal,
    ) -> TaxBracket {
        TaxBracket {
            tax_year: year,
            min_income: min,
            max_income: max,
            tax_rate: rate,
            base_tax: base,
        }
    }

    fn two_slices(year: i32) -> Vec<TaxBracket> {
        vec![
            bracket(year, dec!(0), Some(dec!(217000)), dec!(0.18), dec!(0)),
            bracket(year, dec!(217000), None, dec!(0.26), dec!(39000)),
        ]
    }

    #[test]
    fn new_accepts_contiguous_schedule() {
        let table = TaxYearTable::new(2024, two_slices(2024), rebates(2024)).unwrap();

        assert_eq!(table.tax_year(), 2024);
        assert_eq!(table.brackets().len(), 2);
    }

    #[test]
    fn new_sorts_brackets_by_min_income() {
        let mut slices = two_slices(2024);
        slices.reverse();

        let table = TaxYearTable::new(2024, slices, rebates(2024)).unwrap();

        assert_eq!(table.brackets()[0].min_income, dec!(0));
        assert_eq!(table.brackets()[1].min_income, dec!(217000));
    }

    #[test]
    fn new_rejects_empty_schedule() {
        let result = TaxYearTable::new(2024, vec![], rebates(2024));

        assert_eq!(result.unwrap_err(), TableError::NoBrackets(2024));
    }

    #[test]
    fn new_rejects_rebate_year_mismatch() {
        let result = TaxYearTable::new(2024, two_slices(2024), rebates(2023));

        assert_eq!(
            result.unwrap_err(),
            TableError::RebateYearMismatch {
                expected: 2024,
                found: 2023
            }
        );
    }

    #[test]
    fn new_rejects_bracket_year_mismatch() {
        let mut slices = two_slices(2024);
        slices[1].tax_year = 2023;

        let result = TaxYearTable::new(2024, slices, rebates(2024));

        assert_eq!(
            result.unwrap_err(),
            TableError::BracketYearMismatch {
                expected: 2024,
                found: 2023
            }
        );
    }

    #[test]
    fn new_rejects_schedule_not_starting_at_zero() {
        let slices = vec![bracket(2024, dec!(1000), None, dec!(0.18), dec!(0))];

        let result = TaxYearTable::new(2024, slices, rebates(2024));

        assert_eq!(result.unwrap_err(), TableError::MissingBottomBracket(2024));
    }

    #[test]
    fn new_rejects_gap_between_slices() {
        let slices = vec![
            bracket(2024, dec!(0), Some(dec!(200000)), dec!(0.18), dec!(0)),
            bracket(2024, dec!(217000), None, dec!(0.26), dec!(39000)),
        ];

        let result = TaxYearTable::new(2024, slices, rebates(2024));

        assert_eq!(
            result.unwrap_err(),
            TableError::NotContiguous {
                year: 2024,
                at: dec!(217000)
            }
        );
    }

    #[test]
    fn new_rejects_bounded_top_slice() {
        let slices = vec![
            bracket(2024, dec!(0), Some(dec!(217000)), dec!(0.18), dec!(0)),
            bracket(
                2024,
                dec!(217000),
                Some(dec!(339000)),
                dec!(0.26),
                dec!(39000),
            ),
        ];

        let result = TaxYearTable::new(2024, slices, rebates(2024));

        assert_eq!(result.unwrap_err(), TableError::MissingTopBracket(2024));
    }

    #[test]
    fn new_rejects_negative_amounts() {
        let mut bad = rebates(2024);
        bad.tertiary = dec!(-1);

        let result = TaxYearTable::new(2024, two_slices(2024), bad);

        assert_eq!(result.unwrap_err(), TableError::NegativeAmount(2024));
    }

    #[test]
    fn tables_lookup_and_year_listing() {
        let mut tables = TaxTables::new();
        tables.insert(TaxYearTable::new(2024, two_slices(2024), rebates(2024)).unwrap());

        assert_eq!(tables.len(), 1);
        assert!(tables.get(2024).is_some());
        assert!(tables.get(2025).is_none());
        assert_eq!(tables.years().collect::<Vec<_>>(), vec![2024]);
    }

    #[test]
    fn tables_insert_replaces_existing_year() {
        let mut tables = TaxTables::new();
        tables.insert(TaxYearTable::new(2024, two_slices(2024), rebates(2024)).unwrap());

        let replaced =
            tables.insert(TaxYearTable::new(2024, two_slices(2024), rebates(2024)).unwrap());

        assert!(replaced.is_some());
        assert_eq!(tables.len(), 1);
    }
}
