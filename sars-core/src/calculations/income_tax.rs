//! Progressive bracket tax over a year's schedule.
//!
//! SARS publishes the schedule as cumulative figures: each slice carries the
//! total tax owed at its lower threshold (`base_tax`) plus a marginal rate
//! for the income inside the slice, so the tax for any income is
//! `base_tax + (income - min_income) * tax_rate` of the slice it falls in.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sars_core::calculations::IncomeTaxSchedule;
//! use sars_core::TaxBracket;
//!
//! let brackets = vec![
//!     TaxBracket {
//!         tax_year: 2024,
//!         min_income: dec!(0),
//!         max_income: Some(dec!(217000)),
//!         tax_rate: dec!(0.18),
//!         base_tax: dec!(0),
//!     },
//!     TaxBracket {
//!         tax_year: 2024,
//!         min_income: dec!(217000),
//!         max_income: None,
//!         tax_rate: dec!(0.26),
//!         base_tax: dec!(39000),
//!     },
//! ];
//!
//! let schedule = IncomeTaxSchedule::new(&brackets);
//! assert_eq!(schedule.tax_payable(dec!(100000)).unwrap(), dec!(18000.00));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::calculations::common::round_half_up;
use crate::models::TaxBracket;

/// Errors that can occur when computing bracket tax.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IncomeTaxError {
    /// No tax brackets were provided for the calculation.
    #[error("no tax brackets provided")]
    NoTaxBrackets,

    /// No tax bracket covers the given income.
    #[error("no tax bracket found for income {0}")]
    NoMatchingBracket(Decimal),
}

/// Bracket tax calculator over one year's schedule.
#[derive(Debug, Clone)]
pub struct IncomeTaxSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> IncomeTaxSchedule<'a> {
    /// Creates a calculator over the given brackets. Brackets must be sorted
    /// ascending by `min_income` and contiguous, with an open-ended top slice;
    /// [`TaxYearTable`](crate::TaxYearTable) guarantees this shape.
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Tax payable before rebates.
    ///
    /// A slice matches when `min_income < income <= max_income`, so income
    /// exactly on a threshold is taxed in the slice below it. In particular
    /// the first threshold itself is still taxed entirely at the bottom rate.
    ///
    /// # Errors
    ///
    /// Returns [`IncomeTaxError`] if no brackets were provided or when a
    /// hand-built schedule leaves the income uncovered.
    pub fn tax_payable(
        &self,
        income: Decimal,
    ) -> Result<Decimal, IncomeTaxError> {
        if self.brackets.is_empty() {
            return Err(IncomeTaxError::NoTaxBrackets);
        }
        if income <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let bracket = self
            .brackets
            .iter()
            .find(|b| income > b.min_income && b.max_income.is_none_or(|max| income <= max))
            .ok_or(IncomeTaxError::NoMatchingBracket(income))?;

        let marginal_income = income - bracket.min_income;
        Ok(round_half_up(
            bracket.base_tax + marginal_income * bracket.tax_rate,
        ))
    }
}
