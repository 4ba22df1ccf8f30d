//! The assessment engine: bracket tax and rebates composed into net payable.
//!
//! [`TaxEngine`] owns the configured [`TaxTables`] and is the one entry point
//! the shell calls. Every method is pure and constant-time over the fixed
//! number of brackets; the tables are never mutated after construction, so an
//! engine can be shared across threads without synchronization.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use sars_core::{TaxEngine, tables};
//!
//! let engine = TaxEngine::new(tables::builtin());
//! let assessment = engine.assess(dec!(100000), 30, 2024).unwrap();
//!
//! assert_eq!(assessment.tax_before_rebates, dec!(18000.00));
//! assert_eq!(assessment.rebates, dec!(17230));
//! assert_eq!(assessment.net_payable, dec!(770.00));
//! ```

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::calculations::common::max;
use crate::calculations::income_tax::{IncomeTaxError, IncomeTaxSchedule};
use crate::calculations::rebates::rebate_for_age;
use crate::models::{TaxTables, TaxYearTable};

/// Errors that can occur during an assessment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    /// The requested year is absent from the configured tables. Fatal to the
    /// call; never silently defaulted to another year.
    #[error("tax year {0} is not configured")]
    UnknownTaxYear(i32),

    #[error(transparent)]
    IncomeTax(#[from] IncomeTaxError),
}

/// The result of one assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxAssessment {
    pub tax_year: i32,
    pub tax_before_rebates: Decimal,
    pub rebates: Decimal,
    pub net_payable: Decimal,
}

/// Stateless calculator over an immutable set of year tables.
#[derive(Debug, Clone)]
pub struct TaxEngine {
    tables: TaxTables,
}

impl TaxEngine {
    pub fn new(tables: TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Bracket tax for the year, before any rebate.
    pub fn tax_before_rebates(
        &self,
        income: Decimal,
        tax_year: i32,
    ) -> Result<Decimal, TaxEngineError> {
        let table = self.year_table(tax_year)?;
        Ok(IncomeTaxSchedule::new(table.brackets()).tax_payable(income)?)
    }

    /// Summed age rebates for the year.
    pub fn rebates_for_age(
        &self,
        age: u32,
        tax_year: i32,
    ) -> Result<Decimal, TaxEngineError> {
        let table = self.year_table(tax_year)?;
        Ok(rebate_for_age(table.rebates(), age))
    }

    /// Computes one complete assessment.
    ///
    /// Rebates in excess of the bracket tax are forfeited, not refunded, so
    /// `net_payable` is clamped at zero.
    pub fn assess(
        &self,
        income: Decimal,
        age: u32,
        tax_year: i32,
    ) -> Result<TaxAssessment, TaxEngineError> {
        let table = self.year_table(tax_year)?;
        let tax_before_rebates = IncomeTaxSchedule::new(table.brackets()).tax_payable(income)?;
        let rebates = rebate_for_age(table.rebates(), age);

        Ok(TaxAssessment {
            tax_year,
            tax_before_rebates,
            rebates,
            net_payable: max(tax_before_rebates - rebates, Decimal::ZERO),
        })
    }

    fn year_table(
        &self,
        tax_year: i32,
    ) -> Result<&TaxYearTable, TaxEngineError> {
        self.tables
            .get(tax_year)
            .ok_or(TaxEngineError::UnknownTaxYear(tax_year))
    }
}
