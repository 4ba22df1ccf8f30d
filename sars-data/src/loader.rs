use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use sars_core::{RebateTable, TableError, TaxBracket, TaxTables, TaxYearTable};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading tax table data.
#[derive(Debug, Error)]
pub enum TaxTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("no rebates supplied for tax year {0}")]
    MissingRebates(i32),

    #[error("no tax brackets supplied for tax year {0}")]
    MissingBrackets(i32),

    #[error("duplicate rebate row for tax year {0}")]
    DuplicateRebates(i32),

    #[error(transparent)]
    Table(#[from] TableError),
}

impl From<csv::Error> for TaxTableLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the tax brackets CSV file.
///
/// Columns:
/// - `tax_year`: the tax year (e.g. 2024)
/// - `min_income`: lower threshold of the slice
/// - `max_income`: upper threshold (empty for the open-ended top slice)
/// - `base_tax`: cumulative tax owed at `min_income`, as published
/// - `rate`: marginal rate as a decimal (e.g. 0.18 for 18%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub tax_year: i32,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

/// A single record from the rebates CSV file.
///
/// Columns: `tax_year`, `primary`, `secondary`, `tertiary`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RebateRecord {
    pub tax_year: i32,
    pub primary: Decimal,
    pub secondary: Decimal,
    pub tertiary: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for SARS tax table data from CSV files.
///
/// Parses bracket and rebate files separately, then assembles them into the
/// validated [`TaxTables`] set the engine runs over. Every year named in one
/// file must appear in the other.
pub struct TaxTableLoader;

impl TaxTableLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse rebate records from a CSV reader.
    pub fn parse_rebates<R: Read>(reader: R) -> Result<Vec<RebateRecord>, TaxTableLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RebateRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Assembles parsed records into the engine's table set.
    ///
    /// Rows are grouped by year; each year must have both a bracket schedule
    /// and exactly one rebate row. Schedule shape is validated by
    /// [`TaxYearTable`]; the published base-tax figures are taken as-is.
    pub fn build(
        brackets: Vec<BracketRecord>,
        rebates: Vec<RebateRecord>,
    ) -> Result<TaxTables, TaxTableLoaderError> {
        let mut bracket_years: BTreeMap<i32, Vec<TaxBracket>> = BTreeMap::new();
        for record in brackets {
            bracket_years
                .entry(record.tax_year)
                .or_default()
                .push(TaxBracket {
                    tax_year: record.tax_year,
                    min_income: record.min_income,
                    max_income: record.max_income,
                    tax_rate: record.rate,
                    base_tax: record.base_tax,
                });
        }

        let mut rebate_years: BTreeMap<i32, RebateTable> = BTreeMap::new();
        for record in rebates {
            let year = record.tax_year;
            let previous = rebate_years.insert(
                year,
                RebateTable {
                    tax_year: year,
                    primary: record.primary,
                    secondary: record.secondary,
                    tertiary: record.tertiary,
                },
            );
            if previous.is_some() {
                return Err(TaxTableLoaderError::DuplicateRebates(year));
            }
        }

        if let Some(year) = rebate_years
            .keys()
            .find(|year| !bracket_years.contains_key(year))
        {
            return Err(TaxTableLoaderError::MissingBrackets(*year));
        }

        let mut tables = TaxTables::new();
        for (year, year_brackets) in bracket_years {
            let rebate_table = rebate_years
                .remove(&year)
                .ok_or(TaxTableLoaderError::MissingRebates(year))?;
            tables.insert(TaxYearTable::new(year, year_brackets, rebate_table)?);
        }

        tracing::debug!(years = tables.len(), "tax tables assembled");
        Ok(tables)
    }
}
