//! Built-in SARS year tables.
//!
//! The figures are the published bracket thresholds, cumulative base taxes
//! and rebates for the 2023 and 2024 tax years, reproduced exactly. Newer
//! years can be supplied at runtime as CSV files instead of rebuilding.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{RebateTable, TaxBracket, TaxTables, TaxYearTable};

fn bracket(
    tax_year: i32,
    min_income: Decimal,
    max_income: Option<Decimal>,
    tax_rate: Decimal,
    base_tax: Decimal,
) -> TaxBracket {
    TaxBracket {
        tax_year,
        min_income,
        max_income,
        tax_rate,
        base_tax,
    }
}

fn year_2023() -> TaxYearTable {
    let brackets = vec![
        bracket(2023, dec!(0), Some(dec!(205900)), dec!(0.18), dec!(0)),
        bracket(2023, dec!(205900), Some(dec!(321600)), dec!(0.26), dec!(37062)),
        bracket(2023, dec!(321600), Some(dec!(445100)), dec!(0.31), dec!(67144)),
        bracket(2023, dec!(445100), Some(dec!(584200)), dec!(0.36), dec!(105429)),
        bracket(2023, dec!(584200), Some(dec!(744800)), dec!(0.39), dec!(155505)),
        bracket(2023, dec!(744800), Some(dec!(1577300)), dec!(0.41), dec!(218139)),
        bracket(2023, dec!(1577300), None, dec!(0.45), dec!(559464)),
    ];
    let rebates = RebateTable {
        tax_year: 2023,
        primary: dec!(16425),
        secondary: dec!(9000),
        tertiary: dec!(2997),
    };

    TaxYearTable::new(2023, brackets, rebates).expect("built-in 2023 tables are valid")
}

fn year_2024() -> TaxYearTable {
    let brackets = vec![
        bracket(2024, dec!(0), Some(dec!(217000)), dec!(0.18), dec!(0)),
        bracket(2024, dec!(217000), Some(dec!(339000)), dec!(0.26), dec!(39000)),
        bracket(2024, dec!(339000), Some(dec!(469000)), dec!(0.31), dec!(70620)),
        bracket(2024, dec!(469000), Some(dec!(615000)), dec!(0.36), dec!(110739)),
        bracket(2024, dec!(615000), Some(dec!(784000)), dec!(0.39), dec!(163335)),
        bracket(2024, dec!(784000), Some(dec!(1650000)), dec!(0.41), dec!(229089)),
        bracket(2024, dec!(1650000), None, dec!(0.45), dec!(586928)),
    ];
    let rebates = RebateTable {
        tax_year: 2024,
        primary: dec!(17230),
        secondary: dec!(9400),
        tertiary: dec!(3100),
    };

    TaxYearTable::new(2024, brackets, rebates).expect("built-in 2024 tables are valid")
}

/// The table set shipped with the application.
pub fn builtin() -> TaxTables {
    let mut tables = TaxTables::new();
    tables.insert(year_2023());
    tables.insert(year_2024());
    tables
}
