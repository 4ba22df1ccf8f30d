//! The calculator screen.

use std::io::{self, BufRead, Write};

use sars_core::TaxEngine;

use crate::forms::prompt;
use crate::input::{format_rand, parse_age, parse_income};

/// How the calculator screen was left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorOutcome {
    /// Return to the registration screen.
    Back,
    /// End the session.
    Exit,
}

/// Loops the calculator: year, income and age in, net tax payable out.
/// "back" or "exit" at the year prompt leaves the screen; end of input
/// counts as exit.
pub fn run<R: BufRead, W: Write>(
    engine: &TaxEngine,
    input: &mut R,
    out: &mut W,
) -> io::Result<CalculatorOutcome> {
    writeln!(out, "SARS Calculator")?;
    let years: Vec<String> = engine.tables().years().map(|y| y.to_string()).collect();
    let year_label = format!("Select Tax Year ({}): ", years.join(", "));

    loop {
        let Some(year_answer) = prompt(input, out, &year_label)? else {
            return Ok(CalculatorOutcome::Exit);
        };
        match year_answer.as_str() {
            "back" => return Ok(CalculatorOutcome::Back),
            "exit" => return Ok(CalculatorOutcome::Exit),
            _ => {}
        }
        let Ok(tax_year) = year_answer.parse::<i32>() else {
            writeln!(out, "Please select one of the listed tax years.")?;
            continue;
        };

        let Some(income_answer) = prompt(input, out, "Annual Income (R): ")? else {
            return Ok(CalculatorOutcome::Exit);
        };
        let Some(age_answer) = prompt(input, out, "Age: ")? else {
            return Ok(CalculatorOutcome::Exit);
        };

        let (Ok(income), Ok(age)) = (parse_income(&income_answer), parse_age(&age_answer)) else {
            writeln!(out, "Please enter valid numeric values for income and age.")?;
            continue;
        };

        match engine.assess(income, age, tax_year) {
            Ok(assessment) => {
                writeln!(
                    out,
                    "Your total tax payable is: {}",
                    format_rand(assessment.net_payable)
                )?;
            }
            Err(error) => {
                tracing::warn!(%error, tax_year, "assessment rejected");
                writeln!(out, "{error}")?;
            }
        }
    }
}
