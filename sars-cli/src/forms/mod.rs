//! The two interactive screens: the registration form and the calculator.
//!
//! Both screens read from a generic `BufRead` and write to a generic `Write`
//! so the flow can be driven by tests with in-memory buffers. End of input
//! is treated as a quiet exit at any prompt.

pub mod calculator;
pub mod registration;

use std::io::{self, BufRead, Write};

use sars_core::TaxEngine;

pub use calculator::CalculatorOutcome;

/// Runs the full two-screen session: registration, then the calculator.
/// "back" at the calculator's year prompt returns to registration.
pub fn run<R: BufRead, W: Write>(
    engine: &TaxEngine,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        let Some(registrant) = registration::run(input, out)? else {
            return Ok(());
        };
        writeln!(out, "Registration successful! You may proceed.")?;
        tracing::info!(email = %registrant.email, "registration complete");

        match calculator::run(engine, input, out)? {
            CalculatorOutcome::Back => continue,
            CalculatorOutcome::Exit => {
                writeln!(out, "Goodbye!")?;
                return Ok(());
            }
        }
    }
}

/// Writes a prompt and reads one trimmed line. `None` on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
