//! The registration screen.

use std::io::{self, BufRead, Write};

use sars_core::{Citizenship, Registrant, RegistrationForm};

use crate::forms::prompt;

/// Walks the registration form until it validates. The whole form is
/// re-entered after a rejection, with every field message shown first.
/// Returns `None` on end of input.
pub fn run<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Registrant>> {
    writeln!(out, "SARS - South African Revenue Services")?;
    writeln!(out, "Register: please enter your personal details.")?;

    loop {
        let Some(full_name) = prompt(input, out, "Name and Surname: ")? else {
            return Ok(None);
        };
        let Some(email) = prompt(input, out, "Email: ")? else {
            return Ok(None);
        };
        let Some(citizen_answer) =
            prompt(input, out, "Are you a South African citizen? (yes/no): ")?
        else {
            return Ok(None);
        };
        let Some(id_number) = prompt(input, out, "Identification Number: ")? else {
            return Ok(None);
        };
        let Some(date_of_birth) = prompt(input, out, "Date of Birth (YYYY-MM-DD): ")? else {
            return Ok(None);
        };

        let form = RegistrationForm {
            full_name,
            email,
            citizen: parse_citizenship(&citizen_answer),
            id_number,
            date_of_birth,
        };

        match form.validate() {
            Ok(registrant) => return Ok(Some(registrant)),
            Err(errors) => {
                for error in errors {
                    writeln!(out, "{error}")?;
                }
            }
        }
    }
}

/// An unrecognised answer counts as unanswered, which the form rejects with
/// its own message.
fn parse_citizenship(answer: &str) -> Option<Citizenship> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(Citizenship::Yes),
        "n" | "no" => Some(Citizenship::No),
        _ => None,
    }
}
