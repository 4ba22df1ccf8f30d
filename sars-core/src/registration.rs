//! Registration form validation.
//!
//! The registration screen collects a registrant's personal details before
//! the calculator becomes available. Validation is a pure check over the raw
//! captured strings; the shell owns prompting and error display. Validated
//! details are held for the session only and never persisted.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{13}$").expect("id pattern compiles"));

// Strict YYYY-MM-DD: chrono alone would accept un-padded months and days.
static DOB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("dob pattern compiles"));

const DOB_FORMAT: &str = "%Y-%m-%d";

/// Answer to the citizenship question. Both answers are valid; the question
/// only has to be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Citizenship {
    Yes,
    No,
}

/// Raw values captured from the registration screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub citizen: Option<Citizenship>,
    pub id_number: String,
    pub date_of_birth: String,
}

/// Field-level rejections. The display strings are the user-facing messages
/// the shell shows verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Please enter your name.")]
    MissingName,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Please select whether you are a South African citizen.")]
    CitizenshipNotAnswered,

    #[error("Please enter a valid 13-digit identification number.")]
    InvalidIdNumber,

    #[error("Please enter your date of birth.")]
    MissingDateOfBirth,

    #[error("Please enter the date of birth in the format YYYY-MM-DD.")]
    InvalidDateOfBirth,
}

/// A successfully validated registrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registrant {
    pub full_name: String,
    pub email: String,
    pub citizen: Citizenship,
    pub id_number: String,
    pub date_of_birth: NaiveDate,
}

impl RegistrationForm {
    /// Validates the form, collecting every field rejection.
    ///
    /// Rules:
    /// - name non-empty after trimming
    /// - email matches the address pattern
    /// - the citizenship question is answered
    /// - identification number is exactly 13 digits
    /// - date of birth is a real date in strict `YYYY-MM-DD` form
    pub fn validate(&self) -> Result<Registrant, Vec<RegistrationError>> {
        let mut errors = Vec::new();

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.push(RegistrationError::MissingName);
        }

        let email = self.email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            errors.push(RegistrationError::InvalidEmail);
        }

        if self.citizen.is_none() {
            errors.push(RegistrationError::CitizenshipNotAnswered);
        }

        let id_number = self.id_number.trim();
        if !ID_PATTERN.is_match(id_number) {
            errors.push(RegistrationError::InvalidIdNumber);
        }

        let dob = self.date_of_birth.trim();
        let date_of_birth = if dob.is_empty() {
            errors.push(RegistrationError::MissingDateOfBirth);
            None
        } else if !DOB_PATTERN.is_match(dob) {
            errors.push(RegistrationError::InvalidDateOfBirth);
            None
        } else {
            match NaiveDate::parse_from_str(dob, DOB_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(RegistrationError::InvalidDateOfBirth);
                    None
                }
            }
        };

        if !errors.is_empty() {
            tracing::warn!(rejections = errors.len(), "registration form rejected");
            return Err(errors);
        }

        let (Some(citizen), Some(date_of_birth)) = (self.citizen, date_of_birth) else {
            return Err(errors);
        };

        Ok(Registrant {
            full_name: full_name.to_string(),
            email: email.to_string(),
            citizen,
            id_number: id_number.to_string(),
            date_of_birth,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            full_name: "Thandi Nkosi".to_string(),
            email: "thandi.nkosi@example.co.za".to_string(),
            citizen: Some(Citizenship::Yes),
            id_number: "9001014800086".to_string(),
            date_of_birth: "1990-01-01".to_string(),
        }
    }

    #[test]
    fn valid_form_produces_registrant() {
        let registrant = valid_form().validate().unwrap();

        assert_eq!(registrant.full_name, "Thandi Nkosi");
        assert_eq!(registrant.citizen, Citizenship::Yes);
        assert_eq!(
            registrant.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
        );
    }

    #[test]
    fn fields_are_trimmed_before_validation() {
        let mut form = valid_form();
        form.full_name = "  Thandi Nkosi  ".to_string();
        form.id_number = " 9001014800086 ".to_string();

        let registrant = form.validate().unwrap();

        assert_eq!(registrant.full_name, "Thandi Nkosi");
        assert_eq!(registrant.id_number, "9001014800086");
    }

    #[test]
    fn non_citizen_answer_is_still_valid() {
        let mut form = valid_form();
        form.citizen = Some(Citizenship::No);

        assert!(form.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut form = valid_form();
        form.full_name = "   ".to_string();

        assert_eq!(
            form.validate().unwrap_err(),
            vec![RegistrationError::MissingName]
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["", "thandi", "thandi@", "thandi@example", "@example.com"] {
            let mut form = valid_form();
            form.email = email.to_string();

            assert_eq!(
                form.validate().unwrap_err(),
                vec![RegistrationError::InvalidEmail],
                "email {email:?} should be rejected"
            );
        }
    }

    #[test]
    fn unanswered_citizenship_is_rejected() {
        let mut form = valid_form();
        form.citizen = None;

        assert_eq!(
            form.validate().unwrap_err(),
            vec![RegistrationError::CitizenshipNotAnswered]
        );
    }

    #[test]
    fn id_number_must_be_exactly_13_digits() {
        for id in ["", "123456789012", "12345678901234", "90010148000A6"] {
            let mut form = valid_form();
            form.id_number = id.to_string();

            assert_eq!(
                form.validate().unwrap_err(),
                vec![RegistrationError::InvalidIdNumber],
                "id {id:?} should be rejected"
            );
        }
    }

    #[test]
    fn empty_date_of_birth_has_its_own_message() {
        let mut form = valid_form();
        form.date_of_birth = String::new();

        assert_eq!(
            form.validate().unwrap_err(),
            vec![RegistrationError::MissingDateOfBirth]
        );
    }

    #[test]
    fn date_of_birth_must_be_strictly_padded() {
        // chrono would parse "1990-1-1"; the strict pattern must not.
        let mut form = valid_form();
        form.date_of_birth = "1990-1-1".to_string();

        assert_eq!(
            form.validate().unwrap_err(),
            vec![RegistrationError::InvalidDateOfBirth]
        );
    }

    #[test]
    fn impossible_calendar_date_is_rejected() {
        let mut form = valid_form();
        form.date_of_birth = "1990-02-30".to_string();

        assert_eq!(
            form.validate().unwrap_err(),
            vec![RegistrationError::InvalidDateOfBirth]
        );
    }

    #[test]
    fn all_rejections_are_collected() {
        let form = RegistrationForm::default();

        let errors = form.validate().unwrap_err();

        assert_eq!(
            errors,
            vec![
                RegistrationError::MissingName,
                RegistrationError::InvalidEmail,
                RegistrationError::CitizenshipNotAnswered,
                RegistrationError::InvalidIdNumber,
                RegistrationError::MissingDateOfBirth,
            ]
        );
    }
}
