//! Pure validation and normalization of candidate answers.
//!
//! Every validator is a total function: any input maps to exactly one of a
//! normalized value or an error with a specific reason. No conversation
//! state is consulted and none is mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::stage::{Field, Stage};

/// Upper bound for years of experience.
pub const MAX_EXPERIENCE_YEARS: u8 = 50;

/// Maximum length for free-text fields (position, location).
const MAX_FREE_TEXT_LEN: usize = 120;

/// A normalized, validated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Normalized text (name, email, phone, position, location, or the
    /// pass-through value for non-collection stages).
    Text(String),
    /// Normalized years of experience.
    Years(u8),
    /// Deduplicated, lower-cased technology tokens in first-seen order.
    Technologies(Vec<String>),
}

/// A validation failure with a machine reason and a human-readable message.
///
/// The message is shown to the candidate verbatim in the re-ask.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} cannot be empty.")]
    Empty(&'static str),

    #[error("Name must be at least 2 characters long.")]
    NameTooShort,

    #[error("Name can only contain letters, spaces, periods, hyphens, and apostrophes.")]
    NameInvalidChars,

    #[error("That doesn't look like a valid email address (expected name@example.com).")]
    EmailInvalidFormat,

    #[error("Phone numbers must be in international format with a country code (e.g., +1 234 567 8900).")]
    PhoneMissingCountryCode,

    #[error("That phone number has the wrong number of digits for an international number.")]
    PhoneInvalidLength,

    #[error("Phone numbers may only contain digits and common separators after the country code.")]
    PhoneInvalidChars,

    #[error("Please provide your experience as a number of years (e.g., \"3\" or \"3 years\").")]
    ExperienceNotANumber,

    #[error("Experience must be between 0 and {MAX_EXPERIENCE_YEARS} years.")]
    ExperienceOutOfRange,

    #[error("Position must be at least 3 characters long.")]
    PositionTooShort,

    #[error("Location must be at least 2 characters long.")]
    LocationTooShort,

    #[error("That answer is too long, please keep it brief.")]
    TooLong,

    #[error("Please list at least one technology (comma-separated, e.g., \"Python, React\").")]
    TechStackEmpty,
}

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z\s.'\-]*$").expect("valid name regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)+$").expect("valid email regex")
});

/// Validates raw text for the given stage.
///
/// Non-collection stages accept any non-empty text unchanged: answers to
/// technical questions are recorded, not graded.
pub fn validate(stage: Stage, raw: &str) -> Result<FieldValue, FieldError> {
    match stage.field() {
        Some(Field::Name) => validate_name(raw),
        Some(Field::Email) => validate_email(raw),
        Some(Field::Phone) => validate_phone(raw),
        Some(Field::Experience) => validate_experience(raw),
        Some(Field::Position) => validate_free_text(raw, 3, FieldError::PositionTooShort),
        Some(Field::Location) => validate_free_text(raw, 2, FieldError::LocationTooShort),
        Some(Field::TechStack) => validate_tech_stack(raw),
        None => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Err(FieldError::Empty("Answer"))
            } else {
                Ok(FieldValue::Text(trimmed.to_string()))
            }
        }
    }
}

/// Name: trimmed, whitespace-collapsed, letters plus a few punctuation marks.
pub fn validate_name(raw: &str) -> Result<FieldValue, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty("Name"));
    }
    if trimmed.chars().count() < 2 {
        return Err(FieldError::NameTooShort);
    }
    if !NAME_RE.is_match(trimmed) {
        return Err(FieldError::NameInvalidChars);
    }
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(FieldValue::Text(collapsed))
}

/// Email: conservative address grammar; the domain part is lower-cased.
pub fn validate_email(raw: &str) -> Result<FieldValue, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty("Email"));
    }
    if !EMAIL_RE.is_match(trimmed) {
        return Err(FieldError::EmailInvalidFormat);
    }
    // Split cannot fail: the regex guarantees exactly the grammar local@domain.
    let (local, domain) = trimmed.split_once('@').ok_or(FieldError::EmailInvalidFormat)?;
    Ok(FieldValue::Text(format!("{}@{}", local, domain.to_lowercase())))
}

/// Phone: international format with leading `+`, rendered canonically.
///
/// Accepts spaces, dashes, dots, and parentheses as separators. Enforces the
/// E.164 length rule (8-15 digits including the country code).
pub fn validate_phone(raw: &str) -> Result<FieldValue, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty("Phone number"));
    }
    let Some(rest) = trimmed.strip_prefix('+') else {
        return Err(FieldError::PhoneMissingCountryCode);
    };

    let mut digits = String::new();
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits.push(ch),
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return Err(FieldError::PhoneInvalidChars),
        }
    }
    if !(8..=15).contains(&digits.len()) {
        return Err(FieldError::PhoneInvalidLength);
    }
    if digits.starts_with('0') {
        // Country codes never start with zero.
        return Err(FieldError::PhoneMissingCountryCode);
    }

    let (country_code, subscriber) = split_country_code(&digits);
    Ok(FieldValue::Text(format!(
        "+{} {}",
        country_code,
        group_subscriber(subscriber)
    )))
}

/// Splits the leading country code from the subscriber number.
///
/// Single-digit codes are 1 (NANP) and 7; codes starting with 2-9 are two
/// digits except the well-known three-digit ranges.
fn split_country_code(digits: &str) -> (&str, &str) {
    let first = digits.as_bytes()[0];
    let code_len = match first {
        b'1' | b'7' => 1,
        b'2' | b'3' | b'5' | b'6' | b'8' | b'9' => {
            // Three-digit codes occupy the 2xx/3xx/5xx/6xx/8xx/9xx gaps
            // (e.g. +212, +354, +593, +679, +880, +971). Approximate with
            // the two-digit prefixes actually assigned two-digit codes.
            let two: &str = &digits[..2];
            match two {
                "20" | "27" | "30" | "31" | "32" | "33" | "34" | "36" | "39" | "40" | "41"
                | "43" | "44" | "45" | "46" | "47" | "48" | "49" | "51" | "52" | "53" | "54"
                | "55" | "56" | "57" | "58" | "60" | "61" | "62" | "63" | "64" | "65" | "66"
                | "81" | "82" | "84" | "86" | "90" | "91" | "92" | "93" | "94" | "95" | "98" => 2,
                _ => 3,
            }
        }
        _ => 2,
    };
    let code_len = code_len.min(digits.len().saturating_sub(1).max(1));
    digits.split_at(code_len)
}

/// Groups subscriber digits for display: NANP numbers as 3-3-4, everything
/// else in blocks of three with any remainder on the last block.
fn group_subscriber(subscriber: &str) -> String {
    if subscriber.len() == 10 {
        return format!(
            "{} {} {}",
            &subscriber[..3],
            &subscriber[3..6],
            &subscriber[6..]
        );
    }
    subscriber
        .as_bytes()
        .chunks(3)
        .map(|c| std::str::from_utf8(c).expect("ascii digits"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Experience: bare number, number + unit word, or a small word-number set.
pub fn validate_experience(raw: &str) -> Result<FieldValue, FieldError> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return Err(FieldError::Empty("Experience"));
    }

    let stripped = lowered
        .trim_end_matches(|c: char| c.is_alphabetic() || c.is_whitespace())
        .trim();
    let unit = lowered[stripped.len()..].trim();
    if !matches!(unit, "" | "years" | "year" | "yrs" | "yr") {
        // Try word numbers ("three", "three years") before giving up.
        let word = lowered
            .strip_suffix("years")
            .or_else(|| lowered.strip_suffix("year"))
            .or_else(|| lowered.strip_suffix("yrs"))
            .or_else(|| lowered.strip_suffix("yr"))
            .unwrap_or(&lowered)
            .trim();
        return match word_to_years(word) {
            Some(years) => Ok(FieldValue::Years(years)),
            None => Err(FieldError::ExperienceNotANumber),
        };
    }

    match stripped.parse::<i64>() {
        Ok(years) if (0..=MAX_EXPERIENCE_YEARS as i64).contains(&years) => {
            Ok(FieldValue::Years(years as u8))
        }
        Ok(_) => Err(FieldError::ExperienceOutOfRange),
        Err(_) => Err(FieldError::ExperienceNotANumber),
    }
}

fn word_to_years(word: &str) -> Option<u8> {
    let years = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "fifteen" => 15,
        "twenty" => 20,
        "thirty" => 30,
        _ => return None,
    };
    Some(years)
}

/// Position and location share the same shape: bounded free text.
fn validate_free_text(
    raw: &str,
    min_len: usize,
    too_short: FieldError,
) -> Result<FieldValue, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty("Answer"));
    }
    if trimmed.chars().count() < min_len {
        return Err(too_short);
    }
    if trimmed.chars().count() > MAX_FREE_TEXT_LEN {
        return Err(FieldError::TooLong);
    }
    let collapsed = trimmed.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(FieldValue::Text(collapsed))
}

/// Tech stack: comma- or "and"-separated list, lower-cased, deduplicated
/// preserving first-seen order.
pub fn validate_tech_stack(raw: &str) -> Result<FieldValue, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty("Tech stack"));
    }

    let mut seen = Vec::new();
    for part in trimmed.split(',') {
        for token in split_on_and(part) {
            let token = token.trim().to_lowercase();
            if !token.is_empty() && !seen.contains(&token) {
                seen.push(token);
            }
        }
    }

    if seen.is_empty() {
        return Err(FieldError::TechStackEmpty);
    }
    Ok(FieldValue::Technologies(seen))
}

/// Splits on the standalone word "and" without breaking names containing it.
fn split_on_and(part: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = Vec::new();
    for word in part.split_whitespace() {
        if word.eq_ignore_ascii_case("and") {
            if !current.is_empty() {
                tokens.push(current.join(" "));
                current = Vec::new();
            }
        } else {
            current.push(word);
        }
    }
    if !current.is_empty() {
        tokens.push(current.join(" "));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod name {
        use super::*;

        #[test]
        fn accepts_plain_name() {
            assert_eq!(
                validate_name("John Doe"),
                Ok(FieldValue::Text("John Doe".into()))
            );
        }

        #[test]
        fn collapses_inner_whitespace() {
            assert_eq!(
                validate_name("  John   Doe  "),
                Ok(FieldValue::Text("John Doe".into()))
            );
        }

        #[test]
        fn accepts_punctuated_names() {
            assert!(validate_name("Mary-Jane O'Neil Jr.").is_ok());
        }

        #[test]
        fn rejects_empty() {
            assert_eq!(validate_name("   "), Err(FieldError::Empty("Name")));
        }

        #[test]
        fn rejects_single_character() {
            assert_eq!(validate_name("J"), Err(FieldError::NameTooShort));
        }

        #[test]
        fn rejects_purely_numeric_input() {
            assert_eq!(validate_name("12345"), Err(FieldError::NameInvalidChars));
        }

        #[test]
        fn rejects_disallowed_symbols() {
            assert_eq!(validate_name("John@Doe"), Err(FieldError::NameInvalidChars));
        }
    }

    mod email {
        use super::*;

        #[test]
        fn accepts_standard_address() {
            assert_eq!(
                validate_email("john.doe@example.com"),
                Ok(FieldValue::Text("john.doe@example.com".into()))
            );
        }

        #[test]
        fn lowercases_the_domain_only() {
            assert_eq!(
                validate_email("John.Doe@Example.COM"),
                Ok(FieldValue::Text("John.Doe@example.com".into()))
            );
        }

        #[test]
        fn rejects_missing_at_sign() {
            assert_eq!(
                validate_email("not-an-email"),
                Err(FieldError::EmailInvalidFormat)
            );
        }

        #[test]
        fn rejects_undotted_domain() {
            assert_eq!(
                validate_email("john@localhost"),
                Err(FieldError::EmailInvalidFormat)
            );
        }

        #[test]
        fn rejects_empty() {
            assert_eq!(validate_email(""), Err(FieldError::Empty("Email")));
        }
    }

    mod phone {
        use super::*;

        #[test]
        fn normalizes_nanp_number_to_canonical_form() {
            assert_eq!(
                validate_phone("+1 234 567 8900"),
                Ok(FieldValue::Text("+1 234 567 8900".into()))
            );
        }

        #[test]
        fn strips_separators_before_formatting() {
            assert_eq!(
                validate_phone("+1 (234) 567-8900"),
                Ok(FieldValue::Text("+1 234 567 8900".into()))
            );
        }

        #[test]
        fn recognizes_two_digit_country_codes() {
            assert_eq!(
                validate_phone("+49 30 123456"),
                Ok(FieldValue::Text("+49 301 234 56".into()))
            );
        }

        #[test]
        fn rejects_missing_plus() {
            assert_eq!(
                validate_phone("234 567 8900"),
                Err(FieldError::PhoneMissingCountryCode)
            );
        }

        #[test]
        fn rejects_too_few_digits() {
            assert_eq!(validate_phone("+1 234"), Err(FieldError::PhoneInvalidLength));
        }

        #[test]
        fn rejects_too_many_digits() {
            assert_eq!(
                validate_phone("+1 234 567 8900 123 456"),
                Err(FieldError::PhoneInvalidLength)
            );
        }

        #[test]
        fn rejects_letters() {
            assert_eq!(
                validate_phone("+1 CALL-ME-NOW"),
                Err(FieldError::PhoneInvalidChars)
            );
        }

        #[test]
        fn rejects_zero_country_code() {
            assert_eq!(
                validate_phone("+0 123 456 789"),
                Err(FieldError::PhoneMissingCountryCode)
            );
        }
    }

    mod experience {
        use super::*;

        #[test]
        fn accepts_bare_number() {
            assert_eq!(validate_experience("3"), Ok(FieldValue::Years(3)));
        }

        #[test]
        fn accepts_number_with_unit() {
            assert_eq!(validate_experience("3 years"), Ok(FieldValue::Years(3)));
            assert_eq!(validate_experience("10 yrs"), Ok(FieldValue::Years(10)));
            assert_eq!(validate_experience("1 year"), Ok(FieldValue::Years(1)));
        }

        #[test]
        fn accepts_word_numbers() {
            assert_eq!(validate_experience("three years"), Ok(FieldValue::Years(3)));
            assert_eq!(validate_experience("twenty"), Ok(FieldValue::Years(20)));
        }

        #[test]
        fn accepts_zero() {
            assert_eq!(validate_experience("0"), Ok(FieldValue::Years(0)));
        }

        #[test]
        fn rejects_negative() {
            assert_eq!(
                validate_experience("-2"),
                Err(FieldError::ExperienceOutOfRange)
            );
        }

        #[test]
        fn rejects_over_the_bound() {
            assert_eq!(
                validate_experience("51"),
                Err(FieldError::ExperienceOutOfRange)
            );
        }

        #[test]
        fn accepts_the_bound_itself() {
            assert_eq!(validate_experience("50"), Ok(FieldValue::Years(50)));
        }

        #[test]
        fn rejects_non_numeric() {
            assert_eq!(
                validate_experience("a while"),
                Err(FieldError::ExperienceNotANumber)
            );
        }
    }

    mod position_and_location {
        use super::*;

        #[test]
        fn accepts_position() {
            assert_eq!(
                validate(Stage::CollectPosition, "Backend  Engineer"),
                Ok(FieldValue::Text("Backend Engineer".into()))
            );
        }

        #[test]
        fn rejects_short_position() {
            assert_eq!(
                validate(Stage::CollectPosition, "QA"),
                Err(FieldError::PositionTooShort)
            );
        }

        #[test]
        fn accepts_two_character_location() {
            assert_eq!(
                validate(Stage::CollectLocation, "NY"),
                Ok(FieldValue::Text("NY".into()))
            );
        }

        #[test]
        fn rejects_overlong_answer() {
            let long = "x".repeat(MAX_FREE_TEXT_LEN + 1);
            assert_eq!(
                validate(Stage::CollectLocation, &long),
                Err(FieldError::TooLong)
            );
        }
    }

    mod tech_stack {
        use super::*;

        #[test]
        fn splits_lowercases_and_dedupes_preserving_order() {
            assert_eq!(
                validate_tech_stack("Python, react, Docker, python"),
                Ok(FieldValue::Technologies(vec![
                    "python".into(),
                    "react".into(),
                    "docker".into()
                ]))
            );
        }

        #[test]
        fn splits_on_the_word_and() {
            assert_eq!(
                validate_tech_stack("Python and React"),
                Ok(FieldValue::Technologies(vec![
                    "python".into(),
                    "react".into()
                ]))
            );
        }

        #[test]
        fn keeps_multiword_technology_names() {
            assert_eq!(
                validate_tech_stack("Spring Boot, React Native"),
                Ok(FieldValue::Technologies(vec![
                    "spring boot".into(),
                    "react native".into()
                ]))
            );
        }

        #[test]
        fn rejects_empty_input() {
            assert_eq!(validate_tech_stack(""), Err(FieldError::Empty("Tech stack")));
        }

        #[test]
        fn rejects_separator_only_input() {
            assert_eq!(validate_tech_stack(", ,"), Err(FieldError::TechStackEmpty));
        }
    }

    mod totality {
        use super::*;
        use crate::domain::screening::stage::STAGE_ORDER;

        proptest! {
            #[test]
            fn every_input_yields_exactly_one_outcome(raw in ".*") {
                for stage in STAGE_ORDER {
                    // Must never panic; Ok or Err are both acceptable.
                    let _ = validate(stage, &raw);
                }
            }

            #[test]
            fn accepted_tech_stacks_are_lowercase(raw in ".*") {
                if let Ok(FieldValue::Technologies(techs)) = validate_tech_stack(&raw) {
                    prop_assert!(!techs.is_empty());
                    for tech in techs {
                        prop_assert_eq!(tech.clone(), tech.to_lowercase());
                    }
                }
            }

            #[test]
            fn accepted_experience_is_within_bounds(raw in ".*") {
                if let Ok(FieldValue::Years(years)) = validate_experience(&raw) {
                    prop_assert!(years <= MAX_EXPERIENCE_YEARS);
                }
            }
        }
    }
}
