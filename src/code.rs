//! Survey codes - short `ddd-ddd` identifiers respondents type to join.
//!
//! Codes are drawn at random and checked against an external uniqueness
//! oracle. The attempt budget is finite: an exhausted budget is reported as
//! an error rather than looping forever.

use crate::constants::CODE_GROUP_DIGITS;
use crate::error::{SurveyError, SurveyResult};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use tracing::{debug, warn};

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}$").expect("survey code pattern is valid"));

/// Whether `value` is exactly three digits, a hyphen, three digits
pub fn is_survey_code(value: &str) -> bool {
    CODE_PATTERN.is_match(value)
}

/// Format what a respondent typed the way the code field does: keep the
/// digits, at most six, with a hyphen after the third.
pub fn normalize_code_input(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(CODE_GROUP_DIGITS * 2)
        .collect();
    if digits.len() > CODE_GROUP_DIGITS {
        let (left, right) = digits.split_at(CODE_GROUP_DIGITS);
        format!("{}-{}", left, right)
    } else {
        digits
    }
}

/// Draw one random code. Leading zeros are allowed.
pub fn random_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let left: u32 = rng.gen_range(0..1000);
    let right: u32 = rng.gen_range(0..1000);
    format!("{:03}-{:03}", left, right)
}

/// Draw codes until `is_taken` rejects none, giving up after `attempts`.
pub fn generate_unique_code<R, F>(
    rng: &mut R,
    mut is_taken: F,
    attempts: usize,
) -> SurveyResult<String>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    for attempt in 1..=attempts {
        let code = random_code(rng);
        if !is_taken(&code) {
            debug!(attempt, "Generated survey code");
            return Ok(code);
        }
    }
    warn!(attempts, "Survey code space exhausted");
    Err(SurveyError::CodeGenerationExhausted { attempts })
}

/// How a lookup string should be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Code(String),
    Id(String),
}

/// Classify a lookup string: input made only of digits, hyphens and spaces
/// with exactly six digits is a code, everything else is a survey id.
pub fn lookup_key(input: &str) -> Lookup {
    let trimmed = input.trim();
    let code_like = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || c == '-' || c == ' ');
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if code_like && digits == CODE_GROUP_DIGITS * 2 {
        let normalized = normalize_code_input(trimmed);
        if is_survey_code(&normalized) {
            return Lookup::Code(normalized);
        }
    }
    Lookup::Id(trimmed.to_string())
}
