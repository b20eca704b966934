//! Checks run before a survey is persisted.

use crate::error::{SurveyError, SurveyResult};
use crate::types::Survey;

/// Message shown when a survey is saved without a title or without pages
pub const SAVE_REQUIREMENTS_MESSAGE: &str = "Please provide a title and at least one page.";

/// A survey may be saved once it has a non-blank title and one page.
pub fn validate_for_save(survey: &Survey) -> SurveyResult<()> {
    if survey.title.trim().is_empty() || survey.pages.is_empty() {
        return Err(SurveyError::validation(SAVE_REQUIREMENTS_MESSAGE));
    }
    Ok(())
}
