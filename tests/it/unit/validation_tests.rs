//! Unit tests for save validation.

use crate::helpers::TestSurveyBuilder;
use surveycanvas::ErrorKind;
use surveycanvas::validation::{SAVE_REQUIREMENTS_MESSAGE, validate_for_save};

#[test]
fn test_blank_title_rejected() {
    let survey = TestSurveyBuilder::new("   ").with_page("p1").build();
    let err = validate_for_save(&survey).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), SAVE_REQUIREMENTS_MESSAGE);
}

#[test]
fn test_no_pages_rejected() {
    let survey = TestSurveyBuilder::new("Quiz").build();
    assert!(validate_for_save(&survey).is_err());
}

#[test]
fn test_titled_survey_with_page_accepted() {
    let survey = TestSurveyBuilder::new("Quiz").with_page("p1").build();
    assert!(validate_for_save(&survey).is_ok());
}
