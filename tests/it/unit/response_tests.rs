//! Unit tests for the respondent response sheet.

use crate::helpers::TestSurveyBuilder;
use std::sync::Arc;
use surveycanvas::ErrorKind;
use surveycanvas::response::{ResponseSheet, validate_answers};
use surveycanvas::types::{Answer, AnswerValue, ChoiceKind};

fn sheet() -> ResponseSheet {
    let survey = TestSurveyBuilder::new("Quiz")
        .with_page("p1")
        .with_choice("single", ChoiceKind::Single, &[("o1", 10.0, 10.0), ("o2", 20.0, 20.0)])
        .required()
        .with_page("p2")
        .with_short_answer("text", 10.0, 10.0, 30.0, 8.0)
        .with_choice("multi", ChoiceKind::Multiple, &[("m1", 50.0, 50.0), ("m2", 60.0, 50.0)])
        .build();
    ResponseSheet::new(Arc::new(survey))
}

#[test]
fn test_page_navigation() {
    let mut sheet = sheet();
    assert!(!sheet.previous_page());
    assert!(!sheet.is_last_page());

    assert!(sheet.next_page());
    assert!(sheet.is_last_page());
    assert_eq!(sheet.current_page().unwrap().id, "p2");
    assert!(!sheet.next_page());

    assert!(sheet.previous_page());
    assert_eq!(sheet.page_index(), 0);
}

#[test]
fn test_single_choice_replaces() {
    let mut sheet = sheet();
    sheet.toggle_option("single", "o1").unwrap();
    sheet.toggle_option("single", "o2").unwrap();

    assert!(!sheet.is_selected("single", "o1"));
    assert!(sheet.is_selected("single", "o2"));
    assert_eq!(sheet.answer("single"), Some(&AnswerValue::Text("o2".into())));
}

#[test]
fn test_multiple_choice_toggles() {
    let mut sheet = sheet();
    sheet.toggle_option("multi", "m1").unwrap();
    sheet.toggle_option("multi", "m2").unwrap();
    sheet.toggle_option("multi", "m1").unwrap();

    assert_eq!(
        sheet.answer("multi"),
        Some(&AnswerValue::Choices(vec!["m2".into()]))
    );
}

#[test]
fn test_unknown_references_rejected() {
    let mut sheet = sheet();
    assert_eq!(
        sheet.toggle_option("single", "nope").unwrap_err().kind(),
        ErrorKind::Reference
    );
    assert_eq!(
        sheet.toggle_option("text", "o1").unwrap_err().kind(),
        ErrorKind::Reference
    );
    assert_eq!(
        sheet.set_text("single", "hi").unwrap_err().kind(),
        ErrorKind::Reference
    );
}

#[test]
fn test_required_question_blocks_finish() {
    let mut sheet = sheet();
    sheet.set_text("text", "free text").unwrap();

    assert_eq!(sheet.missing_required(), vec!["single"]);
    let err = sheet.finish().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    sheet.toggle_option("single", "o1").unwrap();
    assert!(sheet.missing_required().is_empty());
    assert!(sheet.finish().is_ok());
}

#[test]
fn test_finish_keeps_answer_order_and_drops_empty() {
    let mut sheet = sheet();
    sheet.toggle_option("multi", "m1").unwrap();
    sheet.set_text("text", "   ").unwrap();
    sheet.toggle_option("single", "o2").unwrap();
    sheet.toggle_option("multi", "m2").unwrap();

    let answers = sheet.finish().unwrap();
    let ids: Vec<&str> = answers.iter().map(|a| a.question_id.as_str()).collect();
    assert_eq!(ids, vec!["multi", "single"]);
    assert_eq!(
        answers[0].value,
        AnswerValue::Choices(vec!["m1".into(), "m2".into()])
    );
}

#[test]
fn test_validate_answers_against_survey() {
    let sheet = sheet();
    let bad = vec![Answer {
        question_id: "multi".into(),
        value: AnswerValue::Choices(vec!["m1".into(), "zz".into()]),
    }];
    assert_eq!(
        validate_answers(sheet.survey(), &bad).unwrap_err().kind(),
        ErrorKind::Reference
    );
}
