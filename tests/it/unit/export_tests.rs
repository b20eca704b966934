//! Unit tests for result tabulation.

use crate::helpers::TestSurveyBuilder;
use surveycanvas::export::{answer_cell, tabulate};
use surveycanvas::types::{Answer, AnswerValue, ChoiceKind, Submission, Survey};

fn survey() -> Survey {
    TestSurveyBuilder::new("Quiz")
        .with_id("s1")
        .with_page("p1")
        .with_choice("single", ChoiceKind::Single, &[("o1", 10.0, 10.0), ("o2", 20.0, 20.0)])
        .with_page("p2")
        .with_short_answer("text", 10.0, 10.0, 30.0, 8.0)
        .with_choice(
            "multi",
            ChoiceKind::Multiple,
            &[("m1", 50.0, 50.0), ("m2", 60.0, 50.0), ("m3", 70.0, 50.0)],
        )
        .build()
}

fn answer(question_id: &str, value: AnswerValue) -> Answer {
    Answer {
        question_id: question_id.into(),
        value,
    }
}

#[test]
fn test_headers_span_all_pages() {
    let table = tabulate(&survey(), &[]);
    assert_eq!(
        table.headers,
        vec![
            "Submission ID",
            "Q1 (SINGLE_CHOICE)",
            "Q2 (SHORT_ANSWER)",
            "Q3 (MULTIPLE_CHOICE)"
        ]
    );
    assert!(table.rows.is_empty());
}

#[test]
fn test_choice_cells_use_ordinals() {
    let submissions = vec![Submission {
        id: "r1".into(),
        survey_id: "s1".into(),
        answers: vec![
            answer("multi", AnswerValue::Choices(vec!["m3".into(), "m1".into()])),
            answer("single", AnswerValue::Text("o2".into())),
            answer("text", AnswerValue::Text("hello".into())),
        ],
    }];

    let table = tabulate(&survey(), &submissions);
    assert_eq!(table.rows, vec![vec!["r1", "2", "hello", "3, 1"]]);
}

#[test]
fn test_unanswered_and_unknown_cells() {
    let submissions = vec![Submission {
        id: "r2".into(),
        survey_id: "s1".into(),
        answers: vec![answer("single", AnswerValue::Text("deleted".into()))],
    }];

    let table = tabulate(&survey(), &submissions);
    assert_eq!(table.rows[0], vec!["r2", "(unknown)", "", ""]);
    assert_eq!(table.column("Q2 (SHORT_ANSWER)"), Some(2));
}

#[test]
fn test_answer_cell_for_short_answer_is_raw_text() {
    let survey = survey();
    let question = survey.find_question("text").unwrap();
    assert_eq!(answer_cell(question, &AnswerValue::Text("o1".into())), "o1");
}
