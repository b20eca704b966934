//! Result tabulation.
//!
//! Produces the row/column view an exporter writes out. Choice answers are
//! shown as the 1-based position of the option inside its question, never
//! as the stored option id.

use crate::constants::{SUBMISSION_ID_HEADER, UNKNOWN_OPTION_CELL};
use crate::types::{AnswerValue, Question, Submission, Survey};
use serde::Serialize;

/// Header row plus one row per submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// Cell text for one answer to `question`.
pub fn answer_cell(question: &Question, value: &AnswerValue) -> String {
    match question.as_choice() {
        None => value.values().join(", "),
        Some(choice) => value
            .values()
            .into_iter()
            .map(|option_id| match choice.ordinal_of(option_id) {
                Some(ordinal) => ordinal.to_string(),
                None => UNKNOWN_OPTION_CELL.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Tabulate `submissions` over every question of every page, in order.
pub fn tabulate(survey: &Survey, submissions: &[Submission]) -> ResultTable {
    let questions: Vec<&Question> = survey.questions().collect();

    let headers = std::iter::once(SUBMISSION_ID_HEADER.to_string())
        .chain(
            questions
                .iter()
                .enumerate()
                .map(|(i, question)| format!("Q{} ({})", i + 1, question.type_label())),
        )
        .collect();

    let rows = submissions
        .iter()
        .map(|submission| {
            let mut row = Vec::with_capacity(questions.len() + 1);
            row.push(submission.id.clone());
            for question in &questions {
                let cell = submission
                    .answers
                    .iter()
                    .find(|answer| answer.question_id == question.id())
                    .map(|answer| answer_cell(question, &answer.value))
                    .unwrap_or_default();
                row.push(cell);
            }
            row
        })
        .collect();

    ResultTable { headers, rows }
}

/// File name stem for exported results: spaces become underscores
pub fn results_file_stem(title: &str) -> String {
    format!("{}_Results", title.replace(' ', "_"))
}
