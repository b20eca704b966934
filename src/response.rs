//! Respondent side: walking a survey page by page and collecting answers.

use crate::error::{SurveyError, SurveyResult};
use crate::types::{Answer, AnswerValue, ChoiceKind, Page, Question, Survey};
use std::sync::Arc;

/// Message returned when required questions are left unanswered
pub const MISSING_REQUIRED_MESSAGE: &str = "Please answer all required questions.";

/// Answers being collected for one survey.
pub struct ResponseSheet {
    survey: Arc<Survey>,
    page_index: usize,
    /// Kept in first-answered order
    answers: Vec<Answer>,
}

impl ResponseSheet {
    pub fn new(survey: Arc<Survey>) -> Self {
        Self {
            survey,
            page_index: 0,
            answers: Vec::new(),
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.survey.page(self.page_index)
    }

    pub fn is_last_page(&self) -> bool {
        self.page_index + 1 >= self.survey.pages.len()
    }

    /// Advance one page. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.page_index += 1;
        true
    }

    /// Go back one page. Returns false on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page_index == 0 {
            return false;
        }
        self.page_index -= 1;
        true
    }

    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
            .map(|answer| &answer.value)
    }

    fn upsert(&mut self, question_id: &str, value: AnswerValue) {
        match self
            .answers
            .iter_mut()
            .find(|answer| answer.question_id == question_id)
        {
            Some(answer) => answer.value = value,
            None => self.answers.push(Answer {
                question_id: question_id.to_string(),
                value,
            }),
        }
    }

    /// Record free text for a short answer question.
    pub fn set_text(&mut self, question_id: &str, text: impl Into<String>) -> SurveyResult<()> {
        let is_short_answer = matches!(
            self.survey.find_question(question_id),
            Some(Question::ShortAnswer(_))
        );
        if !is_short_answer {
            return Err(SurveyError::reference("short answer question", question_id));
        }
        self.upsert(question_id, AnswerValue::Text(text.into()));
        Ok(())
    }

    /// Click an option: single choice replaces the selection, multiple
    /// choice toggles membership.
    pub fn toggle_option(&mut self, question_id: &str, option_id: &str) -> SurveyResult<()> {
        let question = self
            .survey
            .find_question(question_id)
            .ok_or_else(|| SurveyError::reference("question", question_id))?;
        let kind = question
            .choice_kind()
            .ok_or_else(|| SurveyError::reference("choice question", question_id))?;
        if question
            .as_choice()
            .and_then(|choice| choice.option(option_id))
            .is_none()
        {
            return Err(SurveyError::reference("option", option_id));
        }

        let value = match kind {
            ChoiceKind::Single => AnswerValue::Text(option_id.to_string()),
            ChoiceKind::Multiple => {
                let mut selected: Vec<String> = match self.answer(question_id) {
                    Some(AnswerValue::Choices(values)) => values.clone(),
                    _ => Vec::new(),
                };
                if let Some(position) = selected.iter().position(|id| id == option_id) {
                    selected.remove(position);
                } else {
                    selected.push(option_id.to_string());
                }
                AnswerValue::Choices(selected)
            }
        };
        self.upsert(question_id, value);
        Ok(())
    }

    pub fn is_selected(&self, question_id: &str, option_id: &str) -> bool {
        self.answer(question_id)
            .is_some_and(|value| value.values().contains(&option_id))
    }

    /// Required questions, in survey order, that have no non-empty answer
    pub fn missing_required(&self) -> Vec<&str> {
        self.survey
            .questions()
            .filter(|question| question.is_required())
            .filter(|question| self.answer(question.id()).is_none_or(AnswerValue::is_empty))
            .map(Question::id)
            .collect()
    }

    /// Validate and hand out the answers for submission. Empty answers are
    /// dropped.
    pub fn finish(&self) -> SurveyResult<Vec<Answer>> {
        if !self.missing_required().is_empty() {
            return Err(SurveyError::validation(MISSING_REQUIRED_MESSAGE));
        }
        let answers: Vec<Answer> = self
            .answers
            .iter()
            .filter(|answer| !answer.value.is_empty())
            .cloned()
            .collect();
        validate_answers(&self.survey, &answers)?;
        Ok(answers)
    }
}

/// Check that every answer refers to a question of `survey` and, for choice
/// questions, to options that question has.
pub fn validate_answers(survey: &Survey, answers: &[Answer]) -> SurveyResult<()> {
    for answer in answers {
        let question = survey
            .find_question(&answer.question_id)
            .ok_or_else(|| SurveyError::reference("question", &answer.question_id))?;
        if let Some(choice) = question.as_choice() {
            for option_id in answer.value.values() {
                if choice.option(option_id).is_none() {
                    return Err(SurveyError::reference("option", option_id));
                }
            }
        }
    }
    Ok(())
}
