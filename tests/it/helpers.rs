//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSurveyBuilder` - Builder pattern for creating test surveys with fixed ids
//! - Pointer helpers that map percentages onto a fixed container
//! - Common assertions

use surveycanvas::input::{ContainerRect, PixelPoint, PointerEvent};
use surveycanvas::types::{
    AudioButton, AudioFile, ChoiceKind, ChoiceOption, ChoiceQuestion, Page, Question,
    ShortAnswerQuestion, Survey,
};
use std::sync::Arc;

// ============================================================================
// TestSurveyBuilder - Builder pattern for creating test surveys
// ============================================================================

/// Builder for surveys with predictable ids.
///
/// Elements are added to the most recently added page.
///
/// # Example
/// ```ignore
/// let survey = TestSurveyBuilder::new("Quiz")
///     .with_page("p1")
///     .with_choice("q1", ChoiceKind::Single, &[("o1", 10.0, 10.0), ("o2", 20.0, 20.0)])
///     .build();
/// ```
pub struct TestSurveyBuilder {
    survey: Survey,
}

impl TestSurveyBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            survey: Survey::new(title),
        }
    }

    /// Give the survey a stored id, as if it had been saved.
    pub fn with_id(mut self, id: &str) -> Self {
        self.survey.id = id.to_string();
        self
    }

    pub fn with_page(mut self, id: &str) -> Self {
        self.survey.pages.push(Arc::new(Page {
            id: id.to_string(),
            background_image: format!("{}.png", id),
            ..Default::default()
        }));
        self
    }

    fn last_page(&mut self) -> &mut Page {
        let page = self
            .survey
            .pages
            .last_mut()
            .expect("add a page before adding elements");
        Arc::make_mut(page)
    }

    pub fn with_short_answer(mut self, id: &str, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.last_page()
            .questions
            .push(Question::ShortAnswer(ShortAnswerQuestion {
                id: id.to_string(),
                x,
                y,
                width,
                height,
                required: false,
            }));
        self
    }

    pub fn with_choice(mut self, id: &str, kind: ChoiceKind, options: &[(&str, f64, f64)]) -> Self {
        let options = options
            .iter()
            .map(|(option_id, x, y)| ChoiceOption {
                id: option_id.to_string(),
                x: *x,
                y: *y,
            })
            .collect();
        self.last_page().questions.push(Question::choice(
            kind,
            ChoiceQuestion {
                id: id.to_string(),
                options,
                required: false,
            },
        ));
        self
    }

    /// Mark the most recently added question as required.
    pub fn required(mut self) -> Self {
        if let Some(question) = self.last_page().questions.last_mut() {
            question.set_required(true);
        }
        self
    }

    pub fn with_audio_file(mut self, id: &str, url: &str) -> Self {
        self.survey.audio_files.push(AudioFile {
            id: id.to_string(),
            name: id.to_string(),
            audio_url: url.to_string(),
            duration: None,
        });
        self
    }

    pub fn with_audio_button(mut self, id: &str, audio_file_id: &str, x: f64, y: f64) -> Self {
        self.last_page().audio_buttons.push(AudioButton {
            id: id.to_string(),
            x,
            y,
            audio_file_id: Some(audio_file_id.to_string()),
            label: None,
            audio_url: None,
        });
        self
    }

    pub fn build(self) -> Survey {
        self.survey
    }
}

// ============================================================================
// Pointer helpers
// ============================================================================

/// 1000x500 container offset by (100, 50), so one percent is 10px wide and
/// 5px tall.
pub fn container() -> ContainerRect {
    ContainerRect::new(100.0, 50.0, 1000.0, 500.0)
}

/// Pointer event at a percentage position of [`container`].
pub fn pointer_at(x: f64, y: f64) -> PointerEvent {
    let rect = container();
    PointerEvent::new(
        PixelPoint::new(rect.left + x * rect.width / 100.0, rect.top + y * rect.height / 100.0),
        rect,
    )
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

pub fn question_count(survey: &Survey, page_index: usize) -> usize {
    survey.page(page_index).map_or(0, |page| page.questions.len())
}
