//! Core types for the survey document.
//!
//! This module defines the data structures exchanged with the persistence
//! layer: surveys, pages, questions, audio assets and submissions. Field
//! names serialize in camelCase and questions carry a `type` tag so stored
//! documents stay readable by every client, including the legacy optional
//! fields the migration pass needs.

use crate::input::coords::Percent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Generate a fresh opaque id with a short readable prefix.
///
/// Ids are never reused: each call draws a new random UUID.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

// ============================================================================
// Survey Document
// ============================================================================

/// The authored document: ordered pages plus the shared audio pool.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    /// Durable primary key, empty until the store assigns one
    #[serde(default)]
    pub id: String,
    pub title: String,
    /// Pages are shared between snapshots and copied on write
    #[serde(default)]
    pub pages: Vec<Arc<Page>>,
    /// Survey-wide audio pool referenced by audio buttons
    #[serde(default)]
    pub audio_files: Vec<AudioFile>,
    /// Short `ddd-ddd` code respondents type to join
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub submission_count: u32,
}

impl Survey {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index).map(|page| page.as_ref())
    }

    pub fn audio_file(&self, id: &str) -> Option<&AudioFile> {
        self.audio_files.iter().find(|file| file.id == id)
    }

    /// Resolve the audio file a button plays.
    ///
    /// A dangling reference resolves to `None` so renderers can skip the
    /// button instead of failing.
    pub fn resolve_audio(&self, button: &AudioButton) -> Option<&AudioFile> {
        button
            .audio_file_id
            .as_deref()
            .and_then(|id| self.audio_file(id))
    }

    /// All questions across all pages, in page order then creation order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.pages.iter().flat_map(|page| page.questions.iter())
    }

    pub fn find_question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|question| question.id() == id)
    }
}

/// One background image with the elements positioned over it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    /// Opaque image reference produced by the ingestion layer
    pub background_image: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub audio_buttons: Vec<AudioButton>,
    /// Legacy single inline audio (upgraded on load)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Page {
    pub fn new(background_image: impl Into<String>) -> Self {
        Self {
            id: new_id("p"),
            background_image: background_image.into(),
            ..Default::default()
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }

    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|question| question.id() == id)
    }

    pub fn audio_button(&self, id: &str) -> Option<&AudioButton> {
        self.audio_buttons.iter().find(|button| button.id == id)
    }

    /// Current stored geometry of an element on this page.
    pub fn geometry(&self, element: &ElementRef) -> Option<ElementGeometry> {
        match element {
            ElementRef::ShortAnswer { question_id } => match self.question(question_id)? {
                Question::ShortAnswer(q) => Some(ElementGeometry::Rect {
                    origin: Percent::new(q.x, q.y),
                    width: q.width,
                    height: q.height,
                }),
                _ => None,
            },
            ElementRef::ChoiceOption {
                question_id,
                option_id,
            } => {
                let option = self.question(question_id)?.as_choice()?.option(option_id)?;
                Some(ElementGeometry::Point(Percent::new(option.x, option.y)))
            }
            ElementRef::AudioButton { button_id } => {
                let button = self.audio_button(button_id)?;
                Some(ElementGeometry::Point(Percent::new(button.x, button.y)))
            }
        }
    }
}

// ============================================================================
// Questions
// ============================================================================

/// A question placed on a page.
///
/// Short answers are rectangles; choice questions are ordered sets of point
/// markers. The `type` tag matches the stored document format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "SHORT_ANSWER")]
    ShortAnswer(ShortAnswerQuestion),
    #[serde(rename = "SINGLE_CHOICE")]
    SingleChoice(ChoiceQuestion),
    #[serde(rename = "MULTIPLE_CHOICE")]
    MultipleChoice(ChoiceQuestion),
}

impl Question {
    pub fn choice(kind: ChoiceKind, question: ChoiceQuestion) -> Self {
        match kind {
            ChoiceKind::Single => Question::SingleChoice(question),
            ChoiceKind::Multiple => Question::MultipleChoice(question),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Question::ShortAnswer(q) => &q.id,
            Question::SingleChoice(q) | Question::MultipleChoice(q) => &q.id,
        }
    }

    /// Stored type tag, also used in result table headers
    pub fn type_label(&self) -> &'static str {
        match self {
            Question::ShortAnswer(_) => "SHORT_ANSWER",
            Question::SingleChoice(_) => "SINGLE_CHOICE",
            Question::MultipleChoice(_) => "MULTIPLE_CHOICE",
        }
    }

    pub fn choice_kind(&self) -> Option<ChoiceKind> {
        match self {
            Question::ShortAnswer(_) => None,
            Question::SingleChoice(_) => Some(ChoiceKind::Single),
            Question::MultipleChoice(_) => Some(ChoiceKind::Multiple),
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceQuestion> {
        match self {
            Question::ShortAnswer(_) => None,
            Question::SingleChoice(q) | Question::MultipleChoice(q) => Some(q),
        }
    }

    pub fn as_choice_mut(&mut self) -> Option<&mut ChoiceQuestion> {
        match self {
            Question::ShortAnswer(_) => None,
            Question::SingleChoice(q) | Question::MultipleChoice(q) => Some(q),
        }
    }

    pub fn is_required(&self) -> bool {
        match self {
            Question::ShortAnswer(q) => q.required,
            Question::SingleChoice(q) | Question::MultipleChoice(q) => q.required,
        }
    }

    pub fn set_required(&mut self, required: bool) {
        match self {
            Question::ShortAnswer(q) => q.required = required,
            Question::SingleChoice(q) | Question::MultipleChoice(q) => q.required = required,
        }
    }
}

/// A rectangular free-text capture zone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortAnswerQuestion {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

/// An ordered set of point markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    pub id: String,
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl ChoiceQuestion {
    pub fn option(&self, id: &str) -> Option<&ChoiceOption> {
        self.options.iter().find(|option| option.id == id)
    }

    /// 1-based display position of an option; this is also what exports show
    pub fn ordinal_of(&self, option_id: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.id == option_id)
            .map(|index| index + 1)
    }
}

/// A single choice marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Whether a choice question accepts one option or a set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChoiceKind {
    Single,
    Multiple,
}

// ============================================================================
// Audio
// ============================================================================

/// A survey-level stored audio asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioFile {
    pub id: String,
    pub name: String,
    /// Opaque audio reference produced by the ingestion layer
    pub audio_url: String,
    /// Duration in seconds, when the ingestion layer measured it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

/// A page-positioned marker that plays one audio file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioButton {
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Weak reference into `Survey::audio_files`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Legacy inline audio, kept as a fallback for healing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// One respondent's completed survey.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub survey_id: String,
    pub answers: Vec<Answer>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
}

/// A single value for short answers and single choice, a set for multiple
/// choice. Choice values hold option ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
}

impl AnswerValue {
    /// The answer as a list of values, whatever its shape
    pub fn values(&self) -> Vec<&str> {
        match self {
            AnswerValue::Text(value) => vec![value.as_str()],
            AnswerValue::Choices(values) => values.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(value) => value.trim().is_empty(),
            AnswerValue::Choices(values) => values.is_empty(),
        }
    }
}

// ============================================================================
// Editor Elements
// ============================================================================

/// Tool types for the editor toolbox
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Tool {
    #[default]
    None,
    ShortAnswer,
    SingleChoice,
    MultipleChoice,
    AudioButton,
    Move,
    Delete,
}

impl Tool {
    pub fn choice_kind(&self) -> Option<ChoiceKind> {
        match self {
            Tool::SingleChoice => Some(ChoiceKind::Single),
            Tool::MultipleChoice => Some(ChoiceKind::Multiple),
            _ => None,
        }
    }
}

/// Identity of a single interactive element on a page.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementRef {
    ShortAnswer { question_id: String },
    ChoiceOption { question_id: String, option_id: String },
    AudioButton { button_id: String },
}

impl ElementRef {
    pub fn short_answer(question_id: impl Into<String>) -> Self {
        ElementRef::ShortAnswer {
            question_id: question_id.into(),
        }
    }

    pub fn option(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        ElementRef::ChoiceOption {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }

    pub fn audio_button(button_id: impl Into<String>) -> Self {
        ElementRef::AudioButton {
            button_id: button_id.into(),
        }
    }

    /// Owning question, if the element belongs to one
    pub fn question_id(&self) -> Option<&str> {
        match self {
            ElementRef::ShortAnswer { question_id }
            | ElementRef::ChoiceOption { question_id, .. } => Some(question_id),
            ElementRef::AudioButton { .. } => None,
        }
    }
}

/// Stored shape of an element: a point marker or an anchored rectangle
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ElementGeometry {
    Point(Percent),
    Rect {
        origin: Percent,
        width: f64,
        height: f64,
    },
}

impl ElementGeometry {
    /// Anchor used for grab offsets: the marker center or the top-left corner
    pub fn origin(&self) -> Percent {
        match self {
            ElementGeometry::Point(point) => *point,
            ElementGeometry::Rect { origin, .. } => *origin,
        }
    }
}
