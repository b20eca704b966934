//! Element registry - the authoritative survey tree and its mutations.
//!
//! Every change is a [`Command`] reduced against the current snapshot,
//! producing the next snapshot. Pages are reference counted and copied on
//! write, so anyone holding an older snapshot keeps seeing a consistent
//! tree and a failed command leaves the registry untouched.

use crate::config::EditorConfig;
use crate::error::{SurveyError, SurveyResult};
use crate::input::coords::{Percent, clamp_point, clamp_rect_origin};
use crate::migration::{self, MigrationReport};
use crate::types::{
    AudioButton, AudioFile, ChoiceKind, ChoiceOption, ChoiceQuestion, ElementGeometry, ElementRef,
    Page, Question, ShortAnswerQuestion, Survey, new_id,
};
use std::sync::Arc;
use tracing::debug;

/// A single mutation of the survey tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTitle {
        title: String,
    },
    AddPage {
        background_image: String,
    },
    DeletePage {
        index: usize,
    },
    PlaceShortAnswer {
        page_index: usize,
        at: Percent,
        width: f64,
        height: f64,
    },
    /// Create a choice question holding exactly one option
    PlaceChoice {
        page_index: usize,
        kind: ChoiceKind,
        at: Percent,
    },
    AppendOption {
        page_index: usize,
        question_id: String,
        at: Percent,
    },
    /// Write a new position for an element; the registry clamps it
    MoveElement {
        page_index: usize,
        element: ElementRef,
        to: Percent,
    },
    DeleteQuestion {
        page_index: usize,
        question_id: String,
    },
    /// Remove one option; the question goes too when it was the last one
    DeleteOption {
        page_index: usize,
        question_id: String,
        option_id: String,
    },
    SetRequired {
        page_index: usize,
        question_id: String,
        required: bool,
    },
    AddAudioFile {
        name: String,
        audio_url: String,
        duration: Option<f64>,
    },
    /// Remove an audio file and every button that plays it
    DeleteAudioFile {
        id: String,
    },
    PlaceAudioButton {
        page_index: usize,
        audio_file_id: String,
        at: Percent,
        label: Option<String>,
    },
    DeleteAudioButton {
        page_index: usize,
        button_id: String,
    },
}

/// What a successfully applied command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    TitleSet,
    PageAdded {
        index: usize,
        page_id: String,
    },
    PageDeleted {
        remaining: usize,
    },
    QuestionPlaced {
        question_id: String,
        /// First option of a new choice question
        option_id: Option<String>,
    },
    OptionAppended {
        option_id: String,
    },
    Moved {
        position: Percent,
    },
    QuestionDeleted {
        question_id: String,
    },
    OptionDeleted {
        question_removed: bool,
    },
    RequiredSet,
    AudioFileAdded {
        id: String,
    },
    AudioFileDeleted {
        buttons_removed: usize,
    },
    AudioButtonPlaced {
        id: String,
    },
    AudioButtonDeleted,
}

/// Produce the snapshot that follows `survey` after `command`.
pub fn reduce(survey: &Survey, command: Command) -> SurveyResult<(Survey, Applied)> {
    let mut next = survey.clone();
    let applied = apply_to(&mut next, command)?;
    Ok((next, applied))
}

fn page_mut(survey: &mut Survey, index: usize) -> SurveyResult<&mut Page> {
    survey
        .pages
        .get_mut(index)
        .map(Arc::make_mut)
        .ok_or_else(|| SurveyError::reference("page", index.to_string()))
}

fn page_ref(survey: &Survey, index: usize) -> SurveyResult<&Page> {
    survey
        .page(index)
        .ok_or_else(|| SurveyError::reference("page", index.to_string()))
}

fn apply_to(survey: &mut Survey, command: Command) -> SurveyResult<Applied> {
    match command {
        Command::SetTitle { title } => {
            survey.title = title;
            Ok(Applied::TitleSet)
        }

        Command::AddPage { background_image } => {
            let page = Page::new(background_image);
            let page_id = page.id.clone();
            survey.pages.push(Arc::new(page));
            Ok(Applied::PageAdded {
                index: survey.pages.len() - 1,
                page_id,
            })
        }

        Command::DeletePage { index } => {
            if index >= survey.pages.len() {
                return Err(SurveyError::reference("page", index.to_string()));
            }
            survey.pages.remove(index);
            Ok(Applied::PageDeleted {
                remaining: survey.pages.len(),
            })
        }

        Command::PlaceShortAnswer {
            page_index,
            at,
            width,
            height,
        } => {
            let page = page_mut(survey, page_index)?;
            let origin = clamp_rect_origin(at, width, height);
            let question_id = new_id("q");
            page.questions.push(Question::ShortAnswer(ShortAnswerQuestion {
                id: question_id.clone(),
                x: origin.x,
                y: origin.y,
                width,
                height,
                required: false,
            }));
            Ok(Applied::QuestionPlaced {
                question_id,
                option_id: None,
            })
        }

        Command::PlaceChoice {
            page_index,
            kind,
            at,
        } => {
            let page = page_mut(survey, page_index)?;
            let at = clamp_point(at);
            let question_id = new_id("q");
            let option_id = new_id("o");
            page.questions.push(Question::choice(
                kind,
                ChoiceQuestion {
                    id: question_id.clone(),
                    options: vec![ChoiceOption {
                        id: option_id.clone(),
                        x: at.x,
                        y: at.y,
                    }],
                    required: false,
                },
            ));
            Ok(Applied::QuestionPlaced {
                question_id,
                option_id: Some(option_id),
            })
        }

        Command::AppendOption {
            page_index,
            question_id,
            at,
        } => {
            // Validate before the copy-on-write page clone
            page_ref(survey, page_index)?
                .question(&question_id)
                .and_then(Question::as_choice)
                .ok_or_else(|| SurveyError::reference("choice question", &question_id))?;

            let page = page_mut(survey, page_index)?;
            let choice = page
                .question_mut(&question_id)
                .and_then(Question::as_choice_mut)
                .ok_or_else(|| SurveyError::reference("choice question", &question_id))?;
            let at = clamp_point(at);
            let option_id = new_id("o");
            choice.options.push(ChoiceOption {
                id: option_id.clone(),
                x: at.x,
                y: at.y,
            });
            Ok(Applied::OptionAppended { option_id })
        }

        Command::MoveElement {
            page_index,
            element,
            to,
        } => {
            let geometry = page_ref(survey, page_index)?
                .geometry(&element)
                .ok_or_else(|| SurveyError::reference("element", format!("{:?}", element)))?;
            let position = match geometry {
                ElementGeometry::Point(_) => clamp_point(to),
                ElementGeometry::Rect { width, height, .. } => clamp_rect_origin(to, width, height),
            };
            let page = page_mut(survey, page_index)?;
            write_position(page, &element, position);
            Ok(Applied::Moved { position })
        }

        Command::DeleteQuestion {
            page_index,
            question_id,
        } => {
            if page_ref(survey, page_index)?.question(&question_id).is_none() {
                return Err(SurveyError::reference("question", question_id));
            }
            let page = page_mut(survey, page_index)?;
            page.questions.retain(|question| question.id() != question_id);
            Ok(Applied::QuestionDeleted { question_id })
        }

        Command::DeleteOption {
            page_index,
            question_id,
            option_id,
        } => {
            let exists = page_ref(survey, page_index)?
                .question(&question_id)
                .and_then(Question::as_choice)
                .is_some_and(|choice| choice.option(&option_id).is_some());
            if !exists {
                return Err(SurveyError::reference("option", option_id));
            }

            let page = page_mut(survey, page_index)?;
            let mut question_removed = false;
            if let Some(choice) = page
                .question_mut(&question_id)
                .and_then(Question::as_choice_mut)
            {
                choice.options.retain(|option| option.id != option_id);
                question_removed = choice.options.is_empty();
            }
            if question_removed {
                page.questions.retain(|question| question.id() != question_id);
            }
            Ok(Applied::OptionDeleted { question_removed })
        }

        Command::SetRequired {
            page_index,
            question_id,
            required,
        } => {
            if page_ref(survey, page_index)?.question(&question_id).is_none() {
                return Err(SurveyError::reference("question", question_id));
            }
            let page = page_mut(survey, page_index)?;
            if let Some(question) = page.question_mut(&question_id) {
                question.set_required(required);
            }
            Ok(Applied::RequiredSet)
        }

        Command::AddAudioFile {
            name,
            audio_url,
            duration,
        } => {
            let id = new_id("a");
            survey.audio_files.push(AudioFile {
                id: id.clone(),
                name,
                audio_url,
                duration,
            });
            Ok(Applied::AudioFileAdded { id })
        }

        Command::DeleteAudioFile { id } => {
            if survey.audio_file(&id).is_none() {
                return Err(SurveyError::reference("audio file", id));
            }
            let buttons_removed = delete_audio_file_cascade(survey, &id);
            Ok(Applied::AudioFileDeleted { buttons_removed })
        }

        Command::PlaceAudioButton {
            page_index,
            audio_file_id,
            at,
            label,
        } => {
            if survey.audio_file(&audio_file_id).is_none() {
                return Err(SurveyError::reference("audio file", audio_file_id));
            }
            let page = page_mut(survey, page_index)?;
            let at = clamp_point(at);
            let id = new_id("b");
            page.audio_buttons.push(AudioButton {
                id: id.clone(),
                x: at.x,
                y: at.y,
                audio_file_id: Some(audio_file_id),
                label,
                audio_url: None,
            });
            Ok(Applied::AudioButtonPlaced { id })
        }

        Command::DeleteAudioButton {
            page_index,
            button_id,
        } => {
            if page_ref(survey, page_index)?.audio_button(&button_id).is_none() {
                return Err(SurveyError::reference("audio button", button_id));
            }
            let page = page_mut(survey, page_index)?;
            page.audio_buttons.retain(|button| button.id != button_id);
            Ok(Applied::AudioButtonDeleted)
        }
    }
}

fn write_position(page: &mut Page, element: &ElementRef, position: Percent) {
    match element {
        ElementRef::ShortAnswer { question_id } => {
            if let Some(Question::ShortAnswer(q)) = page.question_mut(question_id) {
                q.x = position.x;
                q.y = position.y;
            }
        }
        ElementRef::ChoiceOption {
            question_id,
            option_id,
        } => {
            let option = page
                .question_mut(question_id)
                .and_then(Question::as_choice_mut)
                .and_then(|choice| choice.options.iter_mut().find(|o| &o.id == option_id));
            if let Some(option) = option {
                option.x = position.x;
                option.y = position.y;
            }
        }
        ElementRef::AudioButton { button_id } => {
            if let Some(button) = page.audio_buttons.iter_mut().find(|b| &b.id == button_id) {
                button.x = position.x;
                button.y = position.y;
            }
        }
    }
}

/// Remove an audio file and every audio button, on any page, that refers to
/// it. Returns the number of buttons removed.
///
/// This is the only place that decides what happens to buttons when their
/// audio goes away: they are deleted, never left dangling.
pub fn delete_audio_file_cascade(survey: &mut Survey, audio_file_id: &str) -> usize {
    survey.audio_files.retain(|file| file.id != audio_file_id);

    let mut removed = 0;
    for page in survey.pages.iter_mut() {
        let references = page
            .audio_buttons
            .iter()
            .filter(|button| button.audio_file_id.as_deref() == Some(audio_file_id))
            .count();
        if references == 0 {
            continue;
        }
        Arc::make_mut(page)
            .audio_buttons
            .retain(|button| button.audio_file_id.as_deref() != Some(audio_file_id));
        removed += references;
    }
    removed
}

/// Owner of the current survey snapshot.
pub struct Registry {
    survey: Arc<Survey>,
    revision: u64,
}

impl Registry {
    /// Wrap a survey as-is.
    pub fn new(survey: Survey) -> Self {
        Self {
            survey: Arc::new(survey),
            revision: 0,
        }
    }

    /// Wrap a persisted survey, upgrading legacy audio shapes first.
    pub fn load(mut survey: Survey) -> (Self, MigrationReport) {
        let report = migration::migrate(&mut survey);
        if !report.is_noop() {
            debug!(survey = %survey.id, ?report, "Migrated legacy survey data");
        }
        (Self::new(survey), report)
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    /// Shared handle to the current snapshot; later mutations never change it
    pub fn snapshot(&self) -> Arc<Survey> {
        Arc::clone(&self.survey)
    }

    /// Incremented by every successful command
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.survey.page(index)
    }

    /// Apply a command. On error the current snapshot is unchanged.
    pub fn apply(&mut self, command: Command) -> SurveyResult<Applied> {
        let (next, applied) = reduce(&self.survey, command)?;
        self.survey = Arc::new(next);
        self.revision += 1;
        Ok(applied)
    }

    /// Place a short answer box with the configured default size
    pub fn place_short_answer(
        &mut self,
        page_index: usize,
        at: Percent,
        config: &EditorConfig,
    ) -> SurveyResult<Applied> {
        self.apply(Command::PlaceShortAnswer {
            page_index,
            at,
            width: config.short_answer_width,
            height: config.short_answer_height,
        })
    }

    /// Replace the whole document (after a save assigned id and code)
    pub fn replace(&mut self, survey: Survey) {
        self.survey = Arc::new(survey);
        self.revision += 1;
    }
}
