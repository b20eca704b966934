//! Pointer up handling - finalize drags, place elements, delete elements.
//!
//! A release that ends a drag is never also a click. Otherwise the release
//! is a click interpreted by the current editor mode.

use crate::editor::Editor;
use crate::error::SurveyResult;
use crate::input::coords::Percent;
use crate::input::{EditorMode, OpenQuestion, PointerEvent, PointerOutcome};
use crate::profile_scope;
use crate::registry::{Applied, Command};
use crate::types::{ChoiceKind, ElementRef};
use tracing::debug;

impl Editor {
    pub fn handle_pointer_up(&mut self, event: &PointerEvent) -> SurveyResult<PointerOutcome> {
        profile_scope!("handle_pointer_up");

        if self.drag.end() {
            return Ok(PointerOutcome::DragEnded);
        }
        if self.current_page().is_none() {
            return Ok(PointerOutcome::Ignored);
        }
        let Some(pointer) = self.pointer_to_percent(event) else {
            return Ok(PointerOutcome::Ignored);
        };

        match self.mode.clone() {
            EditorMode::Idle | EditorMode::Moving => Ok(PointerOutcome::Ignored),
            EditorMode::PlacingShortAnswer => self.place_short_answer(pointer),
            EditorMode::PlacingChoice { kind, open } => self.place_choice(kind, open, pointer),
            EditorMode::PlacingAudioButton {
                pending_audio_file_id,
            } => match pending_audio_file_id {
                Some(audio_file_id) => self.place_audio_button(audio_file_id, pointer),
                None => {
                    debug!("Audio placement without a selected audio file");
                    Ok(PointerOutcome::Ignored)
                }
            },
            EditorMode::Deleting => self.delete_at(pointer),
        }
    }

    fn place_short_answer(&mut self, pointer: Percent) -> SurveyResult<PointerOutcome> {
        let applied = self
            .registry
            .place_short_answer(self.current_page, pointer, &self.config)?;
        self.mode.reset();
        match applied {
            Applied::QuestionPlaced { question_id, .. } => {
                Ok(PointerOutcome::Placed(ElementRef::short_answer(question_id)))
            }
            _ => Ok(PointerOutcome::Ignored),
        }
    }

    fn place_choice(
        &mut self,
        kind: ChoiceKind,
        open: Option<OpenQuestion>,
        pointer: Percent,
    ) -> SurveyResult<PointerOutcome> {
        let Some(page_id) = self.current_page().map(|page| page.id.clone()) else {
            return Ok(PointerOutcome::Ignored);
        };

        let open = open.filter(|open| {
            open.page_id == page_id
                && self
                    .current_page()
                    .is_some_and(|page| page.question(&open.question_id).is_some())
        });

        if let Some(open) = open {
            let applied = self.registry.apply(Command::AppendOption {
                page_index: self.current_page,
                question_id: open.question_id.clone(),
                at: pointer,
            })?;
            if let Applied::OptionAppended { option_id } = applied {
                return Ok(PointerOutcome::OptionAppended(ElementRef::option(
                    open.question_id,
                    option_id,
                )));
            }
            return Ok(PointerOutcome::Ignored);
        }

        let applied = self.registry.apply(Command::PlaceChoice {
            page_index: self.current_page,
            kind,
            at: pointer,
        })?;
        let Applied::QuestionPlaced {
            question_id,
            option_id: Some(option_id),
        } = applied
        else {
            return Ok(PointerOutcome::Ignored);
        };
        self.mode.open_choice_question(OpenQuestion {
            page_id,
            question_id: question_id.clone(),
        });
        Ok(PointerOutcome::Placed(ElementRef::option(question_id, option_id)))
    }

    fn place_audio_button(
        &mut self,
        audio_file_id: String,
        pointer: Percent,
    ) -> SurveyResult<PointerOutcome> {
        let applied = self.registry.apply(Command::PlaceAudioButton {
            page_index: self.current_page,
            audio_file_id,
            at: pointer,
            label: None,
        })?;
        self.mode.reset();
        match applied {
            Applied::AudioButtonPlaced { id } => {
                Ok(PointerOutcome::Placed(ElementRef::audio_button(id)))
            }
            _ => Ok(PointerOutcome::Ignored),
        }
    }

    fn delete_at(&mut self, pointer: Percent) -> SurveyResult<PointerOutcome> {
        let revision = self.registry.revision();
        let Some(page) = self.registry.page(self.current_page) else {
            return Ok(PointerOutcome::Ignored);
        };
        let Some(target) = self.hit_tester.hit_test(page, revision, pointer) else {
            return Ok(PointerOutcome::Ignored);
        };

        let page_index = self.current_page;
        let command = match &target {
            ElementRef::ShortAnswer { question_id } => Command::DeleteQuestion {
                page_index,
                question_id: question_id.clone(),
            },
            ElementRef::ChoiceOption {
                question_id,
                option_id,
            } => Command::DeleteOption {
                page_index,
                question_id: question_id.clone(),
                option_id: option_id.clone(),
            },
            ElementRef::AudioButton { button_id } => Command::DeleteAudioButton {
                page_index,
                button_id: button_id.clone(),
            },
        };
        self.registry.apply(command)?;
        debug!(?target, "Deleted element");
        Ok(PointerOutcome::Deleted(target))
    }
}
