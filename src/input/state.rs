//! Editor mode state machine - what a canvas click means right now.
//!
//! The selected tool and the open multi-click choice session are a single
//! explicit state, so a mode like "moving with an open choice question"
//! cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> PlacingShortAnswer      (select short answer tool)
//! Idle -> PlacingChoice           (select single/multiple choice tool)
//! Idle -> PlacingAudioButton      (select audio button tool)
//! Idle -> Moving / Deleting       (select move/delete tool)
//!
//! PlacingChoice{open: None} -> PlacingChoice{open: Some}   (first placement)
//! PlacingChoice{open: Some} -> Idle                        (finish question)
//! PlacingShortAnswer        -> Idle                        (placement)
//! PlacingAudioButton        -> Idle                        (placement)
//!
//! Any tool selection while a choice question is open finishes it first.
//! ```

use crate::types::{ChoiceKind, Tool};

/// The choice question currently accepting more options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenQuestion {
    pub page_id: String,
    pub question_id: String,
}

/// Unified editor mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorMode {
    /// No tool selected; clicks do nothing
    #[default]
    Idle,

    /// Next click places a short answer box
    PlacingShortAnswer,

    /// Clicks place choice markers
    PlacingChoice {
        kind: ChoiceKind,
        /// Set after the first click; further clicks append options to it
        open: Option<OpenQuestion>,
    },

    /// Next click places a button for the pending audio file
    PlacingAudioButton { pending_audio_file_id: Option<String> },

    /// Pointer down on an element starts a drag
    Moving,

    /// Clicks delete the element under the pointer
    Deleting,
}

impl EditorMode {
    /// Mode entered when `tool` is picked from the toolbox
    pub fn for_tool(tool: &Tool) -> Self {
        match tool {
            Tool::None => Self::Idle,
            Tool::ShortAnswer => Self::PlacingShortAnswer,
            Tool::SingleChoice => Self::PlacingChoice {
                kind: ChoiceKind::Single,
                open: None,
            },
            Tool::MultipleChoice => Self::PlacingChoice {
                kind: ChoiceKind::Multiple,
                open: None,
            },
            Tool::AudioButton => Self::PlacingAudioButton {
                pending_audio_file_id: None,
            },
            Tool::Move => Self::Moving,
            Tool::Delete => Self::Deleting,
        }
    }

    /// Tool that is highlighted in the toolbox for this mode
    pub fn tool(&self) -> Tool {
        match self {
            Self::Idle => Tool::None,
            Self::PlacingShortAnswer => Tool::ShortAnswer,
            Self::PlacingChoice {
                kind: ChoiceKind::Single,
                ..
            } => Tool::SingleChoice,
            Self::PlacingChoice {
                kind: ChoiceKind::Multiple,
                ..
            } => Tool::MultipleChoice,
            Self::PlacingAudioButton { .. } => Tool::AudioButton,
            Self::Moving => Tool::Move,
            Self::Deleting => Tool::Delete,
        }
    }

    /// Returns true if the next click creates an element
    pub fn is_placing(&self) -> bool {
        matches!(
            self,
            Self::PlacingShortAnswer | Self::PlacingChoice { .. } | Self::PlacingAudioButton { .. }
        )
    }

    /// Returns true while a choice question accepts more options
    pub fn is_editing_open_question(&self) -> bool {
        matches!(self, Self::PlacingChoice { open: Some(_), .. })
    }

    pub fn open_question(&self) -> Option<&OpenQuestion> {
        match self {
            Self::PlacingChoice { open, .. } => open.as_ref(),
            _ => None,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Moving)
    }

    pub fn is_deleting(&self) -> bool {
        matches!(self, Self::Deleting)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn pending_audio_file(&self) -> Option<&str> {
        match self {
            Self::PlacingAudioButton {
                pending_audio_file_id,
            } => pending_audio_file_id.as_deref(),
            _ => None,
        }
    }

    /// Select a tool. An open choice question is finished implicitly and
    /// returned so the caller can report it.
    pub fn select_tool(&mut self, tool: &Tool) -> Option<OpenQuestion> {
        let finished = self.take_open_question();
        *self = Self::for_tool(tool);
        finished
    }

    /// Close the open choice question (if any) and go back to idle
    pub fn finish_question(&mut self) -> Option<OpenQuestion> {
        let finished = self.take_open_question();
        *self = Self::Idle;
        finished
    }

    /// Record the question created by the first choice placement
    pub fn open_choice_question(&mut self, question: OpenQuestion) {
        if let Self::PlacingChoice { open, .. } = self {
            *open = Some(question);
        }
    }

    /// Close the open choice question but keep the choice tool selected
    pub fn take_open_question(&mut self) -> Option<OpenQuestion> {
        match self {
            Self::PlacingChoice { open, .. } => open.take(),
            _ => None,
        }
    }

    /// Choose which audio file the next placement uses
    pub fn set_pending_audio_file(&mut self, audio_file_id: Option<String>) {
        if let Self::PlacingAudioButton {
            pending_audio_file_id,
        } = self
        {
            *pending_audio_file_id = audio_file_id;
        }
    }

    /// Reset to Idle state
    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
