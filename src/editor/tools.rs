//! Tool selection, the audio pool and per-question settings.

use crate::editor::Editor;
use crate::error::{SurveyError, SurveyResult};
use crate::input::OpenQuestion;
use crate::registry::{Applied, Command};
use crate::types::Tool;
use tracing::{debug, info};

impl Editor {
    /// Pick a tool from the toolbox. An open choice question is finished
    /// first and returned.
    pub fn select_tool(&mut self, tool: Tool) -> Option<OpenQuestion> {
        self.drag.abort();
        let finished = self.mode.select_tool(&tool);
        if let Some(open) = &finished {
            debug!(question = %open.question_id, ?tool, "Finished open question on tool switch");
        }
        finished
    }

    /// The explicit "Finish Question" action.
    pub fn finish_question(&mut self) -> Option<OpenQuestion> {
        self.mode.finish_question()
    }

    /// Add a file to the survey-wide audio pool, returning its id.
    pub fn add_audio_file(
        &mut self,
        name: impl Into<String>,
        audio_url: impl Into<String>,
        duration: Option<f64>,
    ) -> SurveyResult<String> {
        let applied = self.registry.apply(Command::AddAudioFile {
            name: name.into(),
            audio_url: audio_url.into(),
            duration,
        })?;
        match applied {
            Applied::AudioFileAdded { id } => Ok(id),
            _ => Err(SurveyError::validation("Audio file was not added")),
        }
    }

    /// Remove an audio file together with every button playing it.
    /// Returns the number of buttons removed.
    pub fn delete_audio_file(&mut self, id: &str) -> SurveyResult<usize> {
        let applied = self.registry.apply(Command::DeleteAudioFile { id: id.to_string() })?;
        if self.mode.pending_audio_file() == Some(id) {
            self.mode.set_pending_audio_file(None);
        }
        let removed = match applied {
            Applied::AudioFileDeleted { buttons_removed } => buttons_removed,
            _ => 0,
        };
        info!(audio_file = %id, buttons_removed = removed, "Deleted audio file");
        Ok(removed)
    }

    /// Choose the audio file the next placement uses. Switches to the audio
    /// button tool when another tool is active.
    pub fn select_pending_audio(&mut self, audio_file_id: &str) -> SurveyResult<()> {
        if self.survey().audio_file(audio_file_id).is_none() {
            return Err(SurveyError::reference("audio file", audio_file_id));
        }
        if self.mode.tool() != Tool::AudioButton {
            self.select_tool(Tool::AudioButton);
        }
        self.mode.set_pending_audio_file(Some(audio_file_id.to_string()));
        Ok(())
    }

    /// Mark a question on the current page as required or optional.
    pub fn set_required(&mut self, question_id: &str, required: bool) -> SurveyResult<()> {
        self.registry.apply(Command::SetRequired {
            page_index: self.current_page,
            question_id: question_id.to_string(),
            required,
        })?;
        Ok(())
    }

    /// Delete a whole question from the current page.
    pub fn delete_question(&mut self, question_id: &str) -> SurveyResult<()> {
        self.registry.apply(Command::DeleteQuestion {
            page_index: self.current_page,
            question_id: question_id.to_string(),
        })?;
        if self
            .mode
            .open_question()
            .is_some_and(|open| open.question_id == question_id)
        {
            self.mode.take_open_question();
        }
        Ok(())
    }
}
