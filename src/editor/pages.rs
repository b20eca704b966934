//! Title and page management.

use crate::editor::Editor;
use crate::error::SurveyResult;
use crate::registry::Command;
use tracing::{debug, info};

impl Editor {
    pub fn set_title(&mut self, title: impl Into<String>) -> SurveyResult<()> {
        self.registry.apply(Command::SetTitle {
            title: title.into(),
        })?;
        Ok(())
    }

    /// Append a page. The first page of a survey becomes the selected page.
    pub fn add_page(&mut self, background_image: impl Into<String>) -> SurveyResult<String> {
        self.registry.apply(Command::AddPage {
            background_image: background_image.into(),
        })?;
        let index = self.survey().pages.len() - 1;
        let page_id = self.survey().pages[index].id.clone();
        if index == 0 {
            self.current_page = 0;
        }
        debug!(page = %page_id, index, "Added page");
        Ok(page_id)
    }

    /// Append one page per background image, in order.
    pub fn add_pages<I, S>(&mut self, background_images: I) -> SurveyResult<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids = background_images
            .into_iter()
            .map(|image| self.add_page(image))
            .collect::<SurveyResult<Vec<_>>>()?;
        info!(count = ids.len(), "Added pages");
        Ok(ids)
    }

    /// Remove a page. A selection left past the end moves to the last page.
    pub fn delete_page(&mut self, index: usize) -> SurveyResult<()> {
        let page_id = self.registry.page(index).map(|page| page.id.clone());
        self.registry.apply(Command::DeletePage { index })?;
        let remaining = self.survey().pages.len();

        let open_on_page = self
            .mode
            .open_question()
            .is_some_and(|open| Some(&open.page_id) == page_id.as_ref());
        if open_on_page {
            self.mode.finish_question();
        }
        if index == self.current_page {
            self.drag.abort();
        }
        if self.current_page >= remaining {
            self.current_page = remaining.saturating_sub(1);
        }
        info!(index, remaining, "Deleted page");
        Ok(())
    }

    /// Switch the canvas to another page. An open choice question is
    /// finished and an unfinished drag dropped.
    pub fn select_page(&mut self, index: usize) -> bool {
        if self.registry.page(index).is_none() {
            return false;
        }
        if index != self.current_page {
            if self.mode.is_editing_open_question() {
                if let Some(open) = self.mode.finish_question() {
                    debug!(question = %open.question_id, "Finished open question on page switch");
                }
            }
            self.drag.abort();
            self.current_page = index;
        }
        true
    }
}
