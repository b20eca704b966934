//! Save flow - validate, then create or update through a store.

use crate::code::generate_unique_code;
use crate::editor::Editor;
use crate::error::SurveyResult;
use crate::store::SurveyStore;
use crate::types::Survey;
use crate::validation::validate_for_save;
use rand::Rng;
use std::sync::Arc;
use tracing::info;

impl Editor {
    /// Persist the survey.
    ///
    /// A survey without an id is created: it gets a fresh unique code and
    /// the store assigns its id. Otherwise the stored survey is updated. The
    /// editor adopts what the store returns. On any error the document is
    /// left as it was.
    pub fn save<S, R>(&mut self, store: &S, rng: &mut R) -> SurveyResult<Arc<Survey>>
    where
        S: SurveyStore + ?Sized,
        R: Rng + ?Sized,
    {
        validate_for_save(self.survey())?;

        let stored = if self.survey().id.is_empty() {
            let taken = store.codes()?;
            let code = generate_unique_code(
                rng,
                |candidate| taken.contains(candidate),
                self.config.code_generation_attempts,
            )?;
            let mut survey = self.survey().clone();
            survey.code = Some(code);
            let created = store.create(survey)?;
            info!(survey = %created.id, code = ?created.code, "Created survey");
            created
        } else {
            let updated = store.update(self.survey())?;
            info!(survey = %updated.id, "Updated survey");
            updated
        };

        self.registry.replace(stored);
        Ok(self.registry.snapshot())
    }
}
