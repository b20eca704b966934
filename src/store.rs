//! Persistence boundary for surveys and submissions.
//!
//! The editor only talks to the [`SurveyStore`] and [`SubmissionStore`]
//! traits. [`MemoryStore`] backs tests and embedded hosts; [`JsonFileStore`]
//! keeps one JSON document per survey on disk.

use crate::code::{Lookup, lookup_key};
use crate::error::{SurveyError, SurveyResult};
use crate::types::{Answer, Submission, Survey, new_id};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Storage of survey documents.
pub trait SurveyStore {
    /// Persist a new survey. The store assigns an id when the survey has
    /// none and starts its submission count at zero.
    fn create(&self, survey: Survey) -> SurveyResult<Survey>;

    /// Overwrite an existing survey. The stored code and submission count
    /// are kept.
    fn update(&self, survey: &Survey) -> SurveyResult<Survey>;

    fn get(&self, id: &str) -> SurveyResult<Survey>;

    fn find_by_code(&self, code: &str) -> SurveyResult<Survey>;

    /// Every code currently assigned, used as the uniqueness oracle
    fn codes(&self) -> SurveyResult<HashSet<String>>;

    fn list(&self) -> SurveyResult<Vec<Survey>>;

    fn delete(&self, id: &str) -> SurveyResult<()>;

    /// Resolve what a respondent typed: a code or a survey id.
    fn lookup(&self, input: &str) -> SurveyResult<Survey> {
        match lookup_key(input) {
            Lookup::Code(code) => self.find_by_code(&code),
            Lookup::Id(id) => self.get(&id),
        }
    }
}

/// Storage of respondent submissions.
pub trait SubmissionStore {
    /// Record a submission and bump the survey's submission count.
    fn add_submission(&self, survey_id: &str, answers: Vec<Answer>) -> SurveyResult<Submission>;

    /// Submissions of a survey in the order they were received
    fn submissions(&self, survey_id: &str) -> SurveyResult<Vec<Submission>>;
}

fn prepare_new(mut survey: Survey) -> Survey {
    if survey.id.is_empty() {
        survey.id = new_id("s");
    }
    survey.submission_count = 0;
    survey
}

fn merge_update(stored: &Survey, survey: &Survey) -> Survey {
    let mut merged = survey.clone();
    merged.code = stored.code.clone().or_else(|| survey.code.clone());
    merged.submission_count = stored.submission_count;
    merged
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Default)]
struct MemoryState {
    surveys: Vec<Survey>,
    submissions: HashMap<String, Vec<Submission>>,
}

/// Process-local store. Surveys keep insertion order.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SurveyStore for MemoryStore {
    fn create(&self, survey: Survey) -> SurveyResult<Survey> {
        let survey = prepare_new(survey);
        let mut state = self.state.write();
        state.surveys.push(survey.clone());
        debug!(survey = %survey.id, "Created survey");
        Ok(survey)
    }

    fn update(&self, survey: &Survey) -> SurveyResult<Survey> {
        let mut state = self.state.write();
        let slot = state
            .surveys
            .iter_mut()
            .find(|stored| stored.id == survey.id)
            .ok_or_else(|| SurveyError::NotFound(survey.id.clone()))?;
        *slot = merge_update(slot, survey);
        Ok(slot.clone())
    }

    fn get(&self, id: &str) -> SurveyResult<Survey> {
        self.state
            .read()
            .surveys
            .iter()
            .find(|survey| survey.id == id)
            .cloned()
            .ok_or_else(|| SurveyError::NotFound(id.to_string()))
    }

    fn find_by_code(&self, code: &str) -> SurveyResult<Survey> {
        self.state
            .read()
            .surveys
            .iter()
            .find(|survey| survey.code.as_deref() == Some(code))
            .cloned()
            .ok_or_else(|| SurveyError::NotFound(code.to_string()))
    }

    fn codes(&self) -> SurveyResult<HashSet<String>> {
        Ok(self
            .state
            .read()
            .surveys
            .iter()
            .filter_map(|survey| survey.code.clone())
            .collect())
    }

    fn list(&self) -> SurveyResult<Vec<Survey>> {
        Ok(self.state.read().surveys.clone())
    }

    fn delete(&self, id: &str) -> SurveyResult<()> {
        let mut state = self.state.write();
        let before = state.surveys.len();
        state.surveys.retain(|survey| survey.id != id);
        if state.surveys.len() == before {
            return Err(SurveyError::NotFound(id.to_string()));
        }
        state.submissions.remove(id);
        Ok(())
    }
}

impl SubmissionStore for MemoryStore {
    fn add_submission(&self, survey_id: &str, answers: Vec<Answer>) -> SurveyResult<Submission> {
        let mut state = self.state.write();
        let survey = state
            .surveys
            .iter_mut()
            .find(|survey| survey.id == survey_id)
            .ok_or_else(|| SurveyError::NotFound(survey_id.to_string()))?;
        survey.submission_count += 1;

        let submission = Submission {
            id: new_id("r"),
            survey_id: survey_id.to_string(),
            answers,
        };
        state
            .submissions
            .entry(survey_id.to_string())
            .or_default()
            .push(submission.clone());
        Ok(submission)
    }

    fn submissions(&self, survey_id: &str) -> SurveyResult<Vec<Submission>> {
        Ok(self
            .state
            .read()
            .submissions
            .get(survey_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Store that keeps `surveys/<id>.json` and `submissions/<id>.json` under a
/// root directory.
pub struct JsonFileStore {
    root: PathBuf,
    // Serializes read-modify-write cycles within the process
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> SurveyResult<Self> {
        let root = root.into();
        fs::create_dir_all(root.join("surveys"))?;
        fs::create_dir_all(root.join("submissions"))?;
        info!(root = %root.display(), "Opened survey store");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Default location: `<data dir>/surveycanvas`
    pub fn default_root() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("surveycanvas"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn survey_path(&self, id: &str) -> SurveyResult<PathBuf> {
        Ok(self.root.join("surveys").join(document_name(id)?))
    }

    fn submissions_path(&self, survey_id: &str) -> SurveyResult<PathBuf> {
        Ok(self.root.join("submissions").join(document_name(survey_id)?))
    }

    fn write_survey(&self, survey: &Survey) -> SurveyResult<()> {
        let path = self.survey_path(&survey.id)?;
        commit(&stage(&path, survey)?, &path)
    }

    fn read_survey(&self, id: &str) -> SurveyResult<Survey> {
        let path = self.survey_path(id)?;
        if !path.exists() {
            return Err(SurveyError::NotFound(id.to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn read_submissions(&self, survey_id: &str) -> SurveyResult<Vec<Submission>> {
        let path = self.submissions_path(survey_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// File name for a stored document. Ids come from respondent input via
/// `lookup`, so anything that could leave the store directory is treated as
/// an unknown survey.
fn document_name(id: &str) -> SurveyResult<String> {
    let safe = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !safe {
        warn!(id, "Rejected survey id with unsupported characters");
        return Err(SurveyError::NotFound(id.to_string()));
    }
    Ok(format!("{}.json", id))
}

/// Write `value` next to `path` as a temporary file.
fn stage<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> SurveyResult<PathBuf> {
    let staged = path.with_extension("json.tmp");
    fs::write(&staged, serde_json::to_string_pretty(value)?)?;
    Ok(staged)
}

/// Move a staged file over its destination.
fn commit(staged: &Path, path: &Path) -> SurveyResult<()> {
    fs::rename(staged, path)?;
    Ok(())
}

impl SurveyStore for JsonFileStore {
    fn create(&self, survey: Survey) -> SurveyResult<Survey> {
        let _guard = self.write_lock.lock();
        let survey = prepare_new(survey);
        self.write_survey(&survey)?;
        debug!(survey = %survey.id, "Created survey file");
        Ok(survey)
    }

    fn update(&self, survey: &Survey) -> SurveyResult<Survey> {
        let _guard = self.write_lock.lock();
        let stored = self.read_survey(&survey.id)?;
        let merged = merge_update(&stored, survey);
        self.write_survey(&merged)?;
        Ok(merged)
    }

    fn get(&self, id: &str) -> SurveyResult<Survey> {
        self.read_survey(id)
    }

    fn find_by_code(&self, code: &str) -> SurveyResult<Survey> {
        self.list()?
            .into_iter()
            .find(|survey| survey.code.as_deref() == Some(code))
            .ok_or_else(|| SurveyError::NotFound(code.to_string()))
    }

    fn codes(&self) -> SurveyResult<HashSet<String>> {
        Ok(self
            .list()?
            .into_iter()
            .filter_map(|survey| survey.code)
            .collect())
    }

    fn list(&self) -> SurveyResult<Vec<Survey>> {
        let mut surveys = Vec::new();
        for entry in fs::read_dir(self.root.join("surveys"))? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let contents = fs::read_to_string(&path)?;
            surveys.push(serde_json::from_str::<Survey>(&contents)?);
        }
        surveys.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(surveys)
    }

    fn delete(&self, id: &str) -> SurveyResult<()> {
        let _guard = self.write_lock.lock();
        let path = self.survey_path(id)?;
        if !path.exists() {
            return Err(SurveyError::NotFound(id.to_string()));
        }
        fs::remove_file(path)?;
        let submissions = self.submissions_path(id)?;
        if submissions.exists() {
            fs::remove_file(submissions)?;
        }
        Ok(())
    }
}

impl SubmissionStore for JsonFileStore {
    fn add_submission(&self, survey_id: &str, answers: Vec<Answer>) -> SurveyResult<Submission> {
        let _guard = self.write_lock.lock();
        let mut survey = self.read_survey(survey_id)?;

        let submission = Submission {
            id: new_id("r"),
            survey_id: survey_id.to_string(),
            answers,
        };
        let mut submissions = self.read_submissions(survey_id)?;
        submissions.push(submission.clone());
        survey.submission_count += 1;

        // Stage both documents before replacing either one
        let submissions_path = self.submissions_path(survey_id)?;
        let survey_path = self.survey_path(survey_id)?;
        let staged_submissions = stage(&submissions_path, &submissions)?;
        let staged_survey = match stage(&survey_path, &survey) {
            Ok(staged) => staged,
            Err(e) => {
                let _ = fs::remove_file(&staged_submissions);
                return Err(e);
            }
        };
        commit(&staged_submissions, &submissions_path)?;
        commit(&staged_survey, &survey_path)?;
        Ok(submission)
    }

    fn submissions(&self, survey_id: &str) -> SurveyResult<Vec<Submission>> {
        self.read_submissions(survey_id)
    }
}
