//! Editor state and read accessors.

use crate::config::EditorConfig;
use crate::hit_testing::{HitRadii, HitTester};
use crate::input::{DragSession, DragSessionManager, EditorMode};
use crate::migration::MigrationReport;
use crate::registry::Registry;
use crate::types::{Page, Survey, Tool};
use std::sync::Arc;
use tracing::info;

/// Pointer cursor the canvas should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Default,
    Crosshair,
    Move,
    Grabbing,
}

/// An authoring session.
pub struct Editor {
    pub(crate) registry: Registry,
    pub(crate) current_page: usize,
    pub(crate) mode: EditorMode,
    pub(crate) drag: DragSessionManager,
    pub(crate) hit_tester: HitTester,
    pub(crate) config: EditorConfig,
}

impl Editor {
    fn with_registry(registry: Registry, config: EditorConfig) -> Self {
        Self {
            registry,
            current_page: 0,
            mode: EditorMode::default(),
            drag: DragSessionManager::new(),
            hit_tester: HitTester::new(HitRadii::from(&config)),
            config,
        }
    }

    /// Start a fresh, unsaved survey.
    pub fn new_survey(title: impl Into<String>, config: EditorConfig) -> Self {
        Self::with_registry(Registry::new(Survey::new(title)), config)
    }

    /// Open a persisted survey, upgrading legacy data first.
    pub fn open(survey: Survey, config: EditorConfig) -> (Self, MigrationReport) {
        let (registry, report) = Registry::load(survey);
        info!(
            survey = %registry.survey().id,
            pages = registry.survey().pages.len(),
            "Opened survey"
        );
        (Self::with_registry(registry, config), report)
    }

    pub fn survey(&self) -> &Survey {
        self.registry.survey()
    }

    /// Shared handle to the current document for renderers
    pub fn snapshot(&self) -> Arc<Survey> {
        self.registry.snapshot()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.registry.page(self.current_page)
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn tool(&self) -> Tool {
        self.mode.tool()
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.session()
    }

    /// Cursor hint: grabbing while dragging, move for the move tool,
    /// crosshair for creation tools.
    pub fn cursor(&self) -> Cursor {
        if self.drag.is_active() {
            Cursor::Grabbing
        } else if self.mode.is_moving() {
            Cursor::Move
        } else if self.mode.is_placing() {
            Cursor::Crosshair
        } else {
            Cursor::Default
        }
    }
}
