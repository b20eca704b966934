//! Upgrade of legacy audio data on load.
//!
//! Older documents stored audio inline: one `audioUrl` per page, or an
//! `audioUrl` on each button. Current documents keep a survey-wide audio
//! pool referenced by id. [`migrate`] rewrites the old shapes into the new
//! one and is idempotent: running it on its own output changes nothing.

use crate::constants::{
    LEGACY_AUDIO_BUTTON_POSITION, LEGACY_AUDIO_FILE_NAME, LEGACY_BUTTON_AUDIO_PREFIX,
    LEGACY_PAGE_AUDIO_PREFIX,
};
use crate::types::{AudioButton, AudioFile, Survey, new_id};
use std::sync::Arc;
use tracing::warn;

/// What a migration pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Pages whose inline audio became a pooled file plus a button
    pub pages_upgraded: usize,
    /// Buttons given an audio file id from their inline audio
    pub buttons_linked: usize,
    /// Pool entries rebuilt for dangling button references
    pub files_reconstructed: usize,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        *self == MigrationReport::default()
    }
}

fn ensure_file(pool: &mut Vec<AudioFile>, id: &str, audio_url: &str) -> bool {
    if pool.iter().any(|file| file.id == id) {
        return false;
    }
    pool.push(AudioFile {
        id: id.to_string(),
        name: LEGACY_AUDIO_FILE_NAME.to_string(),
        audio_url: audio_url.to_string(),
        duration: None,
    });
    true
}

/// Rewrite legacy audio shapes in place.
pub fn migrate(survey: &mut Survey) -> MigrationReport {
    let mut report = MigrationReport::default();
    let Survey {
        pages, audio_files, ..
    } = survey;

    for page in pages.iter_mut() {
        let needs_page_upgrade = page.audio_url.is_some() && page.audio_buttons.is_empty();
        let needs_button_work = page.audio_buttons.iter().any(|button| {
            button.audio_url.is_some()
                && button
                    .audio_file_id
                    .as_deref()
                    .is_none_or(|id| !audio_files.iter().any(|file| file.id == id))
        });
        if !needs_page_upgrade && !needs_button_work {
            continue;
        }

        let page = Arc::make_mut(page);

        if needs_page_upgrade {
            if let Some(url) = page.audio_url.take() {
                let file_id = format!("{}{}", LEGACY_PAGE_AUDIO_PREFIX, page.id);
                ensure_file(audio_files, &file_id, &url);
                let (x, y) = LEGACY_AUDIO_BUTTON_POSITION;
                page.audio_buttons.push(AudioButton {
                    id: new_id("b"),
                    x,
                    y,
                    audio_file_id: Some(file_id),
                    label: None,
                    audio_url: None,
                });
                report.pages_upgraded += 1;
            }
        }

        for button in page.audio_buttons.iter_mut() {
            let Some(url) = button.audio_url.as_deref() else {
                continue;
            };
            match button.audio_file_id.as_deref() {
                None => {
                    let file_id = format!("{}{}", LEGACY_BUTTON_AUDIO_PREFIX, button.id);
                    ensure_file(audio_files, &file_id, url);
                    button.audio_file_id = Some(file_id);
                    report.buttons_linked += 1;
                }
                Some(id) => {
                    if ensure_file(audio_files, id, url) {
                        report.files_reconstructed += 1;
                    }
                }
            }
        }
    }

    for page in pages.iter() {
        for button in &page.audio_buttons {
            let dangling = button
                .audio_file_id
                .as_deref()
                .is_none_or(|id| !audio_files.iter().any(|file| file.id == id));
            if dangling {
                warn!(page = %page.id, button = %button.id, "Audio button has no playable audio");
            }
        }
    }

    report
}
