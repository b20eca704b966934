//! Hit testing - which element lies under the pointer.
//!
//! Priority follows creation order in reverse: the element created last
//! wins, as nothing is layered explicitly. Audio buttons are drawn above
//! questions and therefore outrank every question.
//!
//! The page's elements are indexed in an R-tree which is rebuilt only when
//! the page or the registry revision changes.

use crate::config::EditorConfig;
use crate::input::coords::Percent;
use crate::profile_scope;
use crate::spatial_index::{HitShape, SpatialEntry, SpatialIndex};
use crate::types::{ElementRef, Page, Question};

/// Radii used to turn point markers into hit discs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadii {
    pub option: f64,
    pub audio_button: f64,
}

impl From<&EditorConfig> for HitRadii {
    fn from(config: &EditorConfig) -> Self {
        Self {
            option: config.option_hit_radius,
            audio_button: config.audio_button_hit_radius,
        }
    }
}

impl Default for HitRadii {
    fn default() -> Self {
        HitRadii::from(&EditorConfig::default())
    }
}

/// Flatten a page into spatial entries with their hit priority.
///
/// Questions are ranked by position in the page (later is higher), options
/// by position inside their question, and audio buttons above all
/// questions.
pub fn page_entries(page: &Page, radii: HitRadii) -> Vec<SpatialEntry> {
    let mut entries = Vec::new();
    let mut priority = 0usize;

    for question in &page.questions {
        match question {
            Question::ShortAnswer(q) => {
                entries.push(SpatialEntry {
                    element: ElementRef::short_answer(&q.id),
                    shape: HitShape::Rect {
                        x: q.x,
                        y: q.y,
                        width: q.width,
                        height: q.height,
                    },
                    priority,
                });
                priority += 1;
            }
            Question::SingleChoice(q) | Question::MultipleChoice(q) => {
                for option in &q.options {
                    entries.push(SpatialEntry {
                        element: ElementRef::option(&q.id, &option.id),
                        shape: HitShape::Circle {
                            center: Percent::new(option.x, option.y),
                            radius: radii.option,
                        },
                        priority,
                    });
                    priority += 1;
                }
            }
        }
    }

    for button in &page.audio_buttons {
        entries.push(SpatialEntry {
            element: ElementRef::audio_button(&button.id),
            shape: HitShape::Circle {
                center: Percent::new(button.x, button.y),
                radius: radii.audio_button,
            },
            priority,
        });
        priority += 1;
    }

    entries
}

/// One-off hit test without caching.
pub fn hit_test(page: &Page, pointer: Percent, radii: HitRadii) -> Option<ElementRef> {
    SpatialIndex::from_entries(page_entries(page, radii))
        .topmost_at(pointer)
        .map(|entry| entry.element.clone())
}

struct CachedIndex {
    page_id: String,
    revision: u64,
    index: SpatialIndex,
}

/// Hit tester that keeps the spatial index of the last page it saw.
pub struct HitTester {
    radii: HitRadii,
    cached: Option<CachedIndex>,
}

impl HitTester {
    pub fn new(radii: HitRadii) -> Self {
        Self { radii, cached: None }
    }

    /// Element under `pointer` on `page`, whose contents are current as of
    /// registry `revision`.
    pub fn hit_test(&mut self, page: &Page, revision: u64, pointer: Percent) -> Option<ElementRef> {
        profile_scope!("hit_test");

        let stale = self
            .cached
            .as_ref()
            .is_none_or(|cached| cached.page_id != page.id || cached.revision != revision);

        if stale {
            let index = SpatialIndex::from_entries(page_entries(page, self.radii));
            tracing::trace!(page = %page.id, revision, entries = index.len(), "Rebuilt hit index");
            self.cached = Some(CachedIndex {
                page_id: page.id.clone(),
                revision,
                index,
            });
        }

        self.cached
            .as_ref()
            .and_then(|cached| cached.index.topmost_at(pointer))
            .map(|entry| entry.element.clone())
    }
}

impl Default for HitTester {
    fn default() -> Self {
        Self::new(HitRadii::default())
    }
}
