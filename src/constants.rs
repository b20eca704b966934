//! Application-wide constants.
//!
//! Centralizes magic numbers and geometry defaults so the editor, the
//! migration pass and the tests agree on them.

// ============================================================================
// Coordinate Space
// ============================================================================

/// Lower bound of the percentage coordinate space
pub const PERCENT_MIN: f64 = 0.0;

/// Upper bound of the percentage coordinate space
pub const PERCENT_MAX: f64 = 100.0;

// ============================================================================
// Element Defaults
// ============================================================================

/// Default width of a newly placed short answer box (percent of container)
pub const DEFAULT_SHORT_ANSWER_WIDTH: f64 = 30.0;

/// Default height of a newly placed short answer box (percent of container)
pub const DEFAULT_SHORT_ANSWER_HEIGHT: f64 = 8.0;

/// Position given to audio buttons synthesized from legacy page audio
pub const LEGACY_AUDIO_BUTTON_POSITION: (f64, f64) = (50.0, 10.0);

/// Name given to audio files synthesized from legacy inline audio
pub const LEGACY_AUDIO_FILE_NAME: &str = "Legacy audio";

/// Id prefix for audio files synthesized from a page's inline audio
pub const LEGACY_PAGE_AUDIO_PREFIX: &str = "legacy-";

/// Id prefix for audio files synthesized from a button's inline audio
pub const LEGACY_BUTTON_AUDIO_PREFIX: &str = "legacy-button-";

// ============================================================================
// Hit Testing
// ============================================================================

/// Grab radius around a choice marker, larger than the drawn marker
pub const OPTION_HIT_RADIUS: f64 = 3.5;

/// Grab radius around an audio button marker
pub const AUDIO_BUTTON_HIT_RADIUS: f64 = 3.5;

// ============================================================================
// Survey Codes
// ============================================================================

/// Number of random codes tried before giving up
pub const CODE_GENERATION_ATTEMPTS: usize = 50;

/// Digits on each side of the code separator
pub const CODE_GROUP_DIGITS: usize = 3;

// ============================================================================
// Export
// ============================================================================

/// Header of the first column of the results table
pub const SUBMISSION_ID_HEADER: &str = "Submission ID";

/// Cell text for a choice answer whose option no longer exists
pub const UNKNOWN_OPTION_CELL: &str = "(unknown)";

// ============================================================================
// Logging
// ============================================================================

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "surveycanvas=info";
