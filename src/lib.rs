//! Editing core for image-overlay surveys.
//!
//! Authors place choice markers, short answer boxes and audio buttons over
//! background images; positions are stored as percentages of the rendered
//! image so they survive any canvas size. Respondents answer through a
//! [`response::ResponseSheet`] and results are tabulated by [`export`].

pub mod code;
pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod export;
pub mod hit_testing;
pub mod input;
pub mod logging;
pub mod migration;
pub mod perf;
pub mod registry;
pub mod response;
pub mod spatial_index;
pub mod store;
pub mod types;
pub mod validation;

pub use editor::{Cursor, Editor};
pub use error::{ErrorKind, SurveyError, SurveyResult};
