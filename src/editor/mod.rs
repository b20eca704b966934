//! Editor module - one authoring session over a survey.
//!
//! This module is organized into several submodules:
//! - `state` - The Editor struct, construction and read accessors
//! - `pages` - Title and page management
//! - `tools` - Tool selection, audio pool and question settings
//! - `save` - Validation and hand-off to a store
//!
//! Pointer handling lives in `crate::input` as further `impl Editor` blocks.

mod pages;
mod save;
mod state;
mod tools;

pub use state::{Cursor, Editor};
