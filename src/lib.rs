//! absketch: a canvas editor for graphical abstracts.
//!
//! A document is a fixed 1280x720 canvas carrying a header band, a footer
//! citation strip, and freely arranged content sections. The crate provides
//! the document model with snapshot undo/redo, a pointer gesture engine for
//! move/resize, an article-to-canvas content binder, and export to raster
//! images or an editable slide deck.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod binder;
pub mod document;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod history;
pub mod icons;
pub mod panels;
pub mod section;
pub mod services;
pub mod session;
pub mod store;
pub mod template;
pub mod texture_cache;

pub use app::{AbsketchApp, AppServices};
pub use document::Document;
pub use section::Section;
pub use session::EditorSession;
