//! Deterministic template rendering for generated repository files.

pub mod files;
pub mod render;

pub use files::Template;
pub use render::{render, TemplateError};
