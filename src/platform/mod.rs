//! # Platform Facilities
//!
//! The collaborators the core does not own: reading image files, printing a
//! rendered report, and remembering preferences between runs.
//!
//! Each one sits behind a small trait or function so the TUI and tests can
//! swap in fakes.

pub mod image;
pub mod preferences;
pub mod print;
