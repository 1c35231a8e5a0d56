//! Framework-agnostic stage-template configuration model for the BAMS
//! archive platform.
//!
//! Holds the dictionary option types, the ordered stage list model, the
//! fail-fast template validator, and the editor-session lifecycle. Nothing
//! in this crate performs I/O; every operation is synchronous and can be
//! unit-tested without a backend or a UI layer.

pub mod dictionary;
pub mod editor;
pub mod template;
pub mod types;
pub mod validation;
