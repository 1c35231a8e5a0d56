//! Editing-session lifecycle for the template form.
//!
//! One session owns one [`StageTemplate`] from open to save or cancel.
//! The session also enforces the single-outstanding-save rule: submission
//! is refused while a previous save is still in flight, mirroring the
//! disabled submit control in the form. A failed validation or an aborted
//! save leaves the session open with the user's input intact.

use crate::template::StageTemplate;
use crate::validation::{validate_template, TemplateIssue};

/// Why a submit attempt was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The template failed validation; the editor stays open so the user
    /// can correct the reported issue.
    #[error(transparent)]
    Invalid(#[from] TemplateIssue),

    /// A save request is already outstanding; only one can be in flight
    /// at a time.
    #[error("A save request is already in flight")]
    AlreadyInFlight,
}

/// One open template editor.
#[derive(Debug)]
pub struct EditorSession {
    template: StageTemplate,
    submitting: bool,
}

impl EditorSession {
    /// Open the editor in create mode: a blank template with one empty
    /// stage row.
    pub fn create() -> Self {
        Self {
            template: StageTemplate::blank(),
            submitting: false,
        }
    }

    /// Open the editor on an existing template (deserialized from a
    /// backend detail response).
    pub fn edit(template: StageTemplate) -> Self {
        Self {
            template,
            submitting: false,
        }
    }

    pub fn template(&self) -> &StageTemplate {
        &self.template
    }

    /// Mutable access for the UI layer's edit operations.
    pub fn template_mut(&mut self) -> &mut StageTemplate {
        &mut self.template
    }

    /// Whether a save request is currently outstanding (the submit
    /// control should render disabled).
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validate the template and mark a save as in flight.
    ///
    /// Fails without side effects when validation rejects the template or
    /// when a save is already outstanding.
    pub fn begin_submit(&mut self) -> Result<(), SubmitError> {
        if self.submitting {
            return Err(SubmitError::AlreadyInFlight);
        }
        validate_template(&self.template)?;
        self.submitting = true;
        Ok(())
    }

    /// The save succeeded; the editor closes and the in-memory template
    /// is handed back for any final bookkeeping, then discarded.
    pub fn complete_submit(self) -> StageTemplate {
        self.template
    }

    /// The save failed (transport or server error); keep the session and
    /// the user's input, and allow another attempt.
    pub fn abort_submit(&mut self) {
        self.submitting = false;
    }

    /// The user cancelled; the template is discarded. An in-flight
    /// response, if any, resolves into nothing.
    pub fn discard(self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
