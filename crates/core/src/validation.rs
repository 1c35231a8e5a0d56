//! Submission-readiness checks for a stage template.
//!
//! Checks run in a fixed order and stop at the first failure, so the UI
//! points at exactly one problem at a time. Per stage, duplicate-kind is
//! checked before empty-required-documents; that precedence is part of
//! the contract, not an accident of implementation.

use crate::template::StageTemplate;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum template name length, in characters (names are routinely CJK).
pub const MAX_TEMPLATE_NAME_LEN: usize = 100;

/// Maximum template description length, in characters.
pub const MAX_TEMPLATE_DESC_LEN: usize = 500;

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// The single, user-facing reason a template is not submittable.
///
/// Validation either passes or yields exactly one of these; it never
/// reports a partial list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateIssue {
    #[error("Template name must not be empty")]
    EmptyName,

    #[error("Template name too long: {len} chars (max {MAX_TEMPLATE_NAME_LEN})")]
    NameTooLong { len: usize },

    #[error("Template description too long: {len} chars (max {MAX_TEMPLATE_DESC_LEN})")]
    DescriptionTooLong { len: usize },

    #[error("Template must contain at least one stage")]
    NoStages,

    #[error("Stage {order} has no stage kind selected")]
    StageKindRequired { order: u32 },

    #[error("Stage kind '{stage_id}' is used more than once")]
    DuplicateStageKind { stage_id: String },

    #[error("Stage '{stage_id}' has no required documents configured")]
    NoRequiredFiles { stage_id: String },
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// Decide whether `template` is submittable.
///
/// Pure and idempotent: the same unmodified template always yields the
/// same result. Check order is template-level first (name, then stage
/// count), then each stage in list order with kind-selected, then
/// duplicate-kind, then non-empty required documents.
pub fn validate_template(template: &StageTemplate) -> Result<(), TemplateIssue> {
    let name = template.name.trim();
    if name.is_empty() {
        return Err(TemplateIssue::EmptyName);
    }
    let name_len = name.chars().count();
    if name_len > MAX_TEMPLATE_NAME_LEN {
        return Err(TemplateIssue::NameTooLong { len: name_len });
    }
    let desc_len = template.description.chars().count();
    if desc_len > MAX_TEMPLATE_DESC_LEN {
        return Err(TemplateIssue::DescriptionTooLong { len: desc_len });
    }

    if template.stages().is_empty() {
        return Err(TemplateIssue::NoStages);
    }

    for entry in template.stages() {
        if entry.stage_id().is_empty() {
            return Err(TemplateIssue::StageKindRequired {
                order: entry.order(),
            });
        }
        if template.is_duplicate_stage_kind(entry.local_id(), entry.stage_id()) {
            return Err(TemplateIssue::DuplicateStageKind {
                stage_id: entry.stage_id().to_string(),
            });
        }
        if entry.required_file_ids().is_empty() {
            return Err(TemplateIssue::NoRequiredFiles {
                stage_id: entry.stage_id().to_string(),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
