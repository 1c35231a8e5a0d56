//! Conversion between the in-memory template model and the wire payloads.
//!
//! This is the only place the model shape and the backend shape meet.
//! Serialization resolves display names from the stage dictionary instead
//! of storing them redundantly in the model; deserialization assigns
//! fresh local ids because the backend has no concept of them.

use std::collections::BTreeSet;

use bams_core::dictionary::Dictionary;
use bams_core::template::{StageEntry, StageTemplate};

use crate::payload::{StagePayload, TemplateDetail, TemplateSaveRequest};

/// Serialize a validated template into the create/update request body.
///
/// When a stage's label is missing from the dictionary the raw value is
/// sent as the display name, so the backend still receives a non-empty
/// one even after a stale-dictionary load.
pub fn to_save_request(
    template: &StageTemplate,
    stage_dictionary: &Dictionary,
) -> TemplateSaveRequest {
    let stages = template
        .stages()
        .iter()
        .map(|entry| StagePayload {
            id: entry.persisted_id(),
            stage_id: entry.stage_id().to_string(),
            stage_display_name: stage_dictionary
                .label_for(entry.stage_id())
                .unwrap_or(entry.stage_id())
                .to_string(),
            stage_order: entry.order(),
            required_file_list: entry.required_file_ids().iter().cloned().collect(),
        })
        .collect();

    TemplateSaveRequest {
        template_id: template.persisted_id,
        template_name: template.name.trim().to_string(),
        template_desc: template.description.clone(),
        stage_count: template.stage_count(),
        stages,
    }
}

/// Rebuild an editable template from a detail response.
///
/// Persisted ids, stage kinds, positions, and required-file sets are kept
/// exactly as returned; only the client-side local ids are new.
pub fn from_detail(detail: TemplateDetail) -> StageTemplate {
    let stages = detail
        .stages
        .into_iter()
        .map(|payload| {
            StageEntry::from_backend(
                payload.id,
                payload.stage_id,
                payload.stage_order,
                payload.required_file_list.into_iter().collect::<BTreeSet<_>>(),
            )
        })
        .collect();

    StageTemplate::from_parts(
        Some(detail.template_id),
        detail.template_name,
        detail.template_desc.unwrap_or_default(),
        stages,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bams_core::dictionary::DictOption;

    fn stage_dictionary() -> Dictionary {
        Dictionary::new(vec![
            DictOption::new("initiation", "Initiation"),
            DictOption::new("design", "Design"),
        ])
    }

    fn sample_template() -> StageTemplate {
        let mut template = StageTemplate::blank();
        template.name = "  Standard  ".to_string();
        template.description = "Bus stop projects".to_string();
        let first = template.stages()[0].local_id();
        template.set_stage_kind(first, "initiation");
        template.set_required_files(first, ["proposal".to_string(), "feasibility".to_string()]);
        let second = template.add_stage();
        template.set_stage_kind(second, "design");
        template.set_required_files(second, ["drawing".to_string()]);
        template
    }

    // -- to_save_request --

    #[test]
    fn serializes_stages_in_order_with_resolved_labels() {
        let request = to_save_request(&sample_template(), &stage_dictionary());

        assert_eq!(request.template_name, "Standard");
        assert_eq!(request.stage_count, 2);
        assert_eq!(request.stages.len(), 2);

        assert_eq!(request.stages[0].stage_id, "initiation");
        assert_eq!(request.stages[0].stage_display_name, "Initiation");
        assert_eq!(request.stages[0].stage_order, 1);
        assert_eq!(
            request.stages[0].required_file_list,
            vec!["feasibility".to_string(), "proposal".to_string()]
        );

        assert_eq!(request.stages[1].stage_display_name, "Design");
        assert_eq!(request.stages[1].stage_order, 2);
    }

    #[test]
    fn unknown_label_falls_back_to_raw_value() {
        let mut template = sample_template();
        let second = template.stages()[1].local_id();
        template.set_stage_kind(second, "acceptance");

        let request = to_save_request(&template, &stage_dictionary());
        assert_eq!(request.stages[1].stage_display_name, "acceptance");
    }

    #[test]
    fn new_template_omits_ids() {
        let request = to_save_request(&sample_template(), &stage_dictionary());
        assert_eq!(request.template_id, None);
        assert!(request.stages.iter().all(|s| s.id.is_none()));
    }

    // -- from_detail --

    #[test]
    fn detail_rebuilds_template_with_fresh_local_ids() {
        let detail = TemplateDetail {
            template_id: 9,
            template_name: "Standard".to_string(),
            template_desc: Some("desc".to_string()),
            stage_count: Some(1),
            stages: vec![StagePayload {
                id: Some(41),
                stage_id: "design".to_string(),
                stage_display_name: "Design".to_string(),
                stage_order: 1,
                required_file_list: vec!["drawing".to_string()],
            }],
        };

        let template = from_detail(detail);
        assert_eq!(template.persisted_id, Some(9));
        assert_eq!(template.name, "Standard");
        assert_eq!(template.description, "desc");

        let entry = &template.stages()[0];
        assert_eq!(entry.persisted_id(), Some(41));
        assert_eq!(entry.stage_id(), "design");
        assert_eq!(entry.order(), 1);
        assert!(entry.required_file_ids().contains("drawing"));
    }

    #[test]
    fn missing_description_becomes_empty_string() {
        let detail = TemplateDetail {
            template_id: 1,
            template_name: "Standard".to_string(),
            template_desc: None,
            stage_count: None,
            stages: Vec::new(),
        };
        let template = from_detail(detail);
        assert_eq!(template.description, "");
        assert_eq!(template.stage_count(), 0);
    }

    // -- round trip --

    #[test]
    fn save_then_load_preserves_stage_content() {
        let original = sample_template();
        let request = to_save_request(&original, &stage_dictionary());

        // Shape the request back into a detail response the way the
        // backend would echo it.
        let detail = TemplateDetail {
            template_id: 100,
            template_name: request.template_name.clone(),
            template_desc: Some(request.template_desc.clone()),
            stage_count: Some(request.stage_count),
            stages: request.stages.clone(),
        };

        let reloaded = from_detail(detail);

        assert_eq!(reloaded.name, original.name.trim());
        assert_eq!(reloaded.description, original.description);
        assert_eq!(reloaded.stage_count(), original.stage_count());
        for (before, after) in original.stages().iter().zip(reloaded.stages()) {
            assert_eq!(after.stage_id(), before.stage_id());
            assert_eq!(after.order(), before.order());
            assert_eq!(after.required_file_ids(), before.required_file_ids());
            // Local ids are client-side bookkeeping and must be new.
            assert_ne!(after.local_id(), before.local_id());
        }
    }
}
