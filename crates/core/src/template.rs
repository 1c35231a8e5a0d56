//! The stage-template aggregate and its ordered stage list model.
//!
//! A template under construction is owned by exactly one open editor
//! session; every mutation is synchronous and local to the in-memory
//! model. Stage rows are identified by a client-assigned `local_id` that
//! stays stable across reorders, so an operation can never target the
//! wrong row after the list has been rearranged.
//!
//! Invariant: after every operation the `order` fields across all stages
//! are exactly `1..=N` with no gaps or repeats, in list order.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Stage entry
// ---------------------------------------------------------------------------

/// Direction argument for [`StageTemplate::move_stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// One workflow stage row in a template under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEntry {
    local_id: Uuid,
    persisted_id: Option<DbId>,
    stage_id: String,
    order: u32,
    required_file_ids: BTreeSet<String>,
}

impl StageEntry {
    /// A fresh, empty entry at the given 1-based position.
    fn new(order: u32) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            persisted_id: None,
            stage_id: String::new(),
            order,
            required_file_ids: BTreeSet::new(),
        }
    }

    /// Rebuild an entry from backend data, assigning a fresh local id
    /// (the backend has no concept of one).
    pub fn from_backend(
        persisted_id: Option<DbId>,
        stage_id: impl Into<String>,
        order: u32,
        required_file_ids: BTreeSet<String>,
    ) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            persisted_id,
            stage_id: stage_id.into(),
            order,
            required_file_ids,
        }
    }

    /// Client-assigned identity; immutable for the lifetime of the entry
    /// and never sent to the backend.
    pub fn local_id(&self) -> Uuid {
        self.local_id
    }

    /// Backend row id when this entry came from an existing template.
    pub fn persisted_id(&self) -> Option<DbId> {
        self.persisted_id
    }

    /// Selected stage-kind dictionary value; empty until the user picks one.
    pub fn stage_id(&self) -> &str {
        &self.stage_id
    }

    /// 1-based position, kept contiguous with the list index.
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Document types mandatory for this stage.
    pub fn required_file_ids(&self) -> &BTreeSet<String> {
        &self.required_file_ids
    }
}

// ---------------------------------------------------------------------------
// Template aggregate
// ---------------------------------------------------------------------------

/// A stage template under construction, with its ordered stage list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTemplate {
    /// Backend template id when editing an existing template.
    pub persisted_id: Option<DbId>,
    /// Template name; free text until validated for submission.
    pub name: String,
    /// Optional template description.
    pub description: String,
    stages: Vec<StageEntry>,
}

impl StageTemplate {
    /// A blank template as presented when the editor opens in create
    /// mode: no name, no description, one empty stage row.
    pub fn blank() -> Self {
        let mut template = Self {
            persisted_id: None,
            name: String::new(),
            description: String::new(),
            stages: Vec::new(),
        };
        template.add_stage();
        template
    }

    /// Rebuild a template from backend data (see the submission adapter).
    /// Stage positions are preserved exactly as given.
    pub fn from_parts(
        persisted_id: Option<DbId>,
        name: impl Into<String>,
        description: impl Into<String>,
        stages: Vec<StageEntry>,
    ) -> Self {
        Self {
            persisted_id,
            name: name.into(),
            description: description.into(),
            stages,
        }
    }

    pub fn stages(&self) -> &[StageEntry] {
        &self.stages
    }

    /// Number of stages; the backend stores this denormalized alongside
    /// the template row.
    pub fn stage_count(&self) -> u32 {
        self.stages.len() as u32
    }

    /// The entry with the given local id, if present.
    pub fn stage(&self, local_id: Uuid) -> Option<&StageEntry> {
        self.stages.iter().find(|s| s.local_id == local_id)
    }

    /// Append a new empty stage at the end of the list. Always succeeds;
    /// returns the new entry's local id.
    pub fn add_stage(&mut self) -> Uuid {
        let entry = StageEntry::new(self.stages.len() as u32 + 1);
        let local_id = entry.local_id;
        self.stages.push(entry);
        local_id
    }

    /// Delete the entry with the given local id and renumber the rest
    /// contiguously, preserving relative order. Returns `false` when no
    /// entry matched.
    pub fn remove_stage(&mut self, local_id: Uuid) -> bool {
        let Some(index) = self.position(local_id) else {
            return false;
        };
        self.stages.remove(index);
        self.renumber();
        true
    }

    /// Swap the entry with its immediate neighbor in the given direction.
    ///
    /// Moving the first entry up or the last entry down is a no-op, as is
    /// an unknown local id; both return `false`.
    pub fn move_stage(&mut self, local_id: Uuid, direction: MoveDirection) -> bool {
        let Some(index) = self.position(local_id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up => {
                if index == 0 {
                    return false;
                }
                index - 1
            }
            MoveDirection::Down => {
                if index + 1 == self.stages.len() {
                    return false;
                }
                index + 1
            }
        };
        self.stages.swap(index, target);
        self.renumber();
        true
    }

    /// Set the stage kind of an entry. Duplicates are deliberately not
    /// rejected here; duplicate detection is a query
    /// ([`is_duplicate_stage_kind`](Self::is_duplicate_stage_kind)) so the
    /// UI can flag the row inline without blocking the selection.
    pub fn set_stage_kind(&mut self, local_id: Uuid, stage_id: impl Into<String>) -> bool {
        match self.stage_mut(local_id) {
            Some(entry) => {
                entry.stage_id = stage_id.into();
                true
            }
            None => false,
        }
    }

    /// Replace an entry's required-document set wholesale. The editor
    /// presents a checklist, so partial add/remove is never needed.
    pub fn set_required_files(
        &mut self,
        local_id: Uuid,
        file_ids: impl IntoIterator<Item = String>,
    ) -> bool {
        match self.stage_mut(local_id) {
            Some(entry) => {
                entry.required_file_ids = file_ids.into_iter().collect();
                true
            }
            None => false,
        }
    }

    /// True iff some *other* entry (different local id) already uses the
    /// same non-empty `stage_id`. Always false for the empty string.
    pub fn is_duplicate_stage_kind(&self, local_id: Uuid, stage_id: &str) -> bool {
        if stage_id.is_empty() {
            return false;
        }
        self.stages
            .iter()
            .any(|s| s.local_id != local_id && s.stage_id == stage_id)
    }

    fn position(&self, local_id: Uuid) -> Option<usize> {
        self.stages.iter().position(|s| s.local_id == local_id)
    }

    fn stage_mut(&mut self, local_id: Uuid) -> Option<&mut StageEntry> {
        self.stages.iter_mut().find(|s| s.local_id == local_id)
    }

    fn renumber(&mut self) {
        for (index, entry) in self.stages.iter_mut().enumerate() {
            entry.order = index as u32 + 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// The order fields must read exactly 1..=N in list order.
    fn assert_contiguous(template: &StageTemplate) {
        let orders: Vec<u32> = template.stages().iter().map(|s| s.order()).collect();
        let expected: Vec<u32> = (1..=template.stages().len() as u32).collect();
        assert_eq!(orders, expected);
    }

    fn template_with_stages(n: usize) -> StageTemplate {
        let mut template = StageTemplate::blank();
        for _ in 1..n {
            template.add_stage();
        }
        template
    }

    // -- blank --

    #[test]
    fn blank_template_has_one_empty_stage() {
        let template = StageTemplate::blank();
        assert_eq!(template.stage_count(), 1);
        let entry = &template.stages()[0];
        assert_eq!(entry.stage_id(), "");
        assert!(entry.required_file_ids().is_empty());
        assert_eq!(entry.order(), 1);
        assert!(entry.persisted_id().is_none());
    }

    // -- add_stage --

    #[test]
    fn add_appends_with_next_order() {
        let mut template = StageTemplate::blank();
        template.add_stage();
        template.add_stage();
        assert_eq!(template.stage_count(), 3);
        assert_contiguous(&template);
    }

    #[test]
    fn add_generates_distinct_local_ids() {
        let mut template = StageTemplate::blank();
        let a = template.add_stage();
        let b = template.add_stage();
        assert_ne!(a, b);
        assert_ne!(a, template.stages()[0].local_id());
    }

    // -- remove_stage --

    #[test]
    fn remove_middle_renumbers_and_preserves_neighbors() {
        let mut template = template_with_stages(3);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        template.set_stage_kind(ids[0], "initiation");
        template.set_stage_kind(ids[2], "acceptance");

        assert!(template.remove_stage(ids[1]));

        assert_eq!(template.stage_count(), 2);
        assert_contiguous(&template);
        assert_eq!(template.stages()[0].stage_id(), "initiation");
        assert_eq!(template.stages()[1].stage_id(), "acceptance");
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut template = template_with_stages(2);
        let before = template.clone();
        assert!(!template.remove_stage(Uuid::new_v4()));
        assert_eq!(template, before);
    }

    #[test]
    fn remove_last_remaining_stage_leaves_empty_list() {
        let mut template = StageTemplate::blank();
        let id = template.stages()[0].local_id();
        assert!(template.remove_stage(id));
        assert_eq!(template.stage_count(), 0);
    }

    // -- move_stage --

    #[test]
    fn move_down_swaps_neighbors_and_renumbers() {
        let mut template = template_with_stages(3);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();

        assert!(template.move_stage(ids[0], MoveDirection::Down));

        let after: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        assert_eq!(after, vec![ids[1], ids[0], ids[2]]);
        assert_contiguous(&template);
    }

    #[test]
    fn move_up_swaps_neighbors_and_renumbers() {
        let mut template = template_with_stages(3);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();

        assert!(template.move_stage(ids[2], MoveDirection::Up));

        let after: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        assert_eq!(after, vec![ids[0], ids[2], ids[1]]);
        assert_contiguous(&template);
    }

    #[test]
    fn move_first_up_is_noop() {
        let mut template = template_with_stages(3);
        let first = template.stages()[0].local_id();
        let before = template.clone();

        assert!(!template.move_stage(first, MoveDirection::Up));
        assert_eq!(template, before);
    }

    #[test]
    fn move_last_down_is_noop() {
        let mut template = template_with_stages(3);
        let last = template.stages()[2].local_id();
        let before = template.clone();

        assert!(!template.move_stage(last, MoveDirection::Down));
        assert_eq!(template, before);
    }

    #[test]
    fn move_unknown_id_is_noop() {
        let mut template = template_with_stages(2);
        let before = template.clone();
        assert!(!template.move_stage(Uuid::new_v4(), MoveDirection::Down));
        assert_eq!(template, before);
    }

    #[test]
    fn local_ids_survive_reorders() {
        let mut template = template_with_stages(3);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();

        template.move_stage(ids[0], MoveDirection::Down);
        template.move_stage(ids[0], MoveDirection::Down);
        template.move_stage(ids[2], MoveDirection::Up);

        let mut after: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        after.sort();
        let mut expected = ids.clone();
        expected.sort();
        assert_eq!(after, expected);
    }

    // -- order contiguity across mixed operation sequences --

    #[test]
    fn orders_stay_contiguous_across_mixed_operations() {
        let mut template = StageTemplate::blank();
        assert_contiguous(&template);

        let b = template.add_stage();
        assert_contiguous(&template);
        let c = template.add_stage();
        assert_contiguous(&template);

        template.move_stage(c, MoveDirection::Up);
        assert_contiguous(&template);

        template.remove_stage(b);
        assert_contiguous(&template);

        template.add_stage();
        assert_contiguous(&template);

        template.move_stage(c, MoveDirection::Down);
        assert_contiguous(&template);

        template.remove_stage(c);
        assert_contiguous(&template);
    }

    // -- set_stage_kind / set_required_files --

    #[test]
    fn set_stage_kind_does_not_reject_duplicates() {
        let mut template = template_with_stages(2);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();

        assert!(template.set_stage_kind(ids[0], "design"));
        assert!(template.set_stage_kind(ids[1], "design"));
        assert_eq!(template.stages()[1].stage_id(), "design");
    }

    #[test]
    fn set_required_files_replaces_wholesale() {
        let mut template = StageTemplate::blank();
        let id = template.stages()[0].local_id();

        template.set_required_files(id, ["drawing".to_string(), "report".to_string()]);
        template.set_required_files(id, ["contract".to_string()]);

        let files = template.stages()[0].required_file_ids();
        assert_eq!(files.len(), 1);
        assert!(files.contains("contract"));
    }

    #[test]
    fn set_required_files_deduplicates() {
        let mut template = StageTemplate::blank();
        let id = template.stages()[0].local_id();

        template.set_required_files(id, ["drawing".to_string(), "drawing".to_string()]);

        assert_eq!(template.stages()[0].required_file_ids().len(), 1);
    }

    #[test]
    fn mutations_on_unknown_id_return_false() {
        let mut template = StageTemplate::blank();
        assert!(!template.set_stage_kind(Uuid::new_v4(), "design"));
        assert!(!template.set_required_files(Uuid::new_v4(), ["x".to_string()]));
    }

    // -- is_duplicate_stage_kind --

    #[test]
    fn duplicate_detected_against_other_entry() {
        let mut template = template_with_stages(2);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        template.set_stage_kind(ids[0], "design");

        assert!(template.is_duplicate_stage_kind(ids[1], "design"));
    }

    #[test]
    fn own_entry_does_not_count_as_duplicate() {
        let mut template = template_with_stages(2);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        template.set_stage_kind(ids[0], "design");

        assert!(!template.is_duplicate_stage_kind(ids[0], "design"));
    }

    #[test]
    fn empty_stage_id_is_never_duplicate() {
        let template = template_with_stages(3);
        let first = template.stages()[0].local_id();
        // All three entries have an empty stage_id, yet none is a duplicate.
        assert!(!template.is_duplicate_stage_kind(first, ""));
    }

    #[test]
    fn duplicate_check_is_symmetric() {
        let mut template = template_with_stages(2);
        let ids: Vec<Uuid> = template.stages().iter().map(|s| s.local_id()).collect();
        template.set_stage_kind(ids[0], "design");
        template.set_stage_kind(ids[1], "design");

        assert!(template.is_duplicate_stage_kind(ids[0], "design"));
        assert!(template.is_duplicate_stage_kind(ids[1], "design"));
    }
}
