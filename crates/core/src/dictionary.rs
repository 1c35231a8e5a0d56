//! Dictionary options for stage kinds and standard document types.
//!
//! The backend manages two dictionaries consumed by the template editor:
//! workflow-stage kinds and standard archive document types. Both arrive
//! as ordered `{value, label}` pairs from the dictionary endpoint. This
//! module holds the typed option entries plus a process-wide cache so the
//! editor does not refetch options every time a form opens.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Dictionary type codes
// ---------------------------------------------------------------------------

/// Dictionary code for workflow-stage kinds (initiation, design, ...).
pub const DICT_PROJECT_STAGE: &str = "bams_project_stage";

/// Dictionary code for standard archive document types.
pub const DICT_STANDARD_FILE: &str = "bams_standard_file";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// One selectable `{value, label}` pair as returned by the dictionary API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictOption {
    /// Stable identifier stored inside templates.
    pub value: String,
    /// Human-readable label shown in selectors.
    pub label: String,
}

impl DictOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// An ordered, immutable collection of dictionary options.
///
/// Option order is meaningful (it is the order selectors render in) and
/// is preserved exactly as the backend returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    options: Vec<DictOption>,
}

impl Dictionary {
    pub fn new(options: Vec<DictOption>) -> Self {
        Self { options }
    }

    /// A dictionary with no options. Selectors backed by it render empty,
    /// which keeps submission fail-closed when a load failed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[DictOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether `value` is a known option.
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Display label for `value`, if the option is known.
    pub fn label_for(&self, value: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
    }
}

// ---------------------------------------------------------------------------
// Cache
// ---------------------------------------------------------------------------

/// Process-wide, lazily populated dictionary cache keyed by type code.
///
/// Populated when the first editor opens and invalidated explicitly when
/// dictionary management elsewhere in the system changes the underlying
/// data. A code that was never loaded (or whose load failed) reads as an
/// empty dictionary via [`get_or_empty`](Self::get_or_empty).
#[derive(Debug, Default)]
pub struct DictionaryCache {
    entries: RwLock<HashMap<String, Arc<Dictionary>>>,
}

impl DictionaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide cache instance.
    pub fn global() -> &'static DictionaryCache {
        static GLOBAL: OnceLock<DictionaryCache> = OnceLock::new();
        GLOBAL.get_or_init(DictionaryCache::new)
    }

    /// The cached dictionary for `code`, if one has been stored.
    pub fn get(&self, code: &str) -> Option<Arc<Dictionary>> {
        self.read_entries().get(code).cloned()
    }

    /// The cached dictionary for `code`, or an empty dictionary when the
    /// code was never loaded.
    pub fn get_or_empty(&self, code: &str) -> Arc<Dictionary> {
        self.get(code)
            .unwrap_or_else(|| Arc::new(Dictionary::empty()))
    }

    /// Store (or replace) the dictionary for `code`.
    pub fn store(&self, code: impl Into<String>, dictionary: Dictionary) {
        self.write_entries()
            .insert(code.into(), Arc::new(dictionary));
    }

    /// Drop the cached dictionary for `code`; the next reader sees it as
    /// unloaded.
    pub fn invalidate(&self, code: &str) {
        self.write_entries().remove(code);
    }

    /// Drop every cached dictionary.
    pub fn invalidate_all(&self) {
        self.write_entries().clear();
    }

    fn read_entries(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Arc<Dictionary>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_entries(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Arc<Dictionary>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
