//! Wire shapes for the BAMS template REST API.
//!
//! Field names follow the backend JSON contract exactly (camelCase), and
//! the `{code, msg, data}` envelope treats `code == 200` as success with
//! any other code carrying a user-facing `msg`. These conventions are
//! fixed by the backend and must not drift.

use bams_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Envelope code that signals success.
pub const SUCCESS_CODE: i32 = 200;

/// Response envelope shared by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i32,
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// One stage row as the backend sends and receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagePayload {
    /// Backend detail-row id; absent for newly added stages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<DbId>,
    /// Stage-kind dictionary value.
    pub stage_id: String,
    /// Display label resolved from the stage dictionary at serialization
    /// time; not stored in the client model.
    pub stage_display_name: String,
    /// 1-based position within the template.
    pub stage_order: u32,
    /// Document-type dictionary values required in this stage.
    pub required_file_list: Vec<String>,
}

/// Create/update request body for `POST`/`PUT /bams/stage/template`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSaveRequest {
    /// Present for updates, absent for creates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<DbId>,
    pub template_name: String,
    pub template_desc: String,
    /// Denormalized stage count the backend stores on the template row.
    pub stage_count: u32,
    pub stages: Vec<StagePayload>,
}

/// `data` payload of `GET /bams/stage/template/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetail {
    pub template_id: DbId,
    pub template_name: String,
    pub template_desc: Option<String>,
    pub stage_count: Option<u32>,
    #[serde(default)]
    pub stages: Vec<StagePayload>,
}

/// One row of `GET /bams/stage/template/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub template_id: DbId,
    pub template_name: String,
    pub stage_count: Option<u32>,
    pub create_by: Option<String>,
    /// Backend-formatted display timestamp (`yyyy-MM-dd HH:mm:ss`), kept
    /// verbatim for list rendering.
    pub create_time: Option<String>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
