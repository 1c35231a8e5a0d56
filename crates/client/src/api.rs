//! REST client for the BAMS stage-template endpoints.
//!
//! Wraps the backend template API (dictionary load, list, detail,
//! create/update, server-side copy, batch delete) using [`reqwest`].
//! Every endpoint answers with the `{code, msg, data}` envelope; a
//! non-200 envelope code is surfaced as [`ApiError::Server`] with the
//! server's message verbatim. Failures are never retried here; the user
//! re-triggers the action.

use bams_core::dictionary::{
    Dictionary, DictionaryCache, DictOption, DICT_PROJECT_STAGE, DICT_STANDARD_FILE,
};
use bams_core::types::DbId;

use crate::config::ClientConfig;
use crate::payload::{
    ApiEnvelope, TemplateDetail, TemplateSaveRequest, TemplateSummary, SUCCESS_CODE,
};

/// Fallback shown when a failure envelope carries no message.
const GENERIC_FAILURE_MSG: &str = "Request failed";

/// Errors from the template REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered outside the envelope convention entirely.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The envelope carried a non-success code; `msg` is shown to the
    /// user verbatim.
    #[error("Server error ({code}): {msg}")]
    Server { code: i32, msg: String },

    /// A success envelope was missing the payload the endpoint promises.
    #[error("Malformed response: {0}")]
    Malformed(&'static str),
}

/// HTTP client for the BAMS backend.
pub struct StageTemplateApi {
    client: reqwest::Client,
    base_url: String,
}

impl StageTemplateApi {
    /// Build a client from configuration (base URL and request timeout).
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Build an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Base HTTP URL of the backend.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- dictionaries ----

    /// Fetch one dictionary by type code.
    ///
    /// A success envelope without data yields an empty dictionary, which
    /// renders empty selectors and keeps submission fail-closed.
    pub async fn fetch_dictionary(&self, code: &str) -> Result<Dictionary, ApiError> {
        let response = self
            .client
            .get(format!("{}/system/dict/data/type/{code}", self.base_url))
            .send()
            .await?;

        let options: Option<Vec<DictOption>> = Self::read_envelope(response).await?;
        Ok(Dictionary::new(options.unwrap_or_default()))
    }

    /// Load both editor dictionaries (stage kinds and standard document
    /// types) into `cache`. Whatever loaded before the first failure
    /// stays cached; the failed code reads as empty.
    pub async fn load_dictionaries(&self, cache: &DictionaryCache) -> Result<(), ApiError> {
        for code in [DICT_PROJECT_STAGE, DICT_STANDARD_FILE] {
            let dictionary = self.fetch_dictionary(code).await.inspect_err(|error| {
                tracing::warn!(code, %error, "Dictionary load failed");
            })?;
            tracing::debug!(code, options = dictionary.len(), "Dictionary loaded");
            cache.store(code, dictionary);
        }
        Ok(())
    }

    // ---- templates ----

    /// `GET /bams/stage/template/list`.
    pub async fn list_templates(&self) -> Result<Vec<TemplateSummary>, ApiError> {
        let response = self
            .client
            .get(format!("{}/bams/stage/template/list", self.base_url))
            .send()
            .await?;

        let rows: Option<Vec<TemplateSummary>> = Self::read_envelope(response).await?;
        Ok(rows.unwrap_or_default())
    }

    /// `GET /bams/stage/template/{id}`.
    pub async fn get_template(&self, template_id: DbId) -> Result<TemplateDetail, ApiError> {
        let response = self
            .client
            .get(format!("{}/bams/stage/template/{template_id}", self.base_url))
            .send()
            .await?;

        Self::read_envelope(response)
            .await?
            .ok_or(ApiError::Malformed("template detail without data"))
    }

    /// Create (`POST`) or update (`PUT`) depending on whether the request
    /// carries a template id.
    pub async fn save_template(&self, request: &TemplateSaveRequest) -> Result<(), ApiError> {
        match request.template_id {
            Some(_) => self.update_template(request).await,
            None => self.create_template(request).await,
        }
    }

    /// `POST /bams/stage/template`.
    pub async fn create_template(&self, request: &TemplateSaveRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .post(format!("{}/bams/stage/template", self.base_url))
            .json(request)
            .send()
            .await?;

        Self::read_envelope::<serde_json::Value>(response).await?;
        tracing::info!(name = %request.template_name, "Template created");
        Ok(())
    }

    /// `PUT /bams/stage/template`.
    pub async fn update_template(&self, request: &TemplateSaveRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .put(format!("{}/bams/stage/template", self.base_url))
            .json(request)
            .send()
            .await?;

        Self::read_envelope::<serde_json::Value>(response).await?;
        tracing::info!(
            template_id = request.template_id,
            name = %request.template_name,
            "Template updated"
        );
        Ok(())
    }

    /// `POST /bams/stage/template/copy/{id}` — server-side duplication.
    ///
    /// The backend owns the copy logic (including the default name when
    /// `new_name` is absent); this is a pass-through request. Returns the
    /// new template's id when the server reports one.
    pub async fn copy_template(
        &self,
        template_id: DbId,
        new_name: Option<&str>,
    ) -> Result<Option<DbId>, ApiError> {
        let mut request = self
            .client
            .post(format!(
                "{}/bams/stage/template/copy/{template_id}",
                self.base_url
            ));
        if let Some(name) = new_name {
            request = request.query(&[("newName", name)]);
        }
        let response = request.send().await?;

        let new_id: Option<DbId> = Self::read_envelope(response).await?;
        tracing::info!(template_id, ?new_id, "Template copied");
        Ok(new_id)
    }

    /// `DELETE /bams/stage/template/{ids}` — batch delete by
    /// comma-joined ids.
    pub async fn delete_templates(&self, template_ids: &[DbId]) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!(
                "{}/bams/stage/template/{}",
                self.base_url,
                join_ids(template_ids)
            ))
            .send()
            .await?;

        Self::read_envelope::<serde_json::Value>(response).await?;
        tracing::info!(count = template_ids.len(), "Templates deleted");
        Ok(())
    }

    // ---- private helpers ----

    /// Read a response through the `{code, msg, data}` envelope.
    ///
    /// Non-2xx HTTP becomes [`ApiError::Http`]; a parseable envelope with
    /// `code != 200` becomes [`ApiError::Server`] carrying the server's
    /// message (or a generic fallback when it sent none).
    async fn read_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ApiEnvelope<T> = response.json().await?;
        envelope_to_result(envelope)
    }
}

/// Turn an envelope into the payload or a server error.
fn envelope_to_result<T>(envelope: ApiEnvelope<T>) -> Result<Option<T>, ApiError> {
    if envelope.code == SUCCESS_CODE {
        return Ok(envelope.data);
    }
    let msg = envelope
        .msg
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MSG.to_string());
    tracing::warn!(code = envelope.code, %msg, "Server rejected request");
    Err(ApiError::Server {
        code: envelope.code,
        msg,
    })
}

/// Comma-join ids for the batch-delete path segment.
fn join_ids(ids: &[DbId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
