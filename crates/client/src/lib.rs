//! HTTP client for the BAMS stage-template backend.
//!
//! Provides the typed wire payloads, the submission adapter that converts
//! between the in-memory template model and the backend request shapes,
//! and a [`reqwest`]-based API wrapper that honors the backend's
//! `{code, msg, data}` response envelope.

pub mod adapter;
pub mod api;
pub mod config;
pub mod payload;
