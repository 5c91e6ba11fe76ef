// SPDX-License-Identifier: MPL-2.0
//! Form transport port definition.
//!
//! The backend is opaque: it receives one multipart form and answers with a
//! status and a page. [`SubmitAction`] is what the submission gate calls once
//! validation has passed.

use std::fmt;
use std::sync::Arc;

/// A validated form ready to be posted.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadForm {
    /// Multipart field carrying the image.
    pub file_field: String,
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
    /// Additional text fields sent alongside the file.
    pub extra_fields: Vec<(String, String)>,
}

impl fmt::Debug for UploadForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadForm")
            .field("file_field", &self.file_field)
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("byte_size", &self.bytes.len())
            .field("extra_fields", &self.extra_fields)
            .finish()
    }
}

/// What the server answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub body: String,
}

impl SubmissionReceipt {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Errors raised while delivering a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request could not be assembled (bad endpoint, bad MIME type).
    Build(String),
    /// Connection, TLS or timeout failure.
    Network(String),
    /// The server answered with a non-2xx status.
    Status { status: u16, body: String },
}

impl TransportError {
    /// Returns the i18n message key for this error.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            TransportError::Build(_) => "notification-upload-build-error",
            TransportError::Network(_) => "notification-upload-network-error",
            TransportError::Status { .. } => "notification-upload-status-error",
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Build(msg) => write!(f, "Invalid upload request: {msg}"),
            TransportError::Network(msg) => write!(f, "Upload failed: {msg}"),
            TransportError::Status { status, .. } => {
                write!(f, "Server rejected the upload (HTTP {status})")
            }
        }
    }
}

impl std::error::Error for TransportError {}

/// The explicit transport action triggered after validation.
///
/// Fire-and-forget from the gate's point of view; the response arrives later
/// as its own event.
pub trait SubmitAction {
    fn submit(&mut self, form: UploadForm);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_success_is_any_2xx() {
        let ok = SubmissionReceipt { status: 204, body: String::new() };
        let redirect = SubmissionReceipt { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn status_error_mentions_code() {
        let err = TransportError::Status {
            status: 413,
            body: "too big".into(),
        };
        assert!(err.to_string().contains("413"));
    }
}
