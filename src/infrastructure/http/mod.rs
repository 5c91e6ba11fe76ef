// SPDX-License-Identifier: MPL-2.0
//! Multipart form transport over HTTP.
//!
//! Posts an [`UploadForm`] the way a browser submits a file input: one
//! `multipart/form-data` request, file part plus plain text fields. The
//! response page is read back as text and returned untouched.

use crate::application::port::transport::{SubmissionReceipt, TransportError, UploadForm};
use std::time::Duration;

const USER_AGENT: &str = concat!("LensIntake/", env!("CARGO_PKG_VERSION"));

/// Connection settings of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTransport {
    endpoint: String,
    timeout: Duration,
}

impl HttpTransport {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends `form` and waits for the answer.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Build`] if the client or request cannot be built
    /// - [`TransportError::Network`] on connection or timeout failure
    /// - [`TransportError::Status`] if the server answers with a non-2xx code
    pub async fn send(self, form: UploadForm) -> Result<SubmissionReceipt, TransportError> {
        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| TransportError::Build(format!("{}: {e}", self.endpoint)))?;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        let response = client
            .post(url)
            .multipart(build_multipart(&form)?)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let receipt = SubmissionReceipt { status, body };
        if receipt.is_success() {
            Ok(receipt)
        } else {
            Err(TransportError::Status {
                status,
                body: receipt.body,
            })
        }
    }
}

fn build_multipart(form: &UploadForm) -> Result<reqwest::multipart::Form, TransportError> {
    let part = reqwest::multipart::Part::bytes(form.bytes.to_vec())
        .file_name(form.file_name.clone())
        .mime_str(&form.mime_type)
        .map_err(|e| TransportError::Build(format!("invalid MIME type {}: {e}", form.mime_type)))?;

    let multipart = form
        .extra_fields
        .iter()
        .fold(reqwest::multipart::Form::new(), |multipart, (name, value)| {
            multipart.text(name.clone(), value.clone())
        });

    Ok(multipart.part(form.file_field.clone(), part))
}
