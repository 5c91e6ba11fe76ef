// SPDX-License-Identifier: MPL-2.0
//! The acceptance policy shared by every input path and by the submit gate.
//!
//! Checks run in a fixed order (presence, type, size) and the first failure
//! is the one reported. The policy has no side effects.

use super::candidate::ImageCandidate;
use super::verdict::{AcceptanceVerdict, Rejection};

/// Extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Enforced maximum payload size (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Limit quoted in the too-large message.
///
/// This deliberately differs from [`MAX_UPLOAD_BYTES`]: the deployed form has
/// always enforced 5 MiB while announcing "2 MB", and the wording is kept
/// until the intended limit is settled.
pub const ADVERTISED_LIMIT_LABEL: &str = "2 MB";

/// Type and size rules gating what may become the selected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptancePolicy {
    allowed_extensions: &'static [&'static str],
    max_bytes: u64,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: &ALLOWED_EXTENSIONS,
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl AcceptancePolicy {
    /// Returns the standard upload policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    #[must_use]
    pub fn allowed_extensions(&self) -> &'static [&'static str] {
        self.allowed_extensions
    }

    /// Evaluates a candidate; `None` stands for "nothing selected".
    #[must_use]
    pub fn evaluate(&self, candidate: Option<&ImageCandidate>) -> AcceptanceVerdict {
        match candidate {
            None => AcceptanceVerdict::Rejected(Rejection::NoSelection),
            Some(candidate) => self.evaluate_parts(candidate.extension(), candidate.byte_size()),
        }
    }

    /// Evaluates the two attributes the policy looks at.
    ///
    /// The source kind is not an input, so every path gets the same answer
    /// for the same `(extension, byte_size)`.
    #[must_use]
    pub fn evaluate_parts(&self, extension: &str, byte_size: u64) -> AcceptanceVerdict {
        if !self.is_allowed_extension(extension) {
            return AcceptanceVerdict::Rejected(Rejection::UnsupportedType);
        }

        if byte_size > self.max_bytes {
            return AcceptanceVerdict::Rejected(Rejection::TooLarge {
                actual_bytes: byte_size,
                limit_bytes: self.max_bytes,
            });
        }

        AcceptanceVerdict::Accepted
    }

    fn is_allowed_extension(&self, extension: &str) -> bool {
        !extension.is_empty()
            && self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}
