// SPDX-License-Identifier: MPL-2.0
//! Acceptance verdicts and the user-facing rejection reasons.

use super::policy::{ADVERTISED_LIMIT_LABEL, ALLOWED_EXTENSIONS};
use std::fmt;

/// Why a candidate (or the lack of one) was refused.
///
/// All variants are user-correctable and shown inline next to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Submission attempted with nothing selected.
    NoSelection,
    /// Extension outside the allow-set (or no extension at all).
    UnsupportedType,
    /// Payload larger than the enforced maximum.
    TooLarge {
        /// Size of the refused candidate.
        actual_bytes: u64,
        /// Enforced maximum at evaluation time.
        limit_bytes: u64,
    },
}

impl Rejection {
    /// Returns the i18n message key for this rejection.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Rejection::NoSelection => "error-no-file-selected",
            Rejection::UnsupportedType => "error-invalid-file-type",
            Rejection::TooLarge { .. } => "error-file-too-large",
        }
    }

    /// Returns the Fluent arguments used by [`Self::i18n_key`].
    pub fn i18n_args(&self) -> Vec<(&'static str, String)> {
        match self {
            Rejection::NoSelection => Vec::new(),
            Rejection::UnsupportedType => vec![("types", ALLOWED_EXTENSIONS.join(", "))],
            Rejection::TooLarge { actual_bytes, .. } => vec![
                ("limit", ADVERTISED_LIMIT_LABEL.to_string()),
                ("size", format_megabytes(*actual_bytes)),
            ],
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoSelection => write!(f, "No file selected. Please upload a file."),
            Rejection::UnsupportedType => write!(
                f,
                "Invalid file type. Please upload an image file ({}).",
                ALLOWED_EXTENSIONS.join(", ")
            ),
            Rejection::TooLarge { actual_bytes, .. } => write!(
                f,
                "File size exceeds {ADVERTISED_LIMIT_LABEL}. Your file size: {} MB.",
                format_megabytes(*actual_bytes)
            ),
        }
    }
}

/// Outcome of one policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptanceVerdict {
    Accepted,
    Rejected(Rejection),
}

impl AcceptanceVerdict {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, AcceptanceVerdict::Accepted)
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            AcceptanceVerdict::Accepted => None,
            AcceptanceVerdict::Rejected(rejection) => Some(rejection),
        }
    }

    /// Human-readable reason, absent when accepted.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.rejection().map(ToString::to_string)
    }
}

/// Formats a byte count as mebibytes with two decimals (`6291456` → `"6.00"`).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / (1024.0 * 1024.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_selection_message() {
        assert_eq!(
            Rejection::NoSelection.to_string(),
            "No file selected. Please upload a file."
        );
    }

    #[test]
    fn unsupported_type_lists_allow_set() {
        assert_eq!(
            Rejection::UnsupportedType.to_string(),
            "Invalid file type. Please upload an image file (png, jpg, jpeg, gif)."
        );
    }

    #[test]
    fn too_large_reports_size_in_megabytes() {
        let rejection = Rejection::TooLarge {
            actual_bytes: 6_291_456,
            limit_bytes: 5_242_880,
        };
        assert_eq!(
            rejection.to_string(),
            "File size exceeds 2 MB. Your file size: 6.00 MB."
        );
    }

    #[test]
    fn megabytes_round_to_two_decimals() {
        assert_eq!(format_megabytes(0), "0.00");
        assert_eq!(format_megabytes(5_242_881), "5.00");
        assert_eq!(format_megabytes(7_864_320), "7.50");
    }

    #[test]
    fn verdict_reason_is_absent_when_accepted() {
        assert_eq!(AcceptanceVerdict::Accepted.reason(), None);
        assert!(AcceptanceVerdict::Accepted.is_accepted());
        let rejected = AcceptanceVerdict::Rejected(Rejection::NoSelection);
        assert_eq!(
            rejected.reason().as_deref(),
            Some("No file selected. Please upload a file.")
        );
    }

    #[test]
    fn i18n_args_carry_the_formatted_size() {
        let args = Rejection::TooLarge {
            actual_bytes: 6_291_456,
            limit_bytes: 5_242_880,
        }
        .i18n_args();
        assert!(args.contains(&("size", "6.00".to_string())));
        assert!(args.contains(&("limit", "2 MB".to_string())));
    }
}
