// SPDX-License-Identifier: MPL-2.0
//! Camera capture errors.
//!
//! These are reported on the blocking alert channel, never inline. Every
//! variant leaves the camera session Inactive so the user can simply retry.

use std::fmt;

/// Errors raised while acquiring or capturing from a camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The platform or the user refused access to the camera.
    PermissionDenied(String),

    /// No camera device could be found.
    NotFound(String),

    /// The platform has no camera capture capability at all.
    Unsupported,

    /// The device exists but is held by another process.
    Busy(String),

    /// The captured frame could not be encoded.
    Encoding(String),

    /// Anything the adapter could not classify.
    Other(String),
}

impl CaptureError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied(_) => "error-camera-permission-denied",
            CaptureError::NotFound(_) => "error-camera-not-found",
            CaptureError::Unsupported => "error-camera-unsupported",
            CaptureError::Busy(_) => "error-camera-busy",
            CaptureError::Encoding(_) => "error-camera-encoding",
            CaptureError::Other(_) => "error-camera-general",
        }
    }

    /// Returns the adapter-provided detail, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            CaptureError::PermissionDenied(msg)
            | CaptureError::NotFound(msg)
            | CaptureError::Busy(msg)
            | CaptureError::Encoding(msg)
            | CaptureError::Other(msg) => Some(msg),
            CaptureError::Unsupported => None,
        }
    }

    /// Attempts to classify a raw platform error message.
    ///
    /// Device backends report failures as free-form strings (often an
    /// errno rendering), so the categories are recovered from keywords.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("permission denied")
            || msg_lower.contains("operation not permitted")
            || msg_lower.contains("not authorized")
            || msg_lower.contains("access denied")
        {
            return CaptureError::PermissionDenied(msg.to_string());
        }

        if msg_lower.contains("busy") {
            return CaptureError::Busy(msg.to_string());
        }

        if msg_lower.contains("no such file")
            || msg_lower.contains("no such device")
            || msg_lower.contains("not found")
            || msg_lower.contains("no camera")
            || msg_lower.contains("could not find")
        {
            return CaptureError::NotFound(msg.to_string());
        }

        CaptureError::Other(msg.to_string())
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Unsupported => {
                write!(f, "Sorry, this platform doesn't support accessing the camera")
            }
            CaptureError::Encoding(msg) => write!(f, "Unable to encode captured frame: {msg}"),
            CaptureError::PermissionDenied(msg)
            | CaptureError::NotFound(msg)
            | CaptureError::Busy(msg)
            | CaptureError::Other(msg) => write!(f, "Unable to access camera: {msg}"),
        }
    }
}

impl std::error::Error for CaptureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_message_permission() {
        let err = CaptureError::from_message("Permission denied");
        assert!(matches!(err, CaptureError::PermissionDenied(_)));
    }

    #[test]
    fn from_message_missing_device() {
        let err = CaptureError::from_message("No such file or directory");
        assert!(matches!(err, CaptureError::NotFound(_)));
    }

    #[test]
    fn from_message_busy() {
        let err = CaptureError::from_message("Device or resource busy");
        assert!(matches!(err, CaptureError::Busy(_)));
    }

    #[test]
    fn from_message_fallback() {
        let err = CaptureError::from_message("Input/output error");
        assert!(matches!(err, CaptureError::Other(_)));
    }

    #[test]
    fn display_uses_alert_wording() {
        let err = CaptureError::PermissionDenied("Permission denied".into());
        assert_eq!(err.to_string(), "Unable to access camera: Permission denied");
    }

    #[test]
    fn unsupported_has_no_detail() {
        assert_eq!(CaptureError::Unsupported.detail(), None);
        assert_eq!(CaptureError::Unsupported.i18n_key(), "error-camera-unsupported");
    }
}
