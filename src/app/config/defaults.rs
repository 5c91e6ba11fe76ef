// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Upload**: Endpoint, form field and request timeout
//! - **Camera**: Frame pacing and still quality

// ==========================================================================
// Upload Defaults
// ==========================================================================

/// Endpoint receiving the upload form.
pub const DEFAULT_UPLOAD_ENDPOINT: &str = "http://127.0.0.1:5000/";

/// Multipart field name carrying the image.
pub const DEFAULT_FILE_FIELD: &str = "file";

/// Request timeout for an upload (in seconds).
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Minimum upload timeout (in seconds).
pub const MIN_UPLOAD_TIMEOUT_SECS: u64 = 1;

/// Maximum upload timeout (in seconds).
pub const MAX_UPLOAD_TIMEOUT_SECS: u64 = 600;

// ==========================================================================
// Camera Defaults
// ==========================================================================

/// Delay between two live frames (~30 fps).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;

/// Minimum frame interval (100 fps).
pub const MIN_FRAME_INTERVAL_MS: u64 = 10;

/// Maximum frame interval (1 fps).
pub const MAX_FRAME_INTERVAL_MS: u64 = 1000;

/// JPEG quality of captured stills.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_bounds_are_ordered() {
        assert!(MIN_FRAME_INTERVAL_MS <= DEFAULT_FRAME_INTERVAL_MS);
        assert!(DEFAULT_FRAME_INTERVAL_MS <= MAX_FRAME_INTERVAL_MS);
    }

    #[test]
    fn jpeg_quality_bounds_are_ordered() {
        assert!(MIN_JPEG_QUALITY <= DEFAULT_JPEG_QUALITY);
        assert!(DEFAULT_JPEG_QUALITY <= MAX_JPEG_QUALITY);
    }

    #[test]
    fn upload_timeout_bounds_are_ordered() {
        assert!(MIN_UPLOAD_TIMEOUT_SECS <= DEFAULT_UPLOAD_TIMEOUT_SECS);
        assert!(DEFAULT_UPLOAD_TIMEOUT_SECS <= MAX_UPLOAD_TIMEOUT_SECS);
    }
}
