// SPDX-License-Identifier: MPL-2.0
//! Media capture port definition.
//!
//! [`MediaCapture`] opens a live video stream from a camera device and
//! [`LiveStream`] is the handle to it. Adapters (see
//! `infrastructure::ffmpeg`) decode frames on their own thread; callers only
//! ever see the most recent frame.

use crate::domain::error::CaptureError;
use crate::domain::media::VideoFrame;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Which way the requested camera should face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Rear camera, pointed at the subject.
    #[default]
    Environment,
    /// Front camera, pointed at the user.
    User,
}

impl FacingMode {
    /// Parses a config value (`environment` or `user`), case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "environment" | "rear" | "back" => Some(FacingMode::Environment),
            "user" | "front" => Some(FacingMode::User),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FacingMode::Environment => "environment",
            FacingMode::User => "user",
        }
    }
}

/// Parameters of a stream request. Audio is never requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConstraints {
    pub facing_mode: FacingMode,
    /// Explicit device path or name; `None` lets the adapter choose.
    pub device: Option<String>,
    /// Delay between two frame grabs.
    pub frame_interval: Duration,
}

impl Default for CaptureConstraints {
    fn default() -> Self {
        Self {
            facing_mode: FacingMode::Environment,
            device: None,
            frame_interval: Duration::from_millis(33),
        }
    }
}

/// Port for acquiring camera streams.
///
/// `request_video_stream` may block for as long as the platform takes to
/// answer (permission prompts included); callers run it off the UI thread.
pub trait MediaCapture: Send + Sync {
    /// Opens a video-only stream matching `constraints`.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`] when permission is denied, no device is
    /// present, or the device cannot be opened.
    fn request_video_stream(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn LiveStream>, CaptureError>;

    /// Returns `false` when this platform has no way of reaching a camera.
    fn is_supported(&self) -> bool {
        true
    }
}

/// Handle to an open camera stream.
pub trait LiveStream: Send {
    /// Most recent decoded frame, if any has arrived yet.
    fn latest_frame(&self) -> Option<VideoFrame>;

    /// Stops every track and releases the device.
    ///
    /// Implementations must tolerate repeated calls.
    fn stop_tracks(&mut self);

    /// `true` until the stream is stopped or the device goes away.
    fn is_live(&self) -> bool;
}

/// Single-use carrier for a freshly opened stream.
///
/// Messages crossing the async boundary must be cloneable, streams are not;
/// the first [`take`](Self::take) wins and later calls get `None`.
#[derive(Clone)]
pub struct StreamDelivery(Arc<Mutex<Option<Box<dyn LiveStream>>>>);

impl StreamDelivery {
    #[must_use]
    pub fn new(stream: Box<dyn LiveStream>) -> Self {
        Self(Arc::new(Mutex::new(Some(stream))))
    }

    /// Takes the stream out of the carrier.
    pub fn take(&self) -> Option<Box<dyn LiveStream>> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl fmt::Debug for StreamDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StreamDelivery(..)")
    }
}

/// Encodes a still frame into an uploadable payload.
pub trait FrameEncoder: Send + Sync {
    /// Extension matching the produced bytes, without the dot.
    fn extension(&self) -> &'static str;

    /// Encodes `frame` at its native dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Encoding`] when the encoder fails.
    fn encode(&self, frame: &VideoFrame) -> Result<Vec<u8>, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_mode_parses_aliases() {
        assert_eq!(FacingMode::parse("Environment"), Some(FacingMode::Environment));
        assert_eq!(FacingMode::parse(" user "), Some(FacingMode::User));
        assert_eq!(FacingMode::parse("front"), Some(FacingMode::User));
        assert_eq!(FacingMode::parse("sideways"), None);
    }

    #[test]
    fn default_constraints_face_the_environment() {
        let constraints = CaptureConstraints::default();
        assert_eq!(constraints.facing_mode, FacingMode::Environment);
        assert!(constraints.device.is_none());
    }
}
