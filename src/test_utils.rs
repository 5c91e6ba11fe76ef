// SPDX-License-Identifier: MPL-2.0
//! Test doubles for the application ports.
//!
//! Shared by unit tests and the integration tests under `tests/`, so they
//! live in the library rather than behind `#[cfg(test)]`.

use crate::application::port::camera::{
    CaptureConstraints, FrameEncoder, LiveStream, MediaCapture,
};
use crate::application::port::transport::{SubmitAction, UploadForm};
use crate::domain::error::CaptureError;
use crate::domain::media::VideoFrame;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Builds a solid grey frame of the given size.
///
/// # Panics
///
/// Panics if either dimension is zero.
#[must_use]
pub fn sample_frame(width: u32, height: u32) -> VideoFrame {
    let len = width as usize * height as usize * 4;
    VideoFrame::from_rgba(width, height, vec![128u8; len]).expect("non-zero dimensions")
}

/// Counters and the frame slot shared by a [`FakeCapture`] and its streams.
#[derive(Debug, Default)]
pub struct StreamProbe {
    requests: AtomicUsize,
    stop_calls: AtomicUsize,
    live: AtomicBool,
    frame: Mutex<Option<VideoFrame>>,
}

impl StreamProbe {
    /// Number of `request_video_stream` calls that reached the device.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Number of `stop_tracks` calls across all streams.
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    /// Makes `frame` the latest frame of every open stream.
    pub fn push_frame(&self, frame: VideoFrame) {
        *self.frame.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
    }

    /// Simulates the device disappearing.
    pub fn kill_stream(&self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

enum Behaviour {
    Grant,
    Deny(CaptureError),
    Unsupported,
}

/// In-memory camera.
pub struct FakeCapture {
    behaviour: Behaviour,
    probe: Arc<StreamProbe>,
}

impl FakeCapture {
    /// A camera that opens streams, optionally with a first frame ready.
    #[must_use]
    pub fn granting(first_frame: Option<VideoFrame>) -> Self {
        let probe = StreamProbe {
            frame: Mutex::new(first_frame),
            ..StreamProbe::default()
        };
        Self {
            behaviour: Behaviour::Grant,
            probe: Arc::new(probe),
        }
    }

    /// A camera that fails every request with `error`.
    #[must_use]
    pub fn denying(error: CaptureError) -> Self {
        Self {
            behaviour: Behaviour::Deny(error),
            probe: Arc::default(),
        }
    }

    /// A platform without camera access.
    #[must_use]
    pub fn unsupported() -> Self {
        Self {
            behaviour: Behaviour::Unsupported,
            probe: Arc::default(),
        }
    }

    #[must_use]
    pub fn probe(&self) -> &StreamProbe {
        &self.probe
    }
}

impl MediaCapture for FakeCapture {
    fn request_video_stream(
        &self,
        _constraints: &CaptureConstraints,
    ) -> Result<Box<dyn LiveStream>, CaptureError> {
        match &self.behaviour {
            Behaviour::Grant => {
                self.probe.requests.fetch_add(1, Ordering::SeqCst);
                self.probe.live.store(true, Ordering::SeqCst);
                Ok(Box::new(FakeStream {
                    probe: Arc::clone(&self.probe),
                    stopped: false,
                }))
            }
            Behaviour::Deny(error) => {
                self.probe.requests.fetch_add(1, Ordering::SeqCst);
                Err(error.clone())
            }
            Behaviour::Unsupported => Err(CaptureError::Unsupported),
        }
    }

    fn is_supported(&self) -> bool {
        !matches!(self.behaviour, Behaviour::Unsupported)
    }
}

/// Stream handed out by [`FakeCapture`]. Counts every `stop_tracks` call.
pub struct FakeStream {
    probe: Arc<StreamProbe>,
    stopped: bool,
}

impl LiveStream for FakeStream {
    fn latest_frame(&self) -> Option<VideoFrame> {
        if self.stopped {
            return None;
        }
        self.probe
            .frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn stop_tracks(&mut self) {
        self.probe.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.stopped = true;
    }

    fn is_live(&self) -> bool {
        !self.stopped && self.probe.live.load(Ordering::SeqCst)
    }
}

/// Deterministic stand-in for the JPEG encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeEncoder;

impl FakeEncoder {
    /// Bytes produced for a frame of the given size.
    #[must_use]
    pub fn expected_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xD8];
        bytes.extend_from_slice(format!("{width}x{height}").as_bytes());
        bytes.extend_from_slice(&[0xFF, 0xD9]);
        bytes
    }
}

impl FrameEncoder for FakeEncoder {
    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn encode(&self, frame: &VideoFrame) -> Result<Vec<u8>, CaptureError> {
        Ok(Self::expected_bytes(frame.width(), frame.height()))
    }
}

/// Transport that records every form instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    forms: Vec<UploadForm>,
}

impl RecordingTransport {
    #[must_use]
    pub fn forms(&self) -> &[UploadForm] {
        &self.forms
    }
}

impl SubmitAction for RecordingTransport {
    fn submit(&mut self, form: UploadForm) {
        self.forms.push(form);
    }
}
