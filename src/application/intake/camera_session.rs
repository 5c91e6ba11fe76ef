// SPDX-License-Identifier: MPL-2.0
//! Lifecycle of the live camera session.
//!
//! The session is the single owner of the camera stream. It is `Inactive`
//! until a start succeeds, `Active` while a stream is held, and goes back to
//! `Inactive` on [`CameraSession::stop`], which releases the stream exactly
//! once. Starting asynchronously adds a `Pending` phase keyed by a
//! [`StartTicket`]; completions carrying an outdated ticket are released on
//! arrival and never become active.

use crate::application::port::camera::{CaptureConstraints, FrameEncoder, LiveStream, MediaCapture};
use crate::domain::error::CaptureError;
use crate::domain::intake::{ImageCandidate, SourceKind};
use crate::domain::media::VideoFrame;
use std::fmt;
use std::sync::Arc;

/// Base name of captured stills; the encoder supplies the extension.
pub const CAPTURE_FILE_STEM: &str = "camera-capture";

/// Identifies one asynchronous start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartTicket(u64);

/// Observable phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPhase {
    Inactive,
    /// A start is outstanding. Treated as inactive by every reader.
    Pending(StartTicket),
    Active,
}

/// Result of delivering a start completion to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The stream is now the active session.
    Activated,
    /// The ticket was cancelled or superseded; the stream was released.
    Stale,
}

/// The live view a session renders into.
///
/// Holds the frame currently on screen; capture reads from here so the still
/// is exactly what the user was looking at.
#[derive(Debug, Clone, Default)]
pub struct LiveSurface {
    activation: Option<u64>,
    frame: Option<VideoFrame>,
}

impl LiveSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while attached to an active session.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.activation.is_some()
    }

    /// Frame currently displayed, if one has arrived.
    #[must_use]
    pub fn frame(&self) -> Option<&VideoFrame> {
        self.frame.as_ref()
    }

    /// Detaches the surface and drops its frame.
    pub fn clear(&mut self) {
        self.activation = None;
        self.frame = None;
    }
}

enum Phase {
    Inactive,
    Pending(StartTicket),
    Active {
        stream: Box<dyn LiveStream>,
        activation: u64,
    },
}

/// Owner of the camera stream.
pub struct CameraSession {
    phase: Phase,
    constraints: CaptureConstraints,
    encoder: Arc<dyn FrameEncoder>,
    next_ticket: u64,
    activations: u64,
}

impl CameraSession {
    #[must_use]
    pub fn new(constraints: CaptureConstraints, encoder: Arc<dyn FrameEncoder>) -> Self {
        Self {
            phase: Phase::Inactive,
            constraints,
            encoder,
            next_ticket: 0,
            activations: 0,
        }
    }

    #[must_use]
    pub fn constraints(&self) -> &CaptureConstraints {
        &self.constraints
    }

    #[must_use]
    pub fn phase(&self) -> CameraPhase {
        match &self.phase {
            Phase::Inactive => CameraPhase::Inactive,
            Phase::Pending(ticket) => CameraPhase::Pending(*ticket),
            Phase::Active { .. } => CameraPhase::Active,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending(_))
    }

    /// Acquires a stream synchronously.
    ///
    /// Any current session is released first. On failure the session stays
    /// `Inactive`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Unsupported`] when the platform has no camera
    /// access, or whatever the capture port reports.
    pub fn start(&mut self, capture: &dyn MediaCapture) -> Result<(), CaptureError> {
        if !capture.is_supported() {
            return Err(CaptureError::Unsupported);
        }
        let ticket = self.begin_start();
        let result = capture.request_video_stream(&self.constraints);
        self.finish_start(ticket, result).map(|_| ())
    }

    /// Releases any current session and enters `Pending`.
    pub fn begin_start(&mut self) -> StartTicket {
        self.stop();
        self.next_ticket += 1;
        let ticket = StartTicket(self.next_ticket);
        self.phase = Phase::Pending(ticket);
        ticket
    }

    /// Delivers the result of a start begun with [`Self::begin_start`].
    ///
    /// # Errors
    ///
    /// Returns the capture error of a current (non-stale) request; the
    /// session is then `Inactive`. Failures of stale requests are swallowed.
    pub fn finish_start(
        &mut self,
        ticket: StartTicket,
        result: Result<Box<dyn LiveStream>, CaptureError>,
    ) -> Result<StartOutcome, CaptureError> {
        let current = matches!(self.phase, Phase::Pending(pending) if pending == ticket);
        if !current {
            if let Ok(mut stream) = result {
                stream.stop_tracks();
            }
            tracing::debug!(?ticket, "discarded stale camera start");
            return Ok(StartOutcome::Stale);
        }

        match result {
            Ok(stream) => {
                self.activations += 1;
                self.phase = Phase::Active {
                    stream,
                    activation: self.activations,
                };
                tracing::info!(facing = self.constraints.facing_mode.as_str(), "camera session active");
                Ok(StartOutcome::Activated)
            }
            Err(err) => {
                self.phase = Phase::Inactive;
                tracing::warn!(error = %err, "camera start failed");
                Err(err)
            }
        }
    }

    /// Attaches `surface` to the active stream and shows its latest frame.
    ///
    /// Clears the surface when no session is active.
    pub fn bind_preview(&self, surface: &mut LiveSurface) {
        match &self.phase {
            Phase::Active { stream, activation } => {
                surface.activation = Some(*activation);
                surface.frame = stream.latest_frame();
            }
            _ => surface.clear(),
        }
    }

    /// Pulls the newest frame into a bound surface.
    ///
    /// Returns `true` when the surface changed. A stream that died on its own
    /// (device unplugged) ends the session.
    pub fn refresh(&mut self, surface: &mut LiveSurface) -> bool {
        let Phase::Active { stream, activation } = &self.phase else {
            let changed = surface.is_bound();
            surface.clear();
            return changed;
        };

        if surface.activation != Some(*activation) {
            return false;
        }

        if !stream.is_live() {
            tracing::warn!("camera stream ended unexpectedly");
            self.stop();
            surface.clear();
            return true;
        }

        match stream.latest_frame() {
            Some(frame) => {
                surface.frame = Some(frame);
                true
            }
            None => false,
        }
    }

    /// Encodes the frame shown on `surface` as a still candidate.
    ///
    /// Returns `Ok(None)` when no session is active or nothing has been
    /// displayed yet.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Encoding`] when the frame cannot be encoded.
    pub fn capture_frame(&self, surface: &LiveSurface) -> Result<Option<ImageCandidate>, CaptureError> {
        let Phase::Active { activation, .. } = &self.phase else {
            return Ok(None);
        };
        if surface.activation != Some(*activation) {
            return Ok(None);
        }
        let Some(frame) = surface.frame() else {
            return Ok(None);
        };

        let bytes = self.encoder.encode(frame)?;
        let name = format!("{CAPTURE_FILE_STEM}.{}", self.encoder.extension());
        Ok(Some(ImageCandidate::new(SourceKind::CameraCapture, name, bytes)))
    }

    /// Stops the session.
    ///
    /// Releases the stream if active and cancels a pending start. Returns
    /// `true` when something was released or cancelled; calling it again is
    /// a no-op returning `false`.
    pub fn stop(&mut self) -> bool {
        match std::mem::replace(&mut self.phase, Phase::Inactive) {
            Phase::Active { mut stream, .. } => {
                stream.stop_tracks();
                tracing::info!("camera session released");
                true
            }
            Phase::Pending(ticket) => {
                tracing::debug!(?ticket, "pending camera start cancelled");
                true
            }
            Phase::Inactive => false,
        }
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for CameraSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CameraSession")
            .field("phase", &self.phase())
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{sample_frame, FakeCapture, FakeEncoder};

    fn session() -> CameraSession {
        CameraSession::new(CaptureConstraints::default(), Arc::new(FakeEncoder))
    }

    #[test]
    fn start_activates_and_stop_releases_once() {
        let capture = FakeCapture::granting(Some(sample_frame(4, 3)));
        let mut session = session();

        session.start(&capture).expect("start should succeed");
        assert!(session.is_active());

        assert!(session.stop());
        assert!(!session.stop());
        assert_eq!(session.phase(), CameraPhase::Inactive);
        assert_eq!(capture.probe().stop_calls(), 1);
    }

    #[test]
    fn denied_start_stays_inactive() {
        let capture = FakeCapture::denying(CaptureError::PermissionDenied("denied".into()));
        let mut session = session();

        let err = session.start(&capture).unwrap_err();
        assert!(matches!(err, CaptureError::PermissionDenied(_)));
        assert_eq!(session.phase(), CameraPhase::Inactive);
    }

    #[test]
    fn unsupported_platform_never_requests_a_stream() {
        let capture = FakeCapture::unsupported();
        let mut session = session();

        assert_eq!(session.start(&capture), Err(CaptureError::Unsupported));
        assert_eq!(capture.probe().requests(), 0);
    }

    #[test]
    fn restart_releases_previous_stream() {
        let capture = FakeCapture::granting(None);
        let mut session = session();

        session.start(&capture).unwrap();
        session.start(&capture).unwrap();
        assert!(session.is_active());
        assert_eq!(capture.probe().stop_calls(), 1);
    }

    #[test]
    fn stale_completion_is_released() {
        let capture = FakeCapture::granting(None);
        let mut session = session();

        let first = session.begin_start();
        let second = session.begin_start();
        let stream = capture.request_video_stream(session.constraints()).unwrap();
        assert_eq!(session.finish_start(first, Ok(stream)), Ok(StartOutcome::Stale));
        assert_eq!(capture.probe().stop_calls(), 1);
        assert_eq!(session.phase(), CameraPhase::Pending(second));
    }

    #[test]
    fn stop_cancels_pending_start() {
        let capture = FakeCapture::granting(None);
        let mut session = session();

        let ticket = session.begin_start();
        assert!(session.stop());
        let stream = capture.request_video_stream(session.constraints()).unwrap();
        assert_eq!(session.finish_start(ticket, Ok(stream)), Ok(StartOutcome::Stale));
        assert!(!session.is_active());
    }

    #[test]
    fn stale_failure_is_swallowed() {
        let mut session = session();
        let ticket = session.begin_start();
        session.stop();
        let outcome = session.finish_start(ticket, Err(CaptureError::NotFound("gone".into())));
        assert_eq!(outcome, Ok(StartOutcome::Stale));
    }

    #[test]
    fn capture_encodes_displayed_frame() {
        let capture = FakeCapture::granting(Some(sample_frame(8, 6)));
        let mut session = session();
        let mut surface = LiveSurface::new();

        session.start(&capture).unwrap();
        session.bind_preview(&mut surface);

        let candidate = session
            .capture_frame(&surface)
            .unwrap()
            .expect("a frame was displayed");
        assert_eq!(candidate.name(), "camera-capture.jpg");
        assert_eq!(candidate.source(), SourceKind::CameraCapture);
        assert_eq!(candidate.bytes(), FakeEncoder::expected_bytes(8, 6).as_slice());
    }

    #[test]
    fn capture_is_noop_without_session_or_frame() {
        let mut session = session();
        let surface = LiveSurface::new();
        assert_eq!(session.capture_frame(&surface), Ok(None));

        let capture = FakeCapture::granting(None);
        let mut surface = LiveSurface::new();
        session.start(&capture).unwrap();
        session.bind_preview(&mut surface);
        assert_eq!(session.capture_frame(&surface), Ok(None));
    }

    #[test]
    fn refresh_picks_up_new_frames() {
        let capture = FakeCapture::granting(None);
        let mut session = session();
        let mut surface = LiveSurface::new();

        session.start(&capture).unwrap();
        session.bind_preview(&mut surface);
        assert!(!session.refresh(&mut surface));

        capture.probe().push_frame(sample_frame(2, 2));
        assert!(session.refresh(&mut surface));
        assert_eq!(surface.frame().map(VideoFrame::width), Some(2));
    }

    #[test]
    fn refresh_ends_session_when_stream_dies() {
        let capture = FakeCapture::granting(Some(sample_frame(2, 2)));
        let mut session = session();
        let mut surface = LiveSurface::new();

        session.start(&capture).unwrap();
        session.bind_preview(&mut surface);
        capture.probe().kill_stream();

        assert!(session.refresh(&mut surface));
        assert!(!session.is_active());
        assert!(!surface.is_bound());
    }

    #[test]
    fn drop_releases_stream() {
        let capture = FakeCapture::granting(None);
        {
            let mut session = session();
            session.start(&capture).unwrap();
        }
        assert_eq!(capture.probe().stop_calls(), 1);
    }
}
