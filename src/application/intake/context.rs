// SPDX-License-Identifier: MPL-2.0
//! The intake context: one owner for the whole capture-validate-preview state.
//!
//! Each input handler reads state, calls one component operation, and
//! reflects the verdict in the inline error. Nothing here touches the GUI.

use super::camera_session::{CameraSession, LiveSurface, StartOutcome, StartTicket};
use super::selection::SelectionStore;
use super::submission::{GateOutcome, InlineError, SubmissionGate, SubmitEvent};
use crate::application::port::camera::{CaptureConstraints, FrameEncoder, LiveStream, MediaCapture};
use crate::application::port::transport::{SubmissionReceipt, SubmitAction, TransportError};
use crate::domain::error::CaptureError;
use crate::domain::intake::{AcceptancePolicy, AcceptanceVerdict, ImageCandidate, UiVisibility};
use std::sync::Arc;

/// Settings the context is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeSettings {
    pub constraints: CaptureConstraints,
    pub file_field: String,
    pub extra_fields: Vec<(String, String)>,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            constraints: CaptureConstraints::default(),
            file_field: "file".to_string(),
            extra_fields: Vec::new(),
        }
    }
}

/// Drop target hover state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropZone {
    hovered: bool,
}

impl DropZone {
    #[must_use]
    pub fn is_hovered(self) -> bool {
        self.hovered
    }
}

/// Owns the selection, the camera session and the submission gate.
#[derive(Debug)]
pub struct IntakeContext {
    selection: SelectionStore,
    camera: CameraSession,
    surface: LiveSurface,
    gate: SubmissionGate,
    inline_error: InlineError,
    drop_zone: DropZone,
}

impl IntakeContext {
    #[must_use]
    pub fn new(settings: IntakeSettings, encoder: Arc<dyn FrameEncoder>) -> Self {
        Self {
            selection: SelectionStore::new(AcceptancePolicy::new()),
            camera: CameraSession::new(settings.constraints, encoder),
            surface: LiveSurface::new(),
            gate: SubmissionGate::new(settings.file_field, settings.extra_fields),
            inline_error: InlineError::default(),
            drop_zone: DropZone::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Input paths
    // -------------------------------------------------------------------------

    /// File picker change: stores the file and validates it live.
    pub fn pick_file(&mut self, candidate: ImageCandidate) -> AcceptanceVerdict {
        let verdict = self.selection.stage_from_picker(candidate, &mut self.camera);
        self.surface.clear();
        self.reflect(&verdict);
        verdict
    }

    /// File dropped on the upload box: stored only if accepted.
    pub fn drop_file(&mut self, candidate: ImageCandidate) -> AcceptanceVerdict {
        self.drop_zone.hovered = false;
        let verdict = self.selection.set_from_candidate(candidate, &mut self.camera);
        if verdict.is_accepted() {
            self.surface.clear();
        }
        self.reflect(&verdict);
        verdict
    }

    pub fn drag_entered(&mut self) {
        self.drop_zone.hovered = true;
    }

    pub fn drag_left(&mut self) {
        self.drop_zone.hovered = false;
    }

    // -------------------------------------------------------------------------
    // Camera
    // -------------------------------------------------------------------------

    /// Starts the camera synchronously and binds the live view.
    ///
    /// A granted stream replaces the current selection; a failed request
    /// keeps it.
    ///
    /// # Errors
    ///
    /// Propagates the capture failure; the context is then unchanged apart
    /// from any previously active session having been released.
    pub fn start_camera(&mut self, capture: &dyn MediaCapture) -> Result<(), CaptureError> {
        self.camera.start(capture)?;
        self.camera_activated();
        Ok(())
    }

    /// First half of an asynchronous start.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Unsupported`] without touching any state when
    /// the platform cannot reach a camera.
    pub fn begin_camera_start(&mut self, capture: &dyn MediaCapture) -> Result<StartTicket, CaptureError> {
        if !capture.is_supported() {
            return Err(CaptureError::Unsupported);
        }
        self.surface.clear();
        Ok(self.camera.begin_start())
    }

    /// Second half of an asynchronous start.
    ///
    /// # Errors
    ///
    /// Returns the capture error of a current request.
    pub fn finish_camera_start(
        &mut self,
        ticket: StartTicket,
        result: Result<Box<dyn LiveStream>, CaptureError>,
    ) -> Result<StartOutcome, CaptureError> {
        let outcome = self.camera.finish_start(ticket, result)?;
        if outcome == StartOutcome::Activated {
            self.camera_activated();
        }
        Ok(outcome)
    }

    /// The live view takes over the box: a selection never outlives a
    /// camera start.
    fn camera_activated(&mut self) {
        if self.selection.current().is_some() {
            tracing::debug!("camera started, dropping current selection");
            self.selection.clear();
            self.inline_error.clear();
        }
        self.camera.bind_preview(&mut self.surface);
    }

    /// Pulls the newest camera frame into the live view.
    pub fn refresh_camera(&mut self) -> bool {
        self.camera.refresh(&mut self.surface)
    }

    /// Captures the displayed frame and commits it through the strict path.
    ///
    /// Returns `Ok(None)` when there is nothing to capture.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Encoding`] if the frame cannot be encoded; the
    /// session keeps running.
    pub fn capture(&mut self) -> Result<Option<AcceptanceVerdict>, CaptureError> {
        let Some(candidate) = self.camera.capture_frame(&self.surface)? else {
            return Ok(None);
        };
        let verdict = self.selection.set_from_candidate(candidate, &mut self.camera);
        if verdict.is_accepted() {
            self.surface.clear();
        }
        self.reflect(&verdict);
        Ok(Some(verdict))
    }

    /// Cancels the camera (or a pending start).
    pub fn cancel_camera(&mut self) -> bool {
        self.surface.clear();
        self.camera.stop()
    }

    // -------------------------------------------------------------------------
    // Submission
    // -------------------------------------------------------------------------

    pub fn submit(&mut self, transport: &mut dyn SubmitAction) -> GateOutcome {
        let mut event = SubmitEvent::new();
        self.gate
            .on_submit(&mut event, &self.selection, transport, &mut self.inline_error)
    }

    /// Applies the server's answer.
    ///
    /// Success resets the form; failure keeps the selection so the user can
    /// retry.
    pub fn submission_finished(&mut self, result: &Result<SubmissionReceipt, TransportError>) {
        self.gate.reset();
        match result {
            Ok(receipt) if receipt.is_success() => {
                tracing::info!(status = receipt.status, "upload accepted");
                self.selection.clear();
                self.inline_error.clear();
            }
            Ok(receipt) => {
                tracing::warn!(status = receipt.status, "upload answered with non-success status");
            }
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
            }
        }
    }

    /// Releases the camera. Called on window close.
    pub fn shutdown(&mut self) {
        self.cancel_camera();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn visibility(&self) -> UiVisibility {
        UiVisibility::derive(self.selection.current().is_some(), self.camera.is_active())
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    #[must_use]
    pub fn camera(&self) -> &CameraSession {
        &self.camera
    }

    #[must_use]
    pub fn surface(&self) -> &LiveSurface {
        &self.surface
    }

    #[must_use]
    pub fn gate(&self) -> &SubmissionGate {
        &self.gate
    }

    #[must_use]
    pub fn inline_error(&self) -> &InlineError {
        &self.inline_error
    }

    #[must_use]
    pub fn drop_zone(&self) -> DropZone {
        self.drop_zone
    }

    fn reflect(&mut self, verdict: &AcceptanceVerdict) {
        match verdict.rejection() {
            Some(rejection) => self.inline_error.show(rejection.clone()),
            None => self.inline_error.clear(),
        }
    }
}
