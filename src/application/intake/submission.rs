// SPDX-License-Identifier: MPL-2.0
//! Submit-time re-validation.
//!
//! The gate suppresses the default transport, re-runs the policy on whatever
//! is selected right now, and only then triggers the transport explicitly.

use super::selection::SelectionStore;
use crate::application::port::transport::{SubmitAction, UploadForm};
use crate::domain::intake::{ImageCandidate, Rejection};

/// A submit request as it reaches the gate.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The inline error text region next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineError {
    shown: Option<Rejection>,
}

impl InlineError {
    pub fn show(&mut self, rejection: Rejection) {
        self.shown = Some(rejection);
    }

    pub fn clear(&mut self) {
        self.shown = None;
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        self.shown.as_ref()
    }

    /// Displayed text; empty when hidden.
    #[must_use]
    pub fn text(&self) -> String {
        self.shown.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    #[default]
    Idle,
    Validating,
    /// The transport was triggered; stays here until [`SubmissionGate::reset`].
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Submitted,
    Blocked(Rejection),
    /// A submission is already in flight.
    InFlight,
}

/// Intercepts submit and guards the transport.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    phase: GatePhase,
    file_field: String,
    extra_fields: Vec<(String, String)>,
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new("file", Vec::new())
    }
}

impl SubmissionGate {
    #[must_use]
    pub fn new(file_field: impl Into<String>, extra_fields: Vec<(String, String)>) -> Self {
        Self {
            phase: GatePhase::Idle,
            file_field: file_field.into(),
            extra_fields,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    /// Handles one submit.
    ///
    /// The event's default is always prevented and the previous inline error
    /// cleared before anything else. The transport is called only when a
    /// candidate is selected and the policy accepts it.
    pub fn on_submit(
        &mut self,
        event: &mut SubmitEvent,
        store: &SelectionStore,
        transport: &mut dyn SubmitAction,
        errors: &mut InlineError,
    ) -> GateOutcome {
        event.prevent_default();

        if self.phase == GatePhase::Submitted {
            return GateOutcome::InFlight;
        }

        errors.clear();
        self.phase = GatePhase::Validating;

        let verdict = store.policy().evaluate(store.current());
        let candidate = match (store.current(), verdict.rejection()) {
            (Some(candidate), None) => candidate,
            (_, rejection) => {
                let rejection = rejection.cloned().unwrap_or(Rejection::NoSelection);
                tracing::info!(%rejection, "submission blocked");
                errors.show(rejection.clone());
                self.phase = GatePhase::Idle;
                return GateOutcome::Blocked(rejection);
            }
        };

        let form = self.build_form(candidate);
        tracing::info!(file = %form.file_name, bytes = form.bytes.len(), "submitting form");
        transport.submit(form);
        self.phase = GatePhase::Submitted;
        GateOutcome::Submitted
    }

    /// Returns to `Idle` once the response has been handled.
    pub fn reset(&mut self) {
        self.phase = GatePhase::Idle;
    }

    fn build_form(&self, candidate: &ImageCandidate) -> UploadForm {
        UploadForm {
            file_field: self.file_field.clone(),
            file_name: candidate.name().to_string(),
            mime_type: candidate.mime_type().to_string(),
            bytes: candidate.shared_bytes(),
            extra_fields: self.extra_fields.clone(),
        }
    }
}

/// Transport action that parks the form for the caller to send.
///
/// The app uses it to turn the gate's synchronous call into an async task.
#[derive(Debug, Default)]
pub struct QueuedSubmit {
    pending: Option<UploadForm>,
}

impl QueuedSubmit {
    pub fn take(&mut self) -> Option<UploadForm> {
        self.pending.take()
    }
}

impl SubmitAction for QueuedSubmit {
    fn submit(&mut self, form: UploadForm) {
        self.pending = Some(form);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::intake::camera_session::CameraSession;
    use crate::application::port::camera::CaptureConstraints;
    use crate::domain::intake::SourceKind;
    use crate::test_utils::{FakeEncoder, RecordingTransport};
    use std::sync::Arc;

    fn store_with(name: &str, size: usize) -> SelectionStore {
        let mut store = SelectionStore::default();
        let mut camera = CameraSession::new(CaptureConstraints::default(), Arc::new(FakeEncoder));
        store.stage_from_picker(
            ImageCandidate::new(SourceKind::FilePicker, name, vec![1u8; size]),
            &mut camera,
        );
        store
    }

    #[test]
    fn empty_selection_is_blocked() {
        let mut gate = SubmissionGate::default();
        let mut event = SubmitEvent::new();
        let mut transport = RecordingTransport::default();
        let mut errors = InlineError::default();

        let outcome = gate.on_submit(&mut event, &SelectionStore::default(), &mut transport, &mut errors);

        assert_eq!(outcome, GateOutcome::Blocked(Rejection::NoSelection));
        assert!(event.is_default_prevented());
        assert_eq!(errors.text(), "No file selected. Please upload a file.");
        assert!(transport.forms().is_empty());
        assert_eq!(gate.phase(), GatePhase::Idle);
    }

    #[test]
    fn rejected_selection_is_blocked() {
        let store = store_with("huge.jpg", 6_291_456);
        let mut gate = SubmissionGate::default();
        let mut transport = RecordingTransport::default();
        let mut errors = InlineError::default();

        gate.on_submit(&mut SubmitEvent::new(), &store, &mut transport, &mut errors);

        assert_eq!(errors.text(), "File size exceeds 2 MB. Your file size: 6.00 MB.");
        assert!(transport.forms().is_empty());
    }

    #[test]
    fn accepted_selection_is_sent_once() {
        let store = store_with("photo.png", 1_000);
        let mut gate = SubmissionGate::new("image", vec![("source".into(), "desktop".into())]);
        let mut transport = RecordingTransport::default();
        let mut errors = InlineError::default();
        errors.show(Rejection::NoSelection);

        let outcome = gate.on_submit(&mut SubmitEvent::new(), &store, &mut transport, &mut errors);
        assert_eq!(outcome, GateOutcome::Submitted);
        assert!(!errors.is_visible());

        let again = gate.on_submit(&mut SubmitEvent::new(), &store, &mut transport, &mut errors);
        assert_eq!(again, GateOutcome::InFlight);

        let forms = transport.forms();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].file_field, "image");
        assert_eq!(forms[0].file_name, "photo.png");
        assert_eq!(forms[0].mime_type, "image/png");
        assert_eq!(forms[0].bytes.len(), 1_000);
        assert_eq!(forms[0].extra_fields, vec![("source".to_string(), "desktop".to_string())]);
    }

    #[test]
    fn reset_allows_resubmission() {
        let store = store_with("photo.gif", 5);
        let mut gate = SubmissionGate::default();
        let mut transport = RecordingTransport::default();
        let mut errors = InlineError::default();

        gate.on_submit(&mut SubmitEvent::new(), &store, &mut transport, &mut errors);
        gate.reset();
        gate.on_submit(&mut SubmitEvent::new(), &store, &mut transport, &mut errors);
        assert_eq!(transport.forms().len(), 2);
    }

    #[test]
    fn queued_submit_hands_over_form_once() {
        let store = store_with("photo.jpeg", 5);
        let mut gate = SubmissionGate::default();
        let mut queue = QueuedSubmit::default();
        let mut errors = InlineError::default();

        gate.on_submit(&mut SubmitEvent::new(), &store, &mut queue, &mut errors);
        assert!(queue.take().is_some());
        assert!(queue.take().is_none());
    }
}
