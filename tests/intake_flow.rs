// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios of the capture-validate-preview pipeline, driven
//! through the intake context with in-memory camera and transport.

use lens_intake::application::intake::{
    CameraPhase, CameraSession, GateOutcome, GatePhase, IntakeContext, IntakeSettings,
    StartOutcome,
};
use lens_intake::application::port::{
    CaptureConstraints, MediaCapture, SubmissionReceipt, TransportError,
};
use lens_intake::domain::error::CaptureError;
use lens_intake::domain::intake::{AcceptanceVerdict, ImageCandidate, Rejection, SourceKind};
use lens_intake::test_utils::{
    sample_frame, FakeCapture, FakeEncoder, RecordingTransport,
};
use std::sync::Arc;

fn intake() -> IntakeContext {
    IntakeContext::new(IntakeSettings::default(), Arc::new(FakeEncoder))
}

fn picked(name: &str, size: usize) -> ImageCandidate {
    ImageCandidate::new(SourceKind::FilePicker, name, vec![0u8; size])
}

fn dropped(name: &str, size: usize) -> ImageCandidate {
    ImageCandidate::new(SourceKind::DragDrop, name, vec![0u8; size])
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn valid_png_is_accepted_and_submitted() {
    let mut ctx = intake();
    let verdict = ctx.pick_file(picked("photo.png", 1_000_000));

    assert_eq!(verdict, AcceptanceVerdict::Accepted);
    assert_eq!(ctx.inline_error().text(), "");

    let mut transport = RecordingTransport::default();
    assert_eq!(ctx.submit(&mut transport), GateOutcome::Submitted);

    let forms = transport.forms();
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].file_field, "file");
    assert_eq!(forms[0].file_name, "photo.png");
    assert_eq!(forms[0].mime_type, "image/png");
    assert_eq!(forms[0].bytes.len(), 1_000_000);
}

#[test]
fn executable_is_flagged_and_blocked() {
    let mut ctx = intake();
    ctx.pick_file(picked("malware.exe", 1_000));

    assert_eq!(
        ctx.inline_error().text(),
        "Invalid file type. Please upload an image file (png, jpg, jpeg, gif)."
    );

    let mut transport = RecordingTransport::default();
    assert_eq!(
        ctx.submit(&mut transport),
        GateOutcome::Blocked(Rejection::UnsupportedType)
    );
    assert!(transport.forms().is_empty());
}

#[test]
fn oversized_jpeg_is_flagged_and_blocked() {
    let mut ctx = intake();
    ctx.pick_file(picked("huge.jpg", 6_291_456));

    assert_eq!(
        ctx.inline_error().text(),
        "File size exceeds 2 MB. Your file size: 6.00 MB."
    );

    let mut transport = RecordingTransport::default();
    assert!(matches!(
        ctx.submit(&mut transport),
        GateOutcome::Blocked(Rejection::TooLarge { .. })
    ));
    assert!(transport.forms().is_empty());
}

#[test]
fn camera_capture_becomes_the_selection() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(Some(sample_frame(64, 48)));
    ctx.start_camera(&capture).expect("camera starts");
    assert!(ctx.visibility().camera_visible);

    let verdict = ctx.capture().expect("capture succeeds");

    assert_eq!(verdict, Some(AcceptanceVerdict::Accepted));
    let selected = ctx.selection().current().expect("selection");
    assert_eq!(selected.source(), SourceKind::CameraCapture);
    assert_eq!(selected.name(), "camera-capture.jpg");
    assert_eq!(selected.bytes(), FakeEncoder::expected_bytes(64, 48).as_slice());
    assert_eq!(ctx.camera().phase(), CameraPhase::Inactive);
    assert!(ctx.visibility().preview_visible);
    assert!(!ctx.visibility().camera_visible);
    assert_eq!(capture.probe().stop_calls(), 1);
}

#[test]
fn denied_camera_leaves_everything_unchanged() {
    let mut ctx = intake();
    ctx.drop_file(dropped("kept.gif", 10));
    let before = ctx.selection().state().clone();

    let capture = FakeCapture::denying(CaptureError::PermissionDenied("denied by user".into()));
    let err = ctx.start_camera(&capture).expect_err("start fails");

    assert_eq!(err.i18n_key(), "error-camera-permission-denied");
    assert_eq!(ctx.camera().phase(), CameraPhase::Inactive);
    assert_eq!(ctx.selection().state(), &before);
    assert!(ctx.visibility().preview_visible);
}

#[test]
fn submit_without_selection_reports_missing_file() {
    let mut ctx = intake();
    let mut transport = RecordingTransport::default();

    assert_eq!(
        ctx.submit(&mut transport),
        GateOutcome::Blocked(Rejection::NoSelection)
    );
    assert_eq!(
        ctx.inline_error().text(),
        "No file selected. Please upload a file."
    );
    assert!(transport.forms().is_empty());
}

// =============================================================================
// Camera lifecycle
// =============================================================================

#[test]
fn accepted_drop_tears_down_the_camera() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(Some(sample_frame(8, 8)));
    ctx.start_camera(&capture).expect("camera starts");

    let verdict = ctx.drop_file(dropped("photo.jpeg", 512));

    assert!(verdict.is_accepted());
    assert!(!ctx.camera().is_active());
    assert_eq!(capture.probe().stop_calls(), 1);
}

#[test]
fn rejected_drop_keeps_camera_running() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(Some(sample_frame(8, 8)));
    ctx.start_camera(&capture).expect("camera starts");

    let verdict = ctx.drop_file(dropped("notes.txt", 10));

    assert!(!verdict.is_accepted());
    assert!(ctx.camera().is_active());
    assert!(ctx.selection().current().is_none());
    assert!(ctx.inline_error().is_visible());
    assert_eq!(capture.probe().stop_calls(), 0);
}

#[test]
fn granted_camera_replaces_picked_file() {
    let mut ctx = intake();
    let mut transport = RecordingTransport::default();
    ctx.pick_file(picked("photo.png", 10));
    let capture = FakeCapture::granting(Some(sample_frame(8, 8)));

    ctx.start_camera(&capture).expect("camera starts");

    assert!(ctx.selection().current().is_none());
    assert!(ctx.visibility().camera_visible);
    assert_eq!(
        ctx.submit(&mut transport),
        GateOutcome::Blocked(Rejection::NoSelection)
    );
    assert!(transport.forms().is_empty());
}

#[test]
fn stopping_twice_releases_the_stream_once() {
    let capture = FakeCapture::granting(None);
    let mut session = CameraSession::new(CaptureConstraints::default(), Arc::new(FakeEncoder));
    session.start(&capture).expect("camera starts");

    assert!(session.stop());
    assert!(!session.stop());
    assert_eq!(capture.probe().stop_calls(), 1);
    assert_eq!(session.phase(), CameraPhase::Inactive);
}

#[test]
fn restarting_releases_the_previous_stream_first() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(None);
    ctx.start_camera(&capture).expect("first start");
    ctx.start_camera(&capture).expect("second start");

    assert_eq!(capture.probe().requests(), 2);
    assert_eq!(capture.probe().stop_calls(), 1);
    assert!(ctx.camera().is_active());
}

#[test]
fn unsupported_platform_changes_nothing() {
    let mut ctx = intake();
    let capture = FakeCapture::unsupported();

    let err = ctx.begin_camera_start(&capture).expect_err("unsupported");

    assert_eq!(err, CaptureError::Unsupported);
    assert_eq!(ctx.camera().phase(), CameraPhase::Inactive);
    assert_eq!(capture.probe().requests(), 0);
}

#[test]
fn cancelled_pending_start_discards_late_stream() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(None);
    let ticket = ctx.begin_camera_start(&capture).expect("supported");
    assert!(ctx.camera().is_pending());
    ctx.cancel_camera();

    let stream = capture
        .request_video_stream(&CaptureConstraints::default())
        .expect("stream opens");
    let outcome = ctx.finish_camera_start(ticket, Ok(stream));

    assert_eq!(outcome, Ok(StartOutcome::Stale));
    assert!(!ctx.camera().is_active());
    assert_eq!(capture.probe().stop_calls(), 1);
}

#[test]
fn capture_without_camera_is_a_no_op() {
    let mut ctx = intake();
    assert_eq!(ctx.capture(), Ok(None));
    assert!(ctx.selection().current().is_none());
}

#[test]
fn capture_before_first_frame_is_a_no_op() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(None);
    ctx.start_camera(&capture).expect("camera starts");

    assert_eq!(ctx.capture(), Ok(None));
    assert!(ctx.camera().is_active());
}

#[test]
fn live_view_follows_pushed_frames() {
    let mut ctx = intake();
    let capture = FakeCapture::granting(None);
    ctx.start_camera(&capture).expect("camera starts");
    assert!(ctx.surface().frame().is_none());

    capture.probe().push_frame(sample_frame(16, 9));
    assert!(ctx.refresh_camera());

    let frame = ctx.surface().frame().expect("frame shown");
    assert_eq!((frame.width(), frame.height()), (16, 9));
}

// =============================================================================
// Submission round trip
// =============================================================================

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let mut ctx = intake();
    ctx.pick_file(picked("photo.png", 100));
    let mut transport = RecordingTransport::default();

    assert_eq!(ctx.submit(&mut transport), GateOutcome::Submitted);
    assert_eq!(ctx.submit(&mut transport), GateOutcome::InFlight);
    assert_eq!(transport.forms().len(), 1);
    assert_eq!(ctx.gate().phase(), GatePhase::Submitted);
}

#[test]
fn successful_response_resets_the_form() {
    let mut ctx = intake();
    ctx.pick_file(picked("photo.png", 100));
    let mut transport = RecordingTransport::default();
    ctx.submit(&mut transport);

    ctx.submission_finished(&Ok(SubmissionReceipt {
        status: 200,
        body: "<p>stored</p>".into(),
    }));

    assert!(ctx.selection().current().is_none());
    assert_eq!(ctx.gate().phase(), GatePhase::Idle);
    assert!(ctx.visibility().is_idle());
}

#[test]
fn failed_response_keeps_selection_for_retry() {
    let mut ctx = intake();
    ctx.pick_file(picked("photo.png", 100));
    let mut transport = RecordingTransport::default();
    ctx.submit(&mut transport);

    ctx.submission_finished(&Err(TransportError::Network("connection refused".into())));

    assert!(ctx.selection().current().is_some());
    assert_eq!(ctx.gate().phase(), GatePhase::Idle);
    assert_eq!(ctx.submit(&mut transport), GateOutcome::Submitted);
    assert_eq!(transport.forms().len(), 2);
}

#[test]
fn extra_fields_travel_with_the_file() {
    let settings = IntakeSettings {
        file_field: "image".into(),
        extra_fields: vec![("album".into(), "holidays".into())],
        ..IntakeSettings::default()
    };
    let mut ctx = IntakeContext::new(settings, Arc::new(FakeEncoder));
    ctx.drop_file(dropped("beach.jpg", 42));
    let mut transport = RecordingTransport::default();

    ctx.submit(&mut transport);

    let form = &transport.forms()[0];
    assert_eq!(form.file_field, "image");
    assert_eq!(form.extra_fields, vec![("album".to_string(), "holidays".to_string())]);
}

