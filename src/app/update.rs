// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! Handlers call one intake operation each and turn its outcome into side
//! effects: dialogs, background tasks, toasts. State rules live in the
//! intake context, not here.

use super::Message;
use crate::application::intake::{GateOutcome, IntakeContext, QueuedSubmit, StartTicket};
use crate::application::port::{
    MediaCapture, StreamDelivery, SubmissionReceipt, TransportError,
};
use crate::domain::error::CaptureError;
use crate::domain::intake::{AcceptanceVerdict, ImageCandidate, SourceKind, ALLOWED_EXTENSIONS};
use crate::error::Error;
use crate::i18n::fluent::I18n;
use crate::infrastructure::filesystem;
use crate::infrastructure::HttpTransport;
use crate::ui::notifications::{self, Notification};
use crate::ui::upload_box;
use iced::Task;
use std::path::PathBuf;
use std::sync::Arc;

/// Mutable view of the application state handed to the handlers.
pub struct UpdateContext<'a> {
    pub i18n: &'a I18n,
    pub intake: &'a mut IntakeContext,
    pub capture: &'a Arc<dyn MediaCapture>,
    pub transport: &'a HttpTransport,
    pub notifications: &'a mut notifications::Manager,
}

/// Routes the upload form's buttons.
pub fn handle_upload_box_message(
    ctx: &mut UpdateContext<'_>,
    message: upload_box::Message,
) -> Task<Message> {
    match message {
        upload_box::Message::ChooseFile => handle_open_file_dialog(ctx.i18n),
        upload_box::Message::UseCamera => handle_start_camera(ctx),
        upload_box::Message::Capture => handle_capture(ctx),
        upload_box::Message::CancelCamera => {
            ctx.intake.cancel_camera();
            Task::none()
        }
        upload_box::Message::Submit => handle_submit(ctx),
    }
}

// =============================================================================
// File picker and drag and drop
// =============================================================================

/// Opens the native file dialog and reads the chosen file.
pub fn handle_open_file_dialog(i18n: &I18n) -> Task<Message> {
    let images = i18n.tr("dialog-filter-images");
    let all_files = i18n.tr("dialog-filter-all");

    Task::perform(
        async move {
            let handle = rfd::AsyncFileDialog::new()
                .add_filter(images, &ALLOWED_EXTENSIONS)
                .add_filter(all_files, &["*"])
                .pick_file()
                .await?;
            let name = handle.file_name();
            let bytes = handle.read().await;
            Some(ImageCandidate::new(SourceKind::FilePicker, name, bytes))
        },
        Message::FilePicked,
    )
}

/// Picker results go through the loose path: stored even when rejected.
pub fn handle_file_picked(ctx: &mut UpdateContext<'_>, candidate: Option<ImageCandidate>) {
    let Some(candidate) = candidate else {
        tracing::debug!("file dialog cancelled");
        return;
    };
    ctx.intake.pick_file(candidate);
}

/// Reads a file from disk off the update loop.
pub fn load_file(path: PathBuf, source: SourceKind) -> Task<Message> {
    Task::perform(
        async move { filesystem::load_candidate(&path, source) },
        move |result| Message::FileLoaded { source, result },
    )
}

pub fn handle_file_dropped(ctx: &mut UpdateContext<'_>, path: PathBuf) -> Task<Message> {
    ctx.intake.drag_left();
    load_file(path, SourceKind::DragDrop)
}

pub fn handle_file_loaded(
    ctx: &mut UpdateContext<'_>,
    source: SourceKind,
    result: Result<ImageCandidate, Error>,
) {
    let candidate = match result {
        Ok(candidate) => candidate,
        Err(err) => {
            tracing::warn!(%source, error = %err, "could not read file");
            ctx.notifications
                .push(Notification::error("notification-file-read-error"));
            return;
        }
    };

    match source {
        SourceKind::DragDrop => {
            ctx.intake.drop_file(candidate);
        }
        SourceKind::FilePicker | SourceKind::CameraCapture => {
            ctx.intake.pick_file(candidate);
        }
    }
}

// =============================================================================
// Camera
// =============================================================================

/// Opens the camera on a blocking thread; the platform may prompt for
/// permission and that must not freeze the window.
pub fn handle_start_camera(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let ticket = match ctx.intake.begin_camera_start(ctx.capture.as_ref()) {
        Ok(ticket) => ticket,
        Err(err) => return camera_alert(ctx.i18n, &err),
    };

    let capture = Arc::clone(ctx.capture);
    let constraints = ctx.intake.camera().constraints().clone();
    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || capture.request_video_stream(&constraints))
                .await
                .map_err(|e| CaptureError::Other(format!("camera task failed: {e}")))
                .and_then(std::convert::identity)
                .map(StreamDelivery::new)
        },
        move |result| Message::CameraStarted { ticket, result },
    )
}

pub fn handle_camera_started(
    ctx: &mut UpdateContext<'_>,
    ticket: StartTicket,
    result: Result<StreamDelivery, CaptureError>,
) -> Task<Message> {
    let result = result.and_then(|delivery| {
        delivery
            .take()
            .ok_or_else(|| CaptureError::Other("camera stream already claimed".into()))
    });

    match ctx.intake.finish_camera_start(ticket, result) {
        Ok(_) => Task::none(),
        Err(err) => camera_alert(ctx.i18n, &err),
    }
}

pub fn handle_camera_tick(ctx: &mut UpdateContext<'_>) {
    let was_active = ctx.intake.camera().is_active();
    if ctx.intake.refresh_camera() && was_active && !ctx.intake.camera().is_active() {
        ctx.notifications
            .push(Notification::warning("notification-camera-lost"));
    }
}

pub fn handle_capture(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    match ctx.intake.capture() {
        Ok(Some(AcceptanceVerdict::Accepted)) => {
            tracing::info!("captured frame selected");
            Task::none()
        }
        Ok(Some(AcceptanceVerdict::Rejected(rejection))) => {
            tracing::info!(%rejection, "captured frame rejected");
            Task::none()
        }
        Ok(None) => Task::none(),
        Err(err) => camera_alert(ctx.i18n, &err),
    }
}

/// Shows a camera failure in a modal alert.
fn camera_alert(i18n: &I18n, err: &CaptureError) -> Task<Message> {
    let title = i18n.tr("alert-camera-title");
    let description = match err.detail() {
        Some(detail) => i18n.tr_with_args(err.i18n_key(), &[("detail", detail)]),
        None => i18n.tr(err.i18n_key()),
    };

    Task::perform(
        async move {
            rfd::AsyncMessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title(title)
                .set_description(description)
                .set_buttons(rfd::MessageButtons::Ok)
                .show()
                .await;
        },
        |()| Message::AlertClosed,
    )
}

// =============================================================================
// Submission
// =============================================================================

pub fn handle_submit(ctx: &mut UpdateContext<'_>) -> Task<Message> {
    let mut queued = QueuedSubmit::default();
    match ctx.intake.submit(&mut queued) {
        GateOutcome::Submitted => {}
        GateOutcome::Blocked(_) | GateOutcome::InFlight => return Task::none(),
    }

    let Some(form) = queued.take() else {
        tracing::error!("gate submitted without a form");
        ctx.intake
            .submission_finished(&Err(TransportError::Build("no form to send".into())));
        return Task::none();
    };

    let transport = ctx.transport.clone();
    tracing::info!(endpoint = transport.endpoint(), file = %form.file_name, "uploading");
    Task::perform(transport.send(form), Message::SubmissionFinished)
}

pub fn handle_submission_finished(
    ctx: &mut UpdateContext<'_>,
    result: &Result<SubmissionReceipt, TransportError>,
) {
    ctx.intake.submission_finished(result);

    let notification = match result {
        Ok(receipt) => Notification::success("notification-upload-success")
            .with_arg("status", receipt.status.to_string()),
        Err(TransportError::Status { status, .. }) => {
            Notification::error("notification-upload-status-error")
                .with_arg("status", status.to_string())
        }
        Err(err) => Notification::error(err.i18n_key()),
    };
    ctx.notifications.push(notification);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::intake::IntakeSettings;
    use crate::test_utils::{FakeCapture, FakeEncoder};
    use std::time::Duration;

    struct Harness {
        fake: Arc<FakeCapture>,
        i18n: I18n,
        intake: IntakeContext,
        capture: Arc<dyn MediaCapture>,
        transport: HttpTransport,
        notifications: notifications::Manager,
    }

    impl Harness {
        fn new(capture: FakeCapture) -> Self {
            let fake = Arc::new(capture);
            Self {
                capture: Arc::clone(&fake) as Arc<dyn MediaCapture>,
                fake,
                i18n: I18n::default(),
                intake: IntakeContext::new(IntakeSettings::default(), Arc::new(FakeEncoder)),
                transport: HttpTransport::new("http://127.0.0.1:9/", Duration::from_secs(1)),
                notifications: notifications::Manager::new(),
            }
        }

        fn ctx(&mut self) -> UpdateContext<'_> {
            UpdateContext {
                i18n: &self.i18n,
                intake: &mut self.intake,
                capture: &self.capture,
                transport: &self.transport,
                notifications: &mut self.notifications,
            }
        }
    }

    #[test]
    fn unreadable_drop_raises_error_toast() {
        let mut harness = Harness::new(FakeCapture::granting(None));
        handle_file_loaded(
            &mut harness.ctx(),
            SourceKind::DragDrop,
            Err(Error::Io("gone".into())),
        );
        assert_eq!(harness.notifications.visible_count(), 1);
        assert!(harness.intake.selection().current().is_none());
    }

    #[test]
    fn loaded_drop_goes_through_strict_path() {
        let mut harness = Harness::new(FakeCapture::granting(None));
        let candidate = ImageCandidate::new(SourceKind::DragDrop, "notes.txt", vec![1u8]);
        handle_file_loaded(&mut harness.ctx(), SourceKind::DragDrop, Ok(candidate));

        assert!(harness.intake.selection().current().is_none());
        assert!(harness.intake.inline_error().is_visible());
    }

    #[test]
    fn command_line_file_goes_through_loose_path() {
        let mut harness = Harness::new(FakeCapture::granting(None));
        let candidate = ImageCandidate::new(SourceKind::FilePicker, "notes.txt", vec![1u8]);
        handle_file_loaded(&mut harness.ctx(), SourceKind::FilePicker, Ok(candidate));

        assert!(harness.intake.selection().current().is_some());
        assert!(harness.intake.inline_error().is_visible());
    }

    #[test]
    fn cancelled_dialog_changes_nothing() {
        let mut harness = Harness::new(FakeCapture::granting(None));
        handle_file_picked(&mut harness.ctx(), None);
        assert!(harness.intake.selection().current().is_none());
        assert!(!harness.intake.inline_error().is_visible());
    }

    #[test]
    fn stream_loss_raises_warning() {
        let capture = FakeCapture::granting(Some(crate::test_utils::sample_frame(2, 2)));
        let mut harness = Harness::new(capture);
        harness
            .intake
            .start_camera(harness.capture.as_ref())
            .expect("camera starts");

        harness.fake.probe().kill_stream();
        handle_camera_tick(&mut harness.ctx());

        assert!(!harness.intake.camera().is_active());
        assert_eq!(harness.notifications.visible_count(), 1);
    }

    #[test]
    fn failed_upload_keeps_selection_and_toasts_status() {
        let mut harness = Harness::new(FakeCapture::granting(None));
        let candidate = ImageCandidate::new(SourceKind::FilePicker, "a.png", vec![1u8; 8]);
        harness.intake.pick_file(candidate);
        let _ = handle_submit(&mut harness.ctx());

        handle_submission_finished(
            &mut harness.ctx(),
            &Err(TransportError::Status {
                status: 500,
                body: String::new(),
            }),
        );

        assert!(harness.intake.selection().current().is_some());
        let toast = harness.notifications.visible().next().expect("toast");
        assert_eq!(toast.message_key(), "notification-upload-status-error");
        assert_eq!(toast.message_args()[0].1, "500");
    }
}
