// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::intake::StartTicket;
use crate::application::port::{StreamDelivery, SubmissionReceipt, TransportError};
use crate::domain::error::CaptureError;
use crate::domain::intake::{ImageCandidate, SourceKind};
use crate::error::Error;
use crate::ui::notifications;
use crate::ui::upload_box;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    UploadBox(upload_box::Message),
    Notification(notifications::NotificationMessage),
    /// Result of the open file dialog; `None` when the user cancelled.
    FilePicked(Option<ImageCandidate>),
    /// A file is being dragged over the window.
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// A dropped (or command-line) file was read from disk.
    FileLoaded {
        source: SourceKind,
        result: Result<ImageCandidate, Error>,
    },
    /// The blocking camera open finished.
    CameraStarted {
        ticket: StartTicket,
        result: Result<StreamDelivery, CaptureError>,
    },
    /// Time to pull the next camera frame into the live view.
    CameraTick,
    /// A modal alert was closed.
    AlertClosed,
    SubmissionFinished(Result<SubmissionReceipt, TransportError>),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Optional image path to stage on startup, as if picked.
    pub file_path: Option<String>,
    /// Optional upload URL; takes precedence over `[upload] endpoint`.
    pub endpoint: Option<String>,
    /// Optional directory containing Fluent `.ftl` files for custom builds.
    pub i18n_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `LENS_INTAKE_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
}
