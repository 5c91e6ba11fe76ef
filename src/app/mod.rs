// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct wires the intake context to its adapters (camera,
//! encoder, HTTP transport) and to the presentation layer, and translates
//! messages into side effects like dialogs, background tasks and toasts.

pub mod config;
mod message;
pub mod paths;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::application::intake::IntakeContext;
use crate::application::port::MediaCapture;
use crate::domain::intake::{SourceKind, UiVisibility};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{FfmpegCapture, HttpTransport, JpegEncoder};
use crate::ui::notifications;
use crate::ui::preview::PreviewController;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    intake: IntakeContext,
    capture: Arc<dyn MediaCapture>,
    transport: HttpTransport,
    preview: PreviewController,
    /// Surfaces the preview handles were last synced for.
    visibility: UiVisibility,
    frame_interval: Duration,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("intake", &self.intake)
            .field("endpoint", &self.transport.endpoint())
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 680;
pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 480;
pub const MIN_WINDOW_WIDTH: u32 = 520;

/// Builds the window settings.
///
/// Close requests are handled by the app so the camera is released before
/// the window goes away.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires the boot function to be Fn; flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the intake pipeline from the configuration and optionally
    /// stages the file given on the command line.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let i18n = I18n::new(flags.lang.clone(), flags.i18n_dir.clone(), &config);

        let endpoint = flags
            .endpoint
            .clone()
            .unwrap_or_else(|| config.upload_endpoint().to_string());
        let encoder = Arc::new(JpegEncoder::new(config.jpeg_quality()));

        let mut app = App {
            i18n,
            intake: IntakeContext::new(config.intake_settings(), encoder),
            capture: Arc::new(FfmpegCapture::new()),
            transport: HttpTransport::new(endpoint, config.upload_timeout()),
            preview: PreviewController::new(),
            visibility: UiVisibility::HIDDEN,
            frame_interval: config.frame_interval(),
            notifications: notifications::Manager::new(),
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(notifications::Notification::warning(key));
        }

        tracing::info!(endpoint = app.transport.endpoint(), "intake ready");

        let task = match flags.file_path {
            Some(path) => update::load_file(PathBuf::from(path), SourceKind::FilePicker),
            None => Task::none(),
        };

        (app, task)
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match self.intake.selection().current() {
            Some(candidate) => format!("{} - {app_name}", candidate.name()),
            None => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_camera_subscription(
                self.intake.camera().is_active(),
                self.frame_interval,
            ),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let mut ctx = update::UpdateContext {
            i18n: &self.i18n,
            intake: &mut self.intake,
            capture: &self.capture,
            transport: &self.transport,
            notifications: &mut self.notifications,
        };

        let task = match message {
            Message::UploadBox(message) => update::handle_upload_box_message(&mut ctx, message),
            Message::Notification(message) => {
                ctx.notifications.handle_message(&message);
                Task::none()
            }
            Message::FilePicked(candidate) => {
                update::handle_file_picked(&mut ctx, candidate);
                Task::none()
            }
            Message::FileHovered => {
                ctx.intake.drag_entered();
                Task::none()
            }
            Message::FilesHoveredLeft => {
                ctx.intake.drag_left();
                Task::none()
            }
            Message::FileDropped(path) => update::handle_file_dropped(&mut ctx, path),
            Message::FileLoaded { source, result } => {
                update::handle_file_loaded(&mut ctx, source, result);
                Task::none()
            }
            Message::CameraStarted { ticket, result } => {
                update::handle_camera_started(&mut ctx, ticket, result)
            }
            Message::CameraTick => {
                update::handle_camera_tick(&mut ctx);
                Task::none()
            }
            Message::AlertClosed => Task::none(),
            Message::SubmissionFinished(result) => {
                update::handle_submission_finished(&mut ctx, &result);
                Task::none()
            }
            Message::WindowCloseRequested(id) => {
                ctx.intake.shutdown();
                window::close(id)
            }
        };

        self.visibility = self.preview.sync(&self.intake);
        task
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            intake: &self.intake,
            preview: &self.preview,
            visibility: self.visibility,
            notifications: &self.notifications,
        })
    }
}
