// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Routes native window events (file hover, drop, close) to messages and
//! drives the two timers: the camera frame pump and the notification tick.

use super::Message;
use crate::ui::notifications::NotificationMessage;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the notification auto-dismiss check.
const NOTIFICATION_TICK: Duration = Duration::from_millis(100);

/// Window events the upload form reacts to.
///
/// Drag and drop is accepted anywhere in the window, which is the drop zone
/// as far as the platform is concerned.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
        event::Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
        event::Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
        event::Event::Window(window::Event::CloseRequested) => {
            Some(Message::WindowCloseRequested(window_id))
        }
        _ => None,
    })
}

/// Pulls camera frames while a session is active.
pub fn create_camera_subscription(camera_active: bool, interval: Duration) -> Subscription<Message> {
    if camera_active {
        time::every(interval).map(|_| Message::CameraTick)
    } else {
        Subscription::none()
    }
}

/// Ticks while toasts are on screen so they can expire.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(NOTIFICATION_TICK).map(|_| Message::Notification(NotificationMessage::Tick))
    } else {
        Subscription::none()
    }
}
