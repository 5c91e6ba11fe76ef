// SPDX-License-Identifier: MPL-2.0
//! Toast notifications for outcomes that happen away from the form.
//!
//! The inline error under the upload box covers acceptance rejections. Toasts
//! cover the rest: upload results, configuration fallbacks and unreadable
//! files.
//!
//! Success and info toasts fade after a few seconds, warnings stay a little
//! longer and errors wait for the user. At most three are shown at once;
//! later ones queue.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
