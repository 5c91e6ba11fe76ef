// SPDX-License-Identifier: MPL-2.0
//! Render handles for the static preview and the live camera view.
//!
//! Building an image handle gives it a fresh id, and a fresh id makes the
//! renderer upload the texture again. The controller therefore keeps the
//! handle of the current candidate and of the current camera frame, and only
//! rebuilds one when what it shows actually changed.

use crate::application::intake::IntakeContext;
use crate::domain::intake::{CandidateId, UiVisibility};
use iced::widget::image::Handle;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct PreviewController {
    still: Option<(CandidateId, Handle)>,
    live: Option<(Arc<Vec<u8>>, Handle)>,
}

impl PreviewController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings both handles in line with `context` and returns the visibility
    /// they were built for.
    ///
    /// Whichever surface is hidden has its handle dropped.
    pub fn sync(&mut self, context: &IntakeContext) -> UiVisibility {
        let visibility = context.visibility();

        let candidate = context
            .selection()
            .current()
            .filter(|_| visibility.preview_visible);
        match candidate {
            Some(candidate) => {
                let cached = self
                    .still
                    .as_ref()
                    .is_some_and(|(id, _)| *id == candidate.id());
                if !cached {
                    let preview = candidate.preview();
                    self.still = Some((preview.id, Handle::from_bytes(preview.bytes.to_vec())));
                }
            }
            None => self.still = None,
        }

        let frame = context
            .surface()
            .frame()
            .filter(|_| visibility.camera_visible);
        match frame {
            Some(frame) => {
                let pixels = frame.rgba_bytes_arc();
                let cached = self
                    .live
                    .as_ref()
                    .is_some_and(|(shown, _)| Arc::ptr_eq(shown, &pixels));
                if !cached {
                    let handle =
                        Handle::from_rgba(frame.width(), frame.height(), frame.rgba_bytes().to_vec());
                    self.live = Some((pixels, handle));
                }
            }
            None => self.live = None,
        }

        visibility
    }

    /// Handle of the selected image, while the static preview is visible.
    #[must_use]
    pub fn still(&self) -> Option<&Handle> {
        self.still.as_ref().map(|(_, handle)| handle)
    }

    /// Handle of the newest camera frame, while the live view is visible.
    #[must_use]
    pub fn live(&self) -> Option<&Handle> {
        self.live.as_ref().map(|(_, handle)| handle)
    }
}
