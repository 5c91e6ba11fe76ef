// SPDX-License-Identifier: MPL-2.0
//! Derived visibility of the static preview and the live camera view.

/// Which of the two mutually exclusive surfaces is shown.
///
/// Never stored; always recomputed from the selection and the camera state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiVisibility {
    pub preview_visible: bool,
    pub camera_visible: bool,
}

impl UiVisibility {
    /// Both surfaces hidden (idle).
    pub const HIDDEN: Self = Self {
        preview_visible: false,
        camera_visible: false,
    };

    /// Derives visibility from state.
    ///
    /// An Active camera supersedes the static preview. A pending camera
    /// start counts as inactive, so whatever was shown before stays shown.
    #[must_use]
    pub fn derive(has_image: bool, camera_active: bool) -> Self {
        if camera_active {
            Self {
                preview_visible: false,
                camera_visible: true,
            }
        } else {
            Self {
                preview_visible: has_image,
                camera_visible: false,
            }
        }
    }

    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::HIDDEN
    }
}
