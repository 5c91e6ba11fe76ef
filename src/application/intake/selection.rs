// SPDX-License-Identifier: MPL-2.0
//! The single source of truth for the selected image.

use super::camera_session::CameraSession;
use crate::domain::intake::{AcceptancePolicy, AcceptanceVerdict, ImageCandidate};

/// What is currently selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Empty,
    HasImage(ImageCandidate),
}

/// Owns [`SelectionState`]; every mutation goes through here.
///
/// Committing a candidate always ends the camera session, so a selection and
/// a live camera never coexist.
#[derive(Debug, Default)]
pub struct SelectionStore {
    state: SelectionState,
    policy: AcceptancePolicy,
}

impl SelectionStore {
    #[must_use]
    pub fn new(policy: AcceptancePolicy) -> Self {
        Self {
            state: SelectionState::Empty,
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &AcceptancePolicy {
        &self.policy
    }

    /// Commits `candidate` only if the policy accepts it.
    ///
    /// On rejection the current selection is left untouched.
    pub fn set_from_candidate(
        &mut self,
        candidate: ImageCandidate,
        camera: &mut CameraSession,
    ) -> AcceptanceVerdict {
        let verdict = self.policy.evaluate(Some(&candidate));
        if verdict.is_accepted() {
            self.commit(candidate, camera);
        } else {
            tracing::debug!(
                source = %candidate.source(),
                name = candidate.name(),
                rejection = ?verdict.rejection(),
                "candidate rejected"
            );
        }
        verdict
    }

    /// Commits `candidate` whatever the verdict, which is returned for the
    /// inline error.
    ///
    /// This is how a file picker behaves: it holds whatever the user chose,
    /// and the submission gate refuses it later if it is invalid.
    pub fn stage_from_picker(
        &mut self,
        candidate: ImageCandidate,
        camera: &mut CameraSession,
    ) -> AcceptanceVerdict {
        let verdict = self.policy.evaluate(Some(&candidate));
        self.commit(candidate, camera);
        verdict
    }

    /// Resets to [`SelectionState::Empty`].
    pub fn clear(&mut self) {
        self.state = SelectionState::Empty;
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageCandidate> {
        match &self.state {
            SelectionState::Empty => None,
            SelectionState::HasImage(candidate) => Some(candidate),
        }
    }

    fn commit(&mut self, candidate: ImageCandidate, camera: &mut CameraSession) {
        tracing::info!(
            source = %candidate.source(),
            name = candidate.name(),
            bytes = candidate.byte_size(),
            "selection committed"
        );
        self.state = SelectionState::HasImage(candidate);
        camera.stop();
    }
}
