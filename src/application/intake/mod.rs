// SPDX-License-Identifier: MPL-2.0
//! The capture-validate-preview pipeline.
//!
//! - [`camera_session`]: acquire, bind, capture and release the camera
//! - [`selection`]: the selected image, committed strictly or loosely
//! - [`submission`]: submit-time re-validation in front of the transport
//! - [`context`]: the single owner wiring the three together

pub mod camera_session;
pub mod context;
pub mod selection;
pub mod submission;

pub use camera_session::{CameraPhase, CameraSession, LiveSurface, StartOutcome, StartTicket};
pub use context::{DropZone, IntakeContext, IntakeSettings};
pub use selection::{SelectionState, SelectionStore};
pub use submission::{GateOutcome, GatePhase, InlineError, QueuedSubmit, SubmissionGate, SubmitEvent};
