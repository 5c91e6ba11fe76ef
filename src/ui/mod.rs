// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Views follow the Elm-style "state down, messages up" pattern: they read
//! the intake context and emit messages, never mutating state themselves.
//!
//! - [`upload_box`] - The upload form (drop zone, buttons, inline error)
//! - [`preview`] - Cached image handles for the static and live surfaces
//! - [`notifications`] - Toast notification system for user feedback
//! - [`styles`] - Centralized styling (buttons, containers, text)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod design_tokens;
pub mod notifications;
pub mod preview;
pub mod styles;
pub mod upload_box;
