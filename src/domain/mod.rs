// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`error`]: Domain error types ([`CaptureError`](error::CaptureError))
//! - [`intake`]: Candidates, the acceptance policy, verdicts and derived
//!   visibility ([`ImageCandidate`](intake::ImageCandidate),
//!   [`AcceptancePolicy`](intake::AcceptancePolicy),
//!   [`UiVisibility`](intake::UiVisibility))
//! - [`media`]: Pixel data ([`VideoFrame`](media::VideoFrame))

pub mod error;
pub mod intake;
pub mod media;
