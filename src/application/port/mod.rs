// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`camera`]: Camera stream acquisition and still-frame encoding
//! - [`transport`]: Delivery of the validated upload form
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no `FFmpeg` or HTTP types)
//! - Methods return `Result` with domain error types
//! - No `async fn` - use Iced's `Task` return type pattern in callers

pub mod camera;
pub mod transport;

// Re-export main types for convenience
pub use camera::{
    CaptureConstraints, FacingMode, FrameEncoder, LiveStream, MediaCapture, StreamDelivery,
};
pub use transport::{SubmissionReceipt, SubmitAction, TransportError, UploadForm};
