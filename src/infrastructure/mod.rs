// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like `FFmpeg`,
//! the HTTP client and system I/O.
//!
//! # Available Adapters
//!
//! - [`ffmpeg`]: Camera capture via `FFmpeg` devices (implements [`MediaCapture`])
//! - [`jpeg`]: Still encoding of captured frames (implements [`FrameEncoder`])
//! - [`http`]: Multipart form upload via `reqwest`
//! - [`filesystem`]: Reading candidates from local files
//!
//! [`MediaCapture`]: crate::application::port::MediaCapture
//! [`FrameEncoder`]: crate::application::port::FrameEncoder

pub mod ffmpeg;
pub mod filesystem;
pub mod http;
pub mod jpeg;

// Re-export main types for convenience
pub use ffmpeg::FfmpegCapture;
pub use http::HttpTransport;
pub use jpeg::JpegEncoder;
