// SPDX-License-Identifier: MPL-2.0
//! `lens_intake` is an image intake client built with the Iced GUI framework.
//!
//! An image arrives through one of three paths (file picker, drag and drop,
//! camera capture), is checked against a single acceptance policy, shown in
//! a preview, and submitted to an upload endpoint as a multipart form.
//!
//! # Layers
//!
//! - [`domain`] - Pure types and rules: candidates, the acceptance policy,
//!   verdicts, derived visibility
//! - [`application`] - The intake pipeline and the ports it drives
//! - [`infrastructure`] - Adapters: `FFmpeg` camera, JPEG encoder, HTTP
//!   transport, file loading
//! - [`ui`] and [`app`] - The Iced front end

#![doc(html_root_url = "https://docs.rs/lens_intake/0.1.0")]

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod test_utils;
pub mod ui;
