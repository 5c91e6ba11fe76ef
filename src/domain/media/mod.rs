// SPDX-License-Identifier: MPL-2.0
//! Media domain types.
//!
//! This module contains pixel data types that are independent of any
//! presentation or infrastructure concerns.

pub mod frame;

pub use frame::VideoFrame;
