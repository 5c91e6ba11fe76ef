// SPDX-License-Identifier: MPL-2.0
//! Live video frame type.
//!
//! A [`VideoFrame`] is a single decoded RGBA picture coming out of a camera
//! stream. The presentation layer converts it to a framework handle for the
//! live view, and the camera session encodes it when the user captures.

use std::sync::Arc;

/// Decoded RGBA frame at the stream's native dimensions.
///
/// # Example
///
/// ```
/// use lens_intake::domain::media::VideoFrame;
///
/// let frame = VideoFrame::from_rgba(2, 2, vec![0u8; 2 * 2 * 4]).unwrap();
/// assert_eq!(frame.width(), 2);
/// assert_eq!(frame.pixel_count(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct VideoFrame {
    width: u32,
    height: u32,
    /// RGBA pixel data (4 bytes per pixel), shared with the render cache.
    rgba_bytes: Arc<Vec<u8>>,
}

impl VideoFrame {
    /// Creates a frame from shared RGBA data.
    ///
    /// Returns `None` when the buffer length does not match
    /// `width * height * 4` or when a dimension is zero.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_bytes: Arc<Vec<u8>>) -> Option<Self> {
        let expected_len = (width as usize) * (height as usize) * 4;
        if width == 0 || height == 0 || rgba_bytes.len() != expected_len {
            return None;
        }

        Some(Self {
            width,
            height,
            rgba_bytes,
        })
    }

    /// Creates a frame from owned RGBA data.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, rgba_bytes: Vec<u8>) -> Option<Self> {
        Self::new(width, height, Arc::new(rgba_bytes))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA pixel data.
    #[must_use]
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }

    /// Returns the shared RGBA buffer without copying it.
    #[must_use]
    pub fn rgba_bytes_arc(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.rgba_bytes)
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

impl PartialEq for VideoFrame {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width
            && self.height == other.height
            && self.rgba_bytes == other.rgba_bytes
    }
}

impl Eq for VideoFrame {}
