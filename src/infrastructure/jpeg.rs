// SPDX-License-Identifier: MPL-2.0
//! JPEG encoding of captured frames.

use crate::application::port::camera::FrameEncoder;
use crate::domain::error::CaptureError;
use crate::domain::media::VideoFrame;
use image_rs::codecs::jpeg::JpegEncoder as JpegCodec;
use image_rs::{DynamicImage, RgbaImage};

/// Default quality used for captured stills.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// [`FrameEncoder`] producing baseline JPEG at native frame dimensions.
#[derive(Debug, Clone, Copy)]
pub struct JpegEncoder {
    quality: u8,
}

impl Default for JpegEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl JpegEncoder {
    /// Creates an encoder; `quality` is clamped to `1..=100`.
    #[must_use]
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    #[must_use]
    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl FrameEncoder for JpegEncoder {
    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn encode(&self, frame: &VideoFrame) -> Result<Vec<u8>, CaptureError> {
        let rgba = RgbaImage::from_raw(frame.width(), frame.height(), frame.rgba_bytes().to_vec())
            .ok_or_else(|| CaptureError::Encoding("frame buffer does not match its dimensions".into()))?;
        // JPEG carries no alpha channel.
        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut bytes = Vec::new();
        rgb.write_with_encoder(JpegCodec::new_with_quality(&mut bytes, self.quality))
            .map_err(|e| CaptureError::Encoding(e.to_string()))?;
        Ok(bytes)
    }
}
