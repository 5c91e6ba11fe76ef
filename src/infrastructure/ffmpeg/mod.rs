// SPDX-License-Identifier: MPL-2.0
//! `FFmpeg` adapter implementing the [`MediaCapture`] port trait.
//!
//! Cameras are opened through libavdevice (`v4l2` on Linux, `avfoundation`
//! on macOS, `dshow` on Windows). Opening is synchronous and may block on
//! the platform's permission prompt; callers run it on a blocking task.
//!
//! Each open stream owns one worker thread that decodes packets, converts
//! frames to RGBA and publishes them in a single latest-frame slot. Older
//! frames are overwritten, never queued.
//!
//! [`MediaCapture`]: crate::application::port::MediaCapture

use crate::application::port::camera::{CaptureConstraints, FacingMode, LiveStream, MediaCapture};
use crate::domain::error::CaptureError;
use crate::domain::media::VideoFrame;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, Once, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

static FFMPEG_INIT: Once = Once::new();

/// How long `stop_tracks` waits for the worker before detaching it.
const STOP_GRACE: Duration = Duration::from_millis(500);

/// Back-off while a device has no packet ready.
const RETRY_DELAY: Duration = Duration::from_millis(5);

/// Initializes `FFmpeg` and its device layer once per process.
fn init_ffmpeg() -> Result<(), CaptureError> {
    let mut init_result = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(CaptureError::Other(format!(
                "FFmpeg initialization failed: {e}"
            )));
            return;
        }
        ffmpeg_next::device::register_all();

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// Capture backend name and default device for the current platform.
fn platform_backend() -> Option<(&'static str, &'static str)> {
    if cfg!(target_os = "linux") {
        Some(("v4l2", "/dev/video0"))
    } else if cfg!(target_os = "macos") {
        Some(("avfoundation", "0:none"))
    } else if cfg!(target_os = "windows") {
        Some(("dshow", "video=Integrated Camera"))
    } else {
        None
    }
}

/// `FFmpeg`-based camera access.
///
/// Desktop devices report no facing direction, so
/// [`FacingMode`] only picks between the first and second device on
/// platforms that number them; an explicit device always wins.
#[derive(Debug, Clone, Default)]
pub struct FfmpegCapture;

impl FfmpegCapture {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn resolve_device(constraints: &CaptureConstraints, default_device: &str) -> String {
        if let Some(device) = constraints.device.as_deref().filter(|d| !d.trim().is_empty()) {
            return device.to_string();
        }
        match (constraints.facing_mode, default_device) {
            (FacingMode::User, "/dev/video0") => "/dev/video2".to_string(),
            (FacingMode::User, "0:none") => "1:none".to_string(),
            _ => default_device.to_string(),
        }
    }

    fn find_input_format(backend: &str) -> Option<ffmpeg_next::format::Format> {
        ffmpeg_next::device::input::video().find(|format| format.name() == backend)
    }
}

impl MediaCapture for FfmpegCapture {
    fn request_video_stream(
        &self,
        constraints: &CaptureConstraints,
    ) -> Result<Box<dyn LiveStream>, CaptureError> {
        init_ffmpeg()?;

        let (backend, default_device) = platform_backend().ok_or(CaptureError::Unsupported)?;
        let format = Self::find_input_format(backend).ok_or(CaptureError::Unsupported)?;
        let device = Self::resolve_device(constraints, default_device);

        tracing::info!(backend, device = %device, "opening camera");

        let mut options = ffmpeg_next::Dictionary::new();
        options.set("framerate", "30");
        let context = ffmpeg_next::format::open_with(&Path::new(&device), &format, options)
            .map_err(|e| CaptureError::from_message(&format!("{device}: {e}")))?;
        let input = match context {
            ffmpeg_next::format::context::Context::Input(input) => input,
            ffmpeg_next::format::context::Context::Output(_) => {
                return Err(CaptureError::Other(format!(
                    "{device} did not open as an input"
                )))
            }
        };

        let worker_state = WorkerState::new(input)?;
        Ok(Box::new(FfmpegStream::spawn(
            worker_state,
            constraints.frame_interval,
        )?))
    }

    fn is_supported(&self) -> bool {
        if init_ffmpeg().is_err() {
            return false;
        }
        platform_backend()
            .and_then(|(backend, _)| Self::find_input_format(backend))
            .is_some()
    }
}

/// Decoder state moved into the worker thread.
struct WorkerState {
    input: ffmpeg_next::format::context::Input,
    decoder: ffmpeg_next::decoder::Video,
    stream_index: usize,
}

// SAFETY: WorkerState contains FFmpeg types with internal raw pointers.
// It is built on the calling thread and then moved, whole, into exactly one
// worker thread which is the only one to ever touch it.
unsafe impl Send for WorkerState {}

impl WorkerState {
    fn new(input: ffmpeg_next::format::context::Input) -> Result<Self, CaptureError> {
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or_else(|| CaptureError::NotFound("device exposes no video stream".into()))?;
        let stream_index = stream.index();

        let decoder = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())
            .and_then(|context| context.decoder().video())
            .map_err(|e| CaptureError::Other(format!("Failed to create video decoder: {e}")))?;

        Ok(Self {
            input,
            decoder,
            stream_index,
        })
    }

    /// Decodes until `running` is cleared or the device stops producing.
    ///
    /// `running` is checked before every read. Any read error other than
    /// `EAGAIN` (unplugged device, end of stream) ends the loop.
    fn run(mut self, running: &AtomicBool, slot: &Mutex<Option<VideoFrame>>, interval: Duration) {
        let mut scaler: Option<ffmpeg_next::software::scaling::Context> = None;
        let mut decoded = ffmpeg_next::frame::Video::empty();
        let mut last_publish: Option<Instant> = None;
        let mut packet = ffmpeg_next::Packet::empty();

        while running.load(Ordering::Acquire) {
            match packet.read(&mut self.input) {
                Ok(()) => {}
                Err(ffmpeg_next::Error::Other {
                    errno: ffmpeg_next::util::error::EAGAIN,
                }) => {
                    std::thread::sleep(RETRY_DELAY);
                    continue;
                }
                Err(e) => {
                    tracing::info!(error = %e, "camera device stopped producing packets");
                    return;
                }
            }
            if packet.stream() != self.stream_index {
                continue;
            }
            if let Err(e) = self.decoder.send_packet(&packet) {
                tracing::debug!(error = %e, "dropping camera packet");
                continue;
            }

            while self.decoder.receive_frame(&mut decoded).is_ok() {
                if last_publish.is_some_and(|at| at.elapsed() < interval) {
                    continue;
                }
                match convert_frame(&decoded, &mut scaler) {
                    Ok(frame) => {
                        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(frame);
                        last_publish = Some(Instant::now());
                    }
                    Err(e) => tracing::warn!(error = %e, "camera frame conversion failed"),
                }
            }
        }
    }
}

/// Converts a decoded frame to RGBA, reusing the scaler while the input
/// geometry is unchanged.
fn convert_frame(
    decoded: &ffmpeg_next::frame::Video,
    scaler: &mut Option<ffmpeg_next::software::scaling::Context>,
) -> Result<VideoFrame, CaptureError> {
    let (format, width, height) = (decoded.format(), decoded.width(), decoded.height());

    let stale = scaler.as_ref().is_none_or(|s| {
        s.input().format != format || s.input().width != width || s.input().height != height
    });
    if stale {
        *scaler = Some(
            ffmpeg_next::software::scaling::Context::get(
                format,
                width,
                height,
                ffmpeg_next::format::Pixel::RGBA,
                width,
                height,
                ffmpeg_next::software::scaling::Flags::BILINEAR,
            )
            .map_err(|e| CaptureError::Other(format!("Failed to create scaler: {e}")))?,
        );
    }
    let Some(scaler) = scaler.as_mut() else {
        return Err(CaptureError::Other("scaler unavailable".into()));
    };

    let mut rgba = ffmpeg_next::frame::Video::empty();
    scaler
        .run(decoded, &mut rgba)
        .map_err(|e| CaptureError::Other(format!("Scaling failed: {e}")))?;

    VideoFrame::from_rgba(width, height, extract_rgba_data(&rgba))
        .ok_or_else(|| CaptureError::Other(format!("invalid frame geometry {width}x{height}")))
}

/// Copies RGBA rows out of a frame, skipping the stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let row_len = frame.width() as usize * 4;
    let stride = frame.stride(0);
    let data = frame.data(0);

    let mut rgba_bytes = Vec::with_capacity(row_len * frame.height() as usize);
    for row in data.chunks(stride).take(frame.height() as usize) {
        rgba_bytes.extend_from_slice(&row[..row_len]);
    }
    rgba_bytes
}

/// Live camera stream backed by a decoding thread.
pub struct FfmpegStream {
    running: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    slot: Arc<Mutex<Option<VideoFrame>>>,
    worker: Option<JoinHandle<()>>,
    done_rx: Receiver<()>,
}

impl FfmpegStream {
    fn spawn(state: WorkerState, interval: Duration) -> Result<Self, CaptureError> {
        Self::spawn_worker(move |running, slot| state.run(running, slot, interval))
    }

    /// Runs `work` on the capture thread with the shared flags and frame slot.
    fn spawn_worker<F>(work: F) -> Result<Self, CaptureError>
    where
        F: FnOnce(&AtomicBool, &Mutex<Option<VideoFrame>>) + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));
        let finished = Arc::new(AtomicBool::new(false));
        let slot = Arc::new(Mutex::new(None));
        let (done_tx, done_rx) = mpsc::channel();

        let worker = {
            let running = Arc::clone(&running);
            let finished = Arc::clone(&finished);
            let slot = Arc::clone(&slot);
            std::thread::Builder::new()
                .name("camera-capture".into())
                .spawn(move || {
                    work(running.as_ref(), slot.as_ref());
                    finished.store(true, Ordering::Release);
                    // The receiver is gone once the stream detached us.
                    let _ = done_tx.send(());
                })
                .map_err(|e| CaptureError::Other(format!("Failed to spawn capture thread: {e}")))?
        };

        Ok(Self {
            running,
            finished,
            slot,
            worker: Some(worker),
            done_rx,
        })
    }

    /// Joins the worker if it exits within `grace`, otherwise detaches it.
    ///
    /// A detached worker still sees `running == false` and exits after its
    /// current read returns.
    fn release_worker(&mut self, grace: Duration) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        match self.done_rx.recv_timeout(grace) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                if worker.join().is_err() {
                    tracing::error!("camera capture thread panicked");
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(
                    grace_ms = grace.as_millis(),
                    "camera capture thread did not stop in time, detaching it"
                );
            }
        }
    }
}

impl LiveStream for FfmpegStream {
    fn latest_frame(&self) -> Option<VideoFrame> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn stop_tracks(&mut self) {
        self.running.store(false, Ordering::Release);
        self.release_worker(STOP_GRACE);
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    fn is_live(&self) -> bool {
        self.worker.is_some() && !self.finished.load(Ordering::Acquire)
    }
}

impl Drop for FfmpegStream {
    fn drop(&mut self) {
        self.stop_tracks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_device_wins() {
        let constraints = CaptureConstraints {
            device: Some("/dev/video4".into()),
            facing_mode: FacingMode::User,
            ..CaptureConstraints::default()
        };
        assert_eq!(
            FfmpegCapture::resolve_device(&constraints, "/dev/video0"),
            "/dev/video4"
        );
    }

    #[test]
    fn blank_device_falls_back_to_default() {
        let constraints = CaptureConstraints {
            device: Some("  ".into()),
            ..CaptureConstraints::default()
        };
        assert_eq!(
            FfmpegCapture::resolve_device(&constraints, "/dev/video0"),
            "/dev/video0"
        );
    }

    #[test]
    fn user_facing_selects_second_device() {
        let constraints = CaptureConstraints {
            facing_mode: FacingMode::User,
            ..CaptureConstraints::default()
        };
        assert_eq!(FfmpegCapture::resolve_device(&constraints, "0:none"), "1:none");
    }

    #[test]
    fn stop_joins_a_cooperative_worker() {
        let mut stream = FfmpegStream::spawn_worker(|running, slot| {
            *slot.lock().unwrap() = Some(crate::test_utils::sample_frame(2, 2));
            while running.load(Ordering::Acquire) {
                std::thread::sleep(Duration::from_millis(1));
            }
        })
        .unwrap();
        assert!(stream.is_live());

        stream.stop_tracks();

        assert!(!stream.is_live());
        assert!(stream.finished.load(Ordering::Acquire));
        assert!(stream.latest_frame().is_none());
    }

    #[test]
    fn stop_detaches_a_stuck_worker() {
        let mut stream = FfmpegStream::spawn_worker(|_, _| {
            std::thread::sleep(Duration::from_secs(5));
        })
        .unwrap();

        let started = Instant::now();
        stream.release_worker(Duration::from_millis(20));

        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(!stream.is_live());
    }

    #[test]
    fn worker_exit_ends_the_stream() {
        let stream = FfmpegStream::spawn_worker(|_, _| {}).unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while stream.is_live() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(1));
        }

        assert!(!stream.is_live());
    }
}
