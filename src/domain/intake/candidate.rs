// SPDX-License-Identifier: MPL-2.0
//! Image candidates produced by the three input paths.
//!
//! A candidate is immutable once built. Its extension is derived from the
//! name at construction time so every consumer sees the same value.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Which input path produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Native open dialog (or a path passed on the command line).
    FilePicker,
    /// File dropped onto the upload box.
    DragDrop,
    /// Still frame taken from the live camera view.
    CameraCapture,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::FilePicker => write!(f, "file-picker"),
            SourceKind::DragDrop => write!(f, "drag-drop"),
            SourceKind::CameraCapture => write!(f, "camera-capture"),
        }
    }
}

/// Unique identifier of a candidate, used to key render caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateId(u64);

impl CandidateId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Locally resolvable reference to a candidate's bytes, for rendering.
#[derive(Debug, Clone)]
pub struct PreviewRef {
    pub id: CandidateId,
    pub bytes: Arc<[u8]>,
}

/// An image awaiting (or having passed) policy evaluation.
///
/// # Example
///
/// ```
/// use lens_intake::domain::intake::{ImageCandidate, SourceKind};
///
/// let candidate = ImageCandidate::new(SourceKind::DragDrop, "Holiday.JPG", vec![0u8; 16]);
/// assert_eq!(candidate.extension(), "jpg");
/// assert_eq!(candidate.byte_size(), 16);
/// assert_eq!(candidate.mime_type(), "image/jpeg");
/// ```
#[derive(Clone)]
pub struct ImageCandidate {
    id: CandidateId,
    source: SourceKind,
    name: String,
    extension: String,
    bytes: Arc<[u8]>,
}

impl ImageCandidate {
    /// Builds a candidate, deriving the lower-cased extension from `name`.
    pub fn new(source: SourceKind, name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            id: CandidateId::next(),
            source,
            name,
            extension,
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CandidateId {
        self.id
    }

    #[must_use]
    pub fn source(&self) -> SourceKind {
        self.source
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased extension, empty when the name has none.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    #[must_use]
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Shared handle to the payload, cloned without copying.
    #[must_use]
    pub fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    #[must_use]
    pub fn preview(&self) -> PreviewRef {
        PreviewRef {
            id: self.id,
            bytes: Arc::clone(&self.bytes),
        }
    }

    /// MIME type announced for this file in the upload form.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self.extension.as_str() {
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for ImageCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageCandidate")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("name", &self.name)
            .field("byte_size", &self.byte_size())
            .finish_non_exhaustive()
    }
}

impl PartialEq for ImageCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ImageCandidate {}

/// Text after the last `.` of `name`, lower-cased; empty when there is none.
#[must_use]
pub fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}
