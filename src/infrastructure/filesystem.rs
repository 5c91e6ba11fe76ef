// SPDX-License-Identifier: MPL-2.0
//! Reading candidates from local files.

use crate::domain::intake::{ImageCandidate, SourceKind};
use crate::error::{Error, Result};
use std::path::Path;

/// Reads `path` into a candidate named after its file name.
///
/// No validation happens here; the caller routes the candidate through the
/// acceptance policy.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn load_candidate(path: &Path, source: SourceKind) -> Result<ImageCandidate> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    Ok(ImageCandidate::new(source, display_name(path), bytes))
}

/// File name component of `path`, falling back to the whole path.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
        .into_owned()
}
