// SPDX-License-Identifier: MPL-2.0
//! Image intake domain: candidates, the acceptance policy and its verdicts,
//! and the derived visibility of the two preview surfaces.

pub mod candidate;
pub mod policy;
pub mod verdict;
pub mod visibility;

pub use candidate::{CandidateId, ImageCandidate, PreviewRef, SourceKind};
pub use policy::{
    AcceptancePolicy, ADVERTISED_LIMIT_LABEL, ALLOWED_EXTENSIONS, MAX_UPLOAD_BYTES,
};
pub use verdict::{format_megabytes, AcceptanceVerdict, Rejection};
pub use visibility::UiVisibility;
