// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter};

use redgraph_ingest::{DecodeError, IngestError, IntegrityError};
use redgraph_store::{RemediationError, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DatasetErrorKind {
    Fetch,
    Decode,
    Integrity,
    Usage,
}

impl DatasetErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fetch => "fetch_error",
            Self::Decode => "decode_error",
            Self::Integrity => "integrity_error",
            Self::Usage => "usage_error",
        }
    }
}

/// Index other than the single graph item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageError {
    pub index: usize,
    pub len: usize,
}

impl Display for UsageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "index {} out of range; the dataset holds {} graph",
            self.index, self.len
        )
    }
}

impl std::error::Error for UsageError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    Fetch(StoreError),
    Decode(DecodeError),
    Integrity(IntegrityError),
    Usage(UsageError),
}

impl DatasetError {
    #[must_use]
    pub const fn kind(&self) -> DatasetErrorKind {
        match self {
            Self::Fetch(_) => DatasetErrorKind::Fetch,
            Self::Decode(_) => DatasetErrorKind::Decode,
            Self::Integrity(_) => DatasetErrorKind::Integrity,
            Self::Usage(_) => DatasetErrorKind::Usage,
        }
    }
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "{}: {e}", self.kind().as_str()),
            Self::Decode(e) => write!(f, "{}: {e}", self.kind().as_str()),
            Self::Integrity(e) => write!(f, "{}: {e}", self.kind().as_str()),
            Self::Usage(e) => write!(f, "{}: {e}", self.kind().as_str()),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Decode(e) => Some(e),
            Self::Integrity(e) => Some(e),
            Self::Usage(e) => Some(e),
        }
    }
}

impl From<IngestError> for DatasetError {
    fn from(value: IngestError) -> Self {
        match value {
            IngestError::Decode(e) => Self::Decode(e),
            IngestError::Integrity(e) => Self::Integrity(e),
        }
    }
}

impl From<RemediationError<IngestError>> for DatasetError {
    fn from(value: RemediationError<IngestError>) -> Self {
        match value {
            RemediationError::Fetch(e) => Self::Fetch(e),
            RemediationError::Attempt(e) => e.into(),
        }
    }
}

impl From<IntegrityError> for DatasetError {
    fn from(value: IntegrityError) -> Self {
        Self::Integrity(value)
    }
}

impl From<StoreError> for DatasetError {
    fn from(value: StoreError) -> Self {
        Self::Fetch(value)
    }
}
