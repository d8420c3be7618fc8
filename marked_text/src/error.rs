// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error type for mark insertion.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the attempted region and the
/// text length at the time of failure, so callers can report exactly which
/// boundary was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The start byte index of the caller-provided region.
    start: usize,

    /// The end byte index (exclusive) of the caller-provided region.
    end: usize,

    /// The length in bytes of the underlying text at the time of failure.
    len: usize,
}

#[expect(
    clippy::len_without_is_empty,
    reason = "`Error::len` reports source text length context; an `is_empty` method would be misleading and unused."
)]
impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The start byte index of the region provided by the caller.
    pub fn start(&self) -> usize {
        self.start
    }

    /// The end byte index of the region provided by the caller.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The length in bytes of the underlying text at the time of the error.
    pub fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn invalid_region(start: usize, end: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRegion,
            start,
            end,
            len,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            ErrorKind::InvalidRegion => {
                if self.start > self.end {
                    write!(
                        f,
                        "invalid region {}..{}: start > end",
                        self.start, self.end
                    )
                } else {
                    write!(
                        f,
                        "region {}..{} out of bounds for len {}",
                        self.start, self.end, self.len
                    )
                }
            }
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Region boundaries were reversed, exceeded the text length, or
    /// overflowed the `u32` offset space.
    InvalidRegion,
}
