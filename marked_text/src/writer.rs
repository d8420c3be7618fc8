// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io;

/// A byte sink for rendered output, with separate paths for literal text and
/// markup bookends.
///
/// The renderers route the text of the marked string through
/// [`write_text`](Self::write_text) so an adapter can transform it (HTML
/// entity encoding, for example), while bookends always go through
/// [`write_markup`](Self::write_markup) verbatim.
pub trait BodyWrite {
    /// Write markup bookend bytes, always verbatim.
    fn write_markup(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Write literal text bytes, applying the sink's transform if it has one.
    fn write_text(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// The identity [`BodyWrite`]: routes text and markup to the underlying sink
/// unchanged.
#[derive(Debug)]
pub struct PlainWriter<W> {
    inner: W,
}

impl<W: io::Write> PlainWriter<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Unwrap, returning the underlying sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> BodyWrite for PlainWriter<W> {
    fn write_markup(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }

    fn write_text(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }
}
