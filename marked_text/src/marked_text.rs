// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use core::ops::Range;
use std::collections::BinaryHeap;
use std::io;

use crate::mark::{ApplyOrder, Mark, MarkKind};
use crate::pattern::Pattern;
use crate::render::{self, StreamOptions};
use crate::writer::BodyWrite;
use crate::{Error, TextStorage};

/// Markup bookends for the kinds of a [`MarkedText`].
///
/// A table must be total over the kind type. Implementations are expected to
/// use an exhaustive `match`, which makes totality a compile-time property.
pub trait BookendTable<K: MarkKind> {
    /// The bytes written when a mark of `kind` opens.
    fn open(&self, kind: K) -> &[u8];

    /// The bytes written when a mark of `kind` closes.
    fn close(&self, kind: K) -> &[u8];
}

/// A block of text with typed marks applied to byte ranges within it.
///
/// The store accepts marks in any order and keeps them in a priority heap
/// whose pop order is the apply order used by the renderers. Rendering
/// operates on a clone of the heap, so a `MarkedText` can be rendered any
/// number of times and can keep accumulating marks between renders.
///
/// Duplicate and overlapping marks are allowed; nothing is deduplicated.
#[derive(Clone, Debug)]
pub struct MarkedText<T: Debug + TextStorage, K: MarkKind> {
    text: T,
    marks: BinaryHeap<ApplyOrder<K>>,
}

impl<T: Debug + TextStorage, K: MarkKind> MarkedText<T, K> {
    /// Create a `MarkedText` with no marks applied.
    pub fn new(text: T) -> Self {
        Self {
            text,
            marks: BinaryHeap::new(),
        }
    }

    /// Create a `MarkedText` with room for `capacity` marks.
    pub fn with_capacity(text: T, capacity: usize) -> Self {
        Self {
            text,
            marks: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Borrow the underlying text storage.
    pub fn text(&self) -> &T {
        &self.text
    }

    /// Replaces the underlying text and clears all applied marks.
    ///
    /// This retains the heap's allocation so the same `MarkedText` value can
    /// be reused across rebuilds.
    #[inline]
    pub fn set_text(&mut self, text: T) {
        self.text = text;
        self.marks.clear();
    }

    /// Returns the length of the underlying text, in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns `true` if the underlying text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the number of marks applied to the text.
    pub fn marks_len(&self) -> usize {
        self.marks.len()
    }

    /// Remove all applied marks.
    pub fn clear_marks(&mut self) {
        self.marks.clear();
    }

    /// Clone the mark heap as a top-down apply queue.
    ///
    /// Popping the returned heap yields marks in apply order: ascending
    /// offset, longer spans first, ascending kind. The store itself is
    /// unaffected.
    pub fn apply_queue(&self) -> BinaryHeap<ApplyOrder<K>> {
        self.marks.clone()
    }

    /// Apply a mark of `kind` to the byte region `range`.
    ///
    /// Fails with [`ErrorKind::InvalidRegion`] if the range is reversed or
    /// extends past the end of the text.
    ///
    /// [`ErrorKind::InvalidRegion`]: crate::ErrorKind::InvalidRegion
    pub fn mark_slice(&mut self, kind: K, range: Range<usize>) -> Result<(), Error> {
        validate_region(&self.text, &range)?;
        self.marks.push(ApplyOrder(to_mark(kind, range)));
        Ok(())
    }

    /// Apply a mark of `kind` covering `len` bytes starting at `offset`.
    ///
    /// Fails with [`ErrorKind::InvalidRegion`] if `offset + len` overflows
    /// `u32` or extends past the end of the text.
    ///
    /// [`ErrorKind::InvalidRegion`]: crate::ErrorKind::InvalidRegion
    pub fn mark_from(&mut self, kind: K, offset: u32, len: u32) -> Result<(), Error> {
        let end = offset.checked_add(len).ok_or_else(|| {
            Error::invalid_region(
                offset as usize,
                (offset as usize).saturating_add(len as usize),
                self.text.len(),
            )
        })?;
        if end as usize > self.text.len() {
            return Err(Error::invalid_region(
                offset as usize,
                end as usize,
                self.text.len(),
            ));
        }
        self.marks.push(ApplyOrder(Mark { kind, offset, len }));
        Ok(())
    }

    /// Mark the first occurrence of `needle` in the text.
    ///
    /// Returns the byte index of the occurrence, or `None` if the needle
    /// does not occur.
    pub fn find_and_mark(&mut self, kind: K, needle: &[u8]) -> Option<usize> {
        self.find_and_mark_pos(kind, needle, 0)
    }

    /// Mark the first occurrence of `needle` at or after `from`.
    pub fn find_and_mark_pos(&mut self, kind: K, needle: &[u8], from: usize) -> Option<usize> {
        let tail = self.text.as_bytes().get(from..)?;
        let start = from + find_bytes(tail, needle)?;
        self.marks
            .push(ApplyOrder(to_mark(kind, start..start + needle.len())));
        Some(start)
    }

    /// Mark the last occurrence of `needle` in the text.
    pub fn find_and_mark_last(&mut self, kind: K, needle: &[u8]) -> Option<usize> {
        let start = rfind_bytes(self.text.as_bytes(), needle)?;
        self.marks
            .push(ApplyOrder(to_mark(kind, start..start + needle.len())));
        Some(start)
    }

    /// Mark the first match of `pattern` in the text.
    ///
    /// Returns the byte index of the match, or `None` if nothing matches.
    pub fn match_and_mark<P: Pattern>(&mut self, kind: K, pattern: &P) -> Option<usize> {
        let range = pattern.find(self.text.as_bytes())?;
        let start = range.start;
        self.marks.push(ApplyOrder(to_mark(kind, range)));
        Some(start)
    }

    /// Mark the first match of `pattern` beginning at or after `from`.
    pub fn match_and_mark_pos<P: Pattern>(
        &mut self,
        kind: K,
        pattern: &P,
        from: usize,
    ) -> Option<usize> {
        let range = pattern.find_at(self.text.as_bytes(), from)?;
        let start = range.start;
        self.marks.push(ApplyOrder(to_mark(kind, range)));
        Some(start)
    }

    /// Mark every non-overlapping match of `pattern` in the text.
    ///
    /// Returns `true` if at least one match was marked.
    pub fn match_and_mark_all<P: Pattern>(&mut self, kind: K, pattern: &P) -> bool {
        let marks = &mut self.marks;
        let mut any = false;
        for range in pattern.find_iter(self.text.as_bytes()) {
            marks.push(ApplyOrder(to_mark(kind, range)));
            any = true;
        }
        any
    }

    /// Render the marked text as nested tags.
    ///
    /// Every mark contributes exactly one open and one close. When the marks
    /// properly nest (for every pair, one contains the other or they are
    /// disjoint), the output is a well-nested tag sequence. Overlapping
    /// marks still produce balanced opens and closes, but the caller is
    /// responsible for supplying properly-nesting marks when the output
    /// format requires well-formed nesting.
    ///
    /// Literal text is routed through [`BodyWrite::write_text`]; bookends
    /// are always written raw.
    pub fn render_tree<B, W>(&self, bookends: &B, out: &mut W) -> io::Result<()>
    where
        B: BookendTable<K>,
        W: BodyWrite,
    {
        render::tree(self, bookends, out)
    }

    /// Render the marked text as in-band markup, overlap-correct.
    ///
    /// Equivalent to [`render_stream_with`] with default [`StreamOptions`]
    /// (zero-width transitions skipped).
    ///
    /// [`render_stream_with`]: Self::render_stream_with
    pub fn render_stream<B, W>(&self, bookends: &B, out: &mut W) -> io::Result<()>
    where
        B: BookendTable<K>,
        W: BodyWrite,
    {
        render::stream(self, bookends, StreamOptions::default(), out)
    }

    /// Render the marked text as in-band markup with explicit options.
    ///
    /// Whenever an inner span closes, the enclosing span is re-announced, so
    /// protocols that cannot represent overlap (terminal escapes, for
    /// example) still attach the correct markup to every byte.
    pub fn render_stream_with<B, W>(
        &self,
        bookends: &B,
        options: StreamOptions,
        out: &mut W,
    ) -> io::Result<()>
    where
        B: BookendTable<K>,
        W: BodyWrite,
    {
        render::stream(self, bookends, options, out)
    }
}

fn validate_region<T: TextStorage>(text: &T, range: &Range<usize>) -> Result<(), Error> {
    let len = text.len();
    if range.start > range.end || range.end > len || u32::try_from(range.end).is_err() {
        return Err(Error::invalid_region(range.start, range.end, len));
    }
    Ok(())
}

fn to_mark<K: MarkKind>(kind: K, range: Range<usize>) -> Mark<K> {
    let offset = u32::try_from(range.start).expect("mark offset should fit in u32");
    let len = u32::try_from(range.end - range.start).expect("mark length should fit in u32");
    Mark { kind, offset, len }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(haystack.len());
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}
