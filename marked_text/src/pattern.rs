// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

/// The minimal regex capability consumed by the match-and-mark helpers.
///
/// Matches are half-open byte ranges into the haystack. The crate's `regex`
/// feature (on by default) implements this for [`regex::bytes::Regex`]; any
/// other matcher with the same three operations works as well.
pub trait Pattern {
    /// The first match in `haystack`.
    fn find(&self, haystack: &[u8]) -> Option<Range<usize>>;

    /// The first match beginning at or after `start`.
    fn find_at(&self, haystack: &[u8], start: usize) -> Option<Range<usize>>;

    /// All non-overlapping matches, earliest first.
    fn find_iter(&self, haystack: &[u8]) -> impl Iterator<Item = Range<usize>>;
}

#[cfg(feature = "regex")]
#[cfg_attr(docsrs, doc(cfg(feature = "regex")))]
impl Pattern for regex::bytes::Regex {
    fn find(&self, haystack: &[u8]) -> Option<Range<usize>> {
        regex::bytes::Regex::find(self, haystack).map(|m| m.range())
    }

    fn find_at(&self, haystack: &[u8], start: usize) -> Option<Range<usize>> {
        if start > haystack.len() {
            return None;
        }
        regex::bytes::Regex::find_at(self, haystack, start).map(|m| m.range())
    }

    fn find_iter(&self, haystack: &[u8]) -> impl Iterator<Item = Range<usize>> {
        regex::bytes::Regex::find_iter(self, haystack).map(|m| m.range())
    }
}
