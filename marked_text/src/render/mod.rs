// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The two rendering sweeps.
//!
//! Both sweeps walk a clone of the store's apply queue together with an
//! open-set heap, advancing a cursor over the text from one obelus (a
//! position where a bookend is emitted) to the next. They differ only in
//! what they emit at each obelus: the tree sweep writes each mark's open and
//! close exactly once, while the stream sweep closes and re-announces
//! enclosing marks around inner ones so in-band protocols stay correct
//! under overlap.

mod stream;
mod tree;

pub(crate) use stream::stream;
pub(crate) use tree::tree;

use std::collections::BinaryHeap;

use crate::mark::{ApplyOrder, EmitOrder, MarkKind};

/// Options for [`MarkedText::render_stream_with`].
///
/// [`MarkedText::render_stream_with`]: crate::MarkedText::render_stream_with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOptions {
    /// Suppress zero-width open/close transitions.
    ///
    /// When set, a mark whose open would be immediately superseded by
    /// another mark at the same offset is opened silently, and a mark whose
    /// re-announcement would close again before any text is dropped instead
    /// of being reopened. Defaults to `true`.
    pub skip_zero_width: bool,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            skip_zero_width: true,
        }
    }
}

/// The next position where a bookend is due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Obelus {
    /// Open the top of the apply queue at this position.
    Open(usize),
    /// Close the top of the open set at this position.
    Close(usize),
}

/// Picks the next obelus from the two queues.
///
/// A close is due only when the open set's top ends strictly before the
/// apply queue's top begins; at equal positions the open happens first.
pub(crate) fn next_obelus<K: MarkKind>(
    input: &BinaryHeap<ApplyOrder<K>>,
    open: &BinaryHeap<EmitOrder<K>>,
) -> Option<Obelus> {
    match (input.peek(), open.peek()) {
        (Some(m), Some(o)) if o.0.end() < m.0.offset => Some(Obelus::Close(o.0.end() as usize)),
        (Some(m), _) => Some(Obelus::Open(m.0.offset as usize)),
        (None, Some(o)) => Some(Obelus::Close(o.0.end() as usize)),
        (None, None) => None,
    }
}
