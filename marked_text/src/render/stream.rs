// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use std::collections::BinaryHeap;
use std::io;

use crate::mark::{EmitOrder, MarkKind};
use crate::render::{Obelus, StreamOptions, next_obelus};
use crate::writer::BodyWrite;
use crate::{BookendTable, MarkedText, TextStorage};

/// Emits in-band markup that stays correct when marks overlap.
///
/// An enclosing mark with visible width is closed before an inner mark
/// opens, and re-announced once the inner mark closes. With
/// `skip_zero_width` set, transitions that would open and close around no
/// text at all are elided: a mark superseded at its own offset is opened
/// silently, and a mark whose re-announcement would end immediately is
/// dropped from the open set without a reopen.
pub(crate) fn stream<T, K, B, W>(
    marked: &MarkedText<T, K>,
    bookends: &B,
    options: StreamOptions,
    out: &mut W,
) -> io::Result<()>
where
    T: Debug + TextStorage,
    K: MarkKind,
    B: BookendTable<K>,
    W: BodyWrite,
{
    let skip = options.skip_zero_width;
    let bytes = marked.text().as_bytes();
    let mut input = marked.apply_queue();
    let mut open: BinaryHeap<EmitOrder<K>> = BinaryHeap::with_capacity(input.len());
    let mut cursor = 0_usize;

    while let Some(obelus) = next_obelus(&input, &open) {
        match obelus {
            Obelus::Open(pos) => {
                out.write_text(&bytes[cursor..pos])?;
                cursor = pos;
                let m = input
                    .pop()
                    .expect("apply queue should hold the mark chosen for opening")
                    .0;
                if let Some(o) = open.peek().map(|o| o.0) {
                    // The enclosing mark covers this point: close it ahead of
                    // the inner open, unless it has no visible width yet.
                    if o.end() as usize > pos && (!skip || (o.offset as usize) < pos) {
                        out.write_markup(bookends.close(o.kind))?;
                    }
                }
                // A same-offset successor supersedes this mark immediately;
                // opening it here would emit a zero-width pair.
                let superseded = skip && input.peek().is_some_and(|next| next.0.offset == m.offset);
                if !superseded {
                    out.write_markup(bookends.open(m.kind))?;
                }
                open.push(EmitOrder(m));
            }
            Obelus::Close(pos) => {
                out.write_text(&bytes[cursor..pos])?;
                cursor = pos;
                let o = open
                    .pop()
                    .expect("open set should hold the mark chosen for closing")
                    .0;
                out.write_markup(bookends.close(o.kind))?;
                if let Some(enclosing) = open.peek().map(|o| o.0) {
                    if skip && enclosing.end() as usize == cursor {
                        // Would close again before any text; drop it quietly.
                        open.pop();
                    } else {
                        out.write_markup(bookends.open(enclosing.kind))?;
                    }
                }
            }
        }
    }
    out.write_text(&bytes[cursor..])
}
