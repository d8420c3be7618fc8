// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use std::collections::BinaryHeap;
use std::io;

use crate::mark::{EmitOrder, MarkKind};
use crate::render::{Obelus, next_obelus};
use crate::writer::BodyWrite;
use crate::{BookendTable, MarkedText, TextStorage};

/// Emits every mark with exactly one open and one close, nested when the
/// marks nest.
pub(crate) fn tree<T, K, B, W>(marked: &MarkedText<T, K>, bookends: &B, out: &mut W) -> io::Result<()>
where
    T: Debug + TextStorage,
    K: MarkKind,
    B: BookendTable<K>,
    W: BodyWrite,
{
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
                out.write_markup(bookends.open(m.kind))?;
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
            }
        }
    }
    out.write_text(&bytes[cursor..])
}
