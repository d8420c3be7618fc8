// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;
use std::collections::BinaryHeap;
use std::io::{self, Write};

use marked_text::{ApplyOrder, EmitOrder, Mark, MarkKind, MarkedText, TextStorage};
use smallvec::SmallVec;

use crate::color::{Color, StyleClass};

/// Terminal colors for the kinds of a [`MarkedText`].
///
/// A table must be total over the kind type; implementations are expected to
/// use an exhaustive `match`, which makes totality a compile-time property.
pub trait ColorTable<K: MarkKind> {
    /// The color rendered for marks of `kind`.
    fn color(&self, kind: K) -> Color;
}

/// The outcome of a [`LinePrinter::print_line`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStatus {
    /// A line was emitted and more may follow.
    More,
    /// The final line was emitted.
    Last,
    /// The text was already exhausted before this call.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    TextBeforeOpen,
    OpenMark,
    TextBeforeClose,
    CloseMark,
    Trailing,
    Done,
}

/// Prints a [`MarkedText`] to a terminal one logical line at a time.
///
/// A logical line ends at `\n`, `\r`, or `\r\n`; the terminator is consumed
/// but never written, so a caller in raw mode can reposition the cursor
/// between [`print_line`](Self::print_line) calls.
///
/// Marks are styled through a [`ColorTable`]. The printer keeps one stack
/// per [`StyleClass`] for foreground, background, and underline colors; when
/// a mark closes, its class stack is popped and the enclosing color of the
/// same class, if any, is switched back on. Stacks persist across lines:
/// each resumed line re-announces the active colors before its first
/// literal byte.
///
/// The printer clones the store's marks when it is created (and on
/// [`reset`](Self::reset)/[`new_text`](Self::new_text)); marks added to the
/// store afterwards are not visible until the next rebind.
#[derive(Debug)]
pub struct LinePrinter<'a, T: Debug + TextStorage, K: MarkKind, C: ColorTable<K>> {
    marked: &'a MarkedText<T, K>,
    colors: C,
    input: BinaryHeap<ApplyOrder<K>>,
    open: BinaryHeap<EmitOrder<K>>,
    pending: Option<Mark<K>>,
    cursor: usize,
    state: State,
    stacks: [SmallVec<[Mark<K>; 4]>; 3],
}

impl<'a, T: Debug + TextStorage, K: MarkKind, C: ColorTable<K>> LinePrinter<'a, T, K, C> {
    /// Create a printer over `marked`, cloning its marks.
    pub fn new(marked: &'a MarkedText<T, K>, colors: C) -> Self {
        let mut printer = Self {
            marked,
            colors,
            input: BinaryHeap::new(),
            open: BinaryHeap::new(),
            pending: None,
            cursor: 0,
            state: State::Start,
            stacks: [SmallVec::new(), SmallVec::new(), SmallVec::new()],
        };
        printer.reset();
        printer
    }

    /// Rewind to the start of the text, re-cloning the store's marks.
    pub fn reset(&mut self) {
        self.input = self.marked.apply_queue();
        self.open.clear();
        self.pending = None;
        self.cursor = 0;
        self.state = State::Start;
        for stack in &mut self.stacks {
            stack.clear();
        }
    }

    /// Rebind the printer to another marked string, retaining stack
    /// capacity.
    pub fn new_text(&mut self, marked: &'a MarkedText<T, K>) {
        self.marked = marked;
        self.reset();
    }

    /// Emit the next logical line.
    ///
    /// Returns [`LineStatus::More`] after consuming a line terminator while
    /// text remains, [`LineStatus::Last`] on the call that completes the
    /// final line, and [`LineStatus::Done`] on every call after that.
    pub fn print_line<W: Write>(&mut self, out: &mut W) -> io::Result<LineStatus> {
        if self.state == State::Done {
            return Ok(LineStatus::Done);
        }
        if self.state != State::Start {
            // Colors spanning a line break continue on the resumed line.
            for stack in &self.stacks {
                if let Some(top) = stack.last() {
                    self.colors.color(top.kind).write_on(out)?;
                }
            }
        }
        loop {
            match self.state {
                State::Start => {
                    self.pending = self.input.pop().map(|m| m.0);
                    self.state = self.next_state();
                }
                State::TextBeforeOpen => {
                    let limit = self
                        .pending
                        .expect("a pending mark precedes text-before-open")
                        .offset as usize;
                    if self.write_line_until(out, limit)? {
                        return Ok(LineStatus::More);
                    }
                    self.state = State::OpenMark;
                }
                State::OpenMark => {
                    let m = self
                        .pending
                        .take()
                        .expect("a pending mark precedes its open");
                    let color = self.colors.color(m.kind);
                    color.write_on(out)?;
                    if let Some(i) = stack_index(color.class()) {
                        self.stacks[i].push(m);
                    }
                    self.open.push(EmitOrder(m));
                    self.pending = self.input.pop().map(|m| m.0);
                    self.state = self.next_state();
                }
                State::TextBeforeClose => {
                    let limit = self
                        .open
                        .peek()
                        .expect("an open mark precedes text-before-close")
                        .0
                        .end() as usize;
                    if self.write_line_until(out, limit)? {
                        return Ok(LineStatus::More);
                    }
                    self.state = State::CloseMark;
                }
                State::CloseMark => {
                    let closing = self
                        .open
                        .pop()
                        .expect("an open mark precedes its close")
                        .0;
                    let color = self.colors.color(closing.kind);
                    color.write_off(out)?;
                    if let Some(i) = stack_index(color.class()) {
                        let enclosing = {
                            let stack = &mut self.stacks[i];
                            // The ordering guarantees an inner mark of a class
                            // sits above its enclosing mark of the same class.
                            if let Some(pos) = stack.iter().rposition(|m| *m == closing) {
                                stack.remove(pos);
                            }
                            stack.last().copied()
                        };
                        if let Some(top) = enclosing {
                            self.colors.color(top.kind).write_on(out)?;
                        }
                    }
                    self.state = self.next_state();
                }
                State::Trailing => {
                    let limit = self.marked.len();
                    if self.write_line_until(out, limit)? {
                        return Ok(LineStatus::More);
                    }
                    self.state = State::Done;
                    return Ok(LineStatus::Last);
                }
                State::Done => unreachable!("the done state returns before the loop"),
            }
        }
    }

    fn next_state(&self) -> State {
        match (self.pending, self.open.peek()) {
            (Some(m), Some(o)) if o.0.end() < m.offset => State::TextBeforeClose,
            (Some(_), _) => State::TextBeforeOpen,
            (None, Some(_)) => State::TextBeforeClose,
            (None, None) => State::Trailing,
        }
    }

    /// Writes text from the cursor up to `limit`, stopping early if a line
    /// terminator is consumed. Returns whether a terminator was consumed.
    fn write_line_until<W: Write>(&mut self, out: &mut W, limit: usize) -> io::Result<bool> {
        let bytes = self.marked.text().as_bytes();
        if self.cursor >= limit {
            // A `\r\n` pair consumed earlier may have carried the cursor past
            // this segment's limit; there is nothing left to write here.
            return Ok(false);
        }
        let slice = &bytes[self.cursor..limit];
        match slice.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(i) => {
                out.write_all(&slice[..i])?;
                let mut consumed = self.cursor + i + 1;
                // The pair is one terminator even when a mark boundary lands
                // on the `\n`.
                if slice[i] == b'\r' && bytes.get(consumed) == Some(&b'\n') {
                    consumed += 1;
                }
                self.cursor = consumed;
                Ok(true)
            }
            None => {
                out.write_all(slice)?;
                self.cursor = limit;
                Ok(false)
            }
        }
    }
}

fn stack_index(class: StyleClass) -> Option<usize> {
    match class {
        StyleClass::Foreground => Some(0),
        StyleClass::Background => Some(1),
        StyleClass::Underline => Some(2),
        StyleClass::Style => None,
    }
}
