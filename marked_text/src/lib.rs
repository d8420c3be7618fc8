// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed markup spans over borrowed text.
//!
//! A [`MarkedText`] pairs a block of text with a collection of [`Mark`]s, each
//! attaching a caller-chosen kind to a half-open byte range of that text. The
//! text itself is never modified; rendering walks the marks in priority order
//! and interleaves the text with markup bookends looked up per kind.
//!
//! Two renderers are provided:
//!
//! - [`MarkedText::render_tree`] emits every mark's open and close exactly
//!   once, producing nested tags when the marks nest. Suitable for XML/HTML
//!   shaped output.
//! - [`MarkedText::render_stream`] emits in-band markup that stays correct
//!   when spans overlap: an enclosing span is closed before an inner span
//!   opens and re-announced once the inner span closes. Suitable for
//!   terminal escape sequences and other protocols that cannot represent
//!   overlap structurally.
//!
//! Marks may be inserted in any order, may duplicate one another, and may
//! overlap arbitrarily; emission order is established by the store's
//! priority queues, so the same set of marks always renders to the same
//! bytes.
//!
//! ## Example
//!
//! ```
//! use marked_text::{BookendTable, MarkedText, PlainWriter};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
//! enum Kind {
//!     Em,
//! }
//!
//! struct Tags;
//!
//! impl BookendTable<Kind> for Tags {
//!     fn open(&self, _kind: Kind) -> &[u8] {
//!         b"<em>"
//!     }
//!     fn close(&self, _kind: Kind) -> &[u8] {
//!         b"</em>"
//!     }
//! }
//!
//! let mut marked = MarkedText::new("hello world");
//! marked.find_and_mark(Kind::Em, b"world").unwrap();
//!
//! let mut out = PlainWriter::new(Vec::new());
//! marked.render_tree(&Tags, &mut out).unwrap();
//! assert_eq!(out.into_inner(), b"hello <em>world</em>");
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod html;
mod mark;
mod marked_text;
mod pattern;
mod render;
mod text_storage;
mod writer;

#[cfg(test)]
mod tests;

pub use crate::error::{Error, ErrorKind};
pub use crate::html::HtmlWriter;
pub use crate::mark::{ApplyOrder, EmitOrder, Mark, MarkKind};
pub use crate::marked_text::{BookendTable, MarkedText};
pub use crate::pattern::Pattern;
pub use crate::render::StreamOptions;
pub use crate::text_storage::TextStorage;
pub use crate::writer::{BodyWrite, PlainWriter};
