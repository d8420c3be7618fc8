// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark strings with colors and print them to a terminal.
//!
//! Obelizmo builds on [`marked_text`]: you attach typed marks to byte
//! ranges of a borrowed string, map each mark kind to a [`Color`], and a
//! [`LinePrinter`] emits the string one logical line at a time with the
//! right SGR escapes woven in — including closing an inner color and
//! restoring the enclosing one, per style class.
//!
//! ```
//! use obelizmo::{Color, ColorTable, LinePrinter, LineStatus, MarkedText};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
//! enum Token {
//!     Keyword,
//!     Number,
//! }
//!
//! struct Theme;
//!
//! impl ColorTable<Token> for Theme {
//!     fn color(&self, kind: Token) -> Color {
//!         match kind {
//!             Token::Keyword => Color::magenta().bold(),
//!             Token::Number => Color::cyan(),
//!         }
//!     }
//! }
//!
//! let mut marked = MarkedText::new("let x = 42;");
//! marked.find_and_mark(Token::Keyword, b"let").unwrap();
//! marked.find_and_mark(Token::Number, b"42").unwrap();
//!
//! let mut printer = LinePrinter::new(&marked, Theme);
//! let mut line = Vec::new();
//! assert_eq!(printer.print_line(&mut line).unwrap(), LineStatus::Last);
//! assert_eq!(
//!     line,
//!     b"\x1b[35m\x1b[1mlet\x1b[39m\x1b[22m x = \x1b[36m42\x1b[39m;"
//! );
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

pub use marked_text;

mod color;
mod printer;


pub use marked_text::{Mark, MarkedText};

pub use crate::color::{
    BasicColor, Color, ColorValue, Foreground, Resets, StyleClass, TextAttributes,
};
pub use crate::printer::{ColorTable, LinePrinter, LineStatus};
