// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-module rendering tests.
//!
//! The reference renderer here intentionally uses the simplest possible
//! algorithm (a sorted vector and an explicit stack, no priority queues) and
//! only supports properly-nesting marks. It exists to assert that the heap
//! orderings driving the production sweeps preserve the same semantics.

use core::ops::Range;
use std::io;

use crate::{BodyWrite, BookendTable, HtmlWriter, MarkKind, MarkedText, PlainWriter, StreamOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Palette {
    Red,
    Teal,
    Green,
    Yellow,
    Blue,
}

struct PaletteTags;

impl BookendTable<Palette> for PaletteTags {
    fn open(&self, kind: Palette) -> &[u8] {
        match kind {
            Palette::Red => b"<r>",
            Palette::Teal => b"<t>",
            Palette::Green => b"<g>",
            Palette::Yellow => b"<y>",
            Palette::Blue => b"<b>",
        }
    }

    fn close(&self, kind: Palette) -> &[u8] {
        match kind {
            Palette::Red => b"</r>",
            Palette::Teal => b"</t>",
            Palette::Green => b"</g>",
            Palette::Yellow => b"</y>",
            Palette::Blue => b"</b>",
        }
    }
}

/// What a render wrote, split into the two bookkeeping streams.
#[derive(Debug, Default)]
struct Recorder {
    chunks: Vec<(bool, Vec<u8>)>,
}

impl Recorder {
    fn text(&self) -> Vec<u8> {
        self.chunks
            .iter()
            .filter(|(markup, _)| !markup)
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }

    fn markup(&self) -> Vec<&[u8]> {
        self.chunks
            .iter()
            .filter(|(markup, _)| *markup)
            .map(|(_, bytes)| bytes.as_slice())
            .collect()
    }
}

impl BodyWrite for Recorder {
    fn write_markup(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.chunks.push((true, bytes.to_vec()));
        Ok(())
    }

    fn write_text(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.chunks.push((false, bytes.to_vec()));
        Ok(())
    }
}

fn marked_with<'t>(
    text: &'t str,
    marks: &[(Palette, Range<usize>)],
) -> MarkedText<&'t str, Palette> {
    let mut marked = MarkedText::new(text);
    for (kind, range) in marks {
        marked.mark_slice(*kind, range.clone()).unwrap();
    }
    marked
}

fn tree_bytes<K: MarkKind, B: BookendTable<K>>(
    marked: &MarkedText<&str, K>,
    table: &B,
) -> Vec<u8> {
    let mut out = PlainWriter::new(Vec::new());
    marked.render_tree(table, &mut out).unwrap();
    out.into_inner()
}

fn stream_bytes<K: MarkKind, B: BookendTable<K>>(
    marked: &MarkedText<&str, K>,
    table: &B,
) -> Vec<u8> {
    let mut out = PlainWriter::new(Vec::new());
    marked.render_stream(table, &mut out).unwrap();
    out.into_inner()
}

const SHARED_OFFSET_TEXT: &str = "red blue green yellow";

fn shared_offset_marks() -> Vec<(Palette, Range<usize>)> {
    vec![
        (Palette::Red, 0..3),
        (Palette::Teal, 4..14),
        (Palette::Green, 9..14),
        (Palette::Yellow, 15..21),
        (Palette::Blue, 4..8),
    ]
}

#[test]
fn nested_marks_stream() {
    let marked = marked_with(SHARED_OFFSET_TEXT, &shared_offset_marks());
    assert_eq!(
        stream_bytes(&marked, &PaletteTags),
        b"<r>red</r> <b>blue</b><t> </t><g>green</g> <y>yellow</y>"
    );
}

#[test]
fn nested_marks_tree() {
    let marked = marked_with(SHARED_OFFSET_TEXT, &shared_offset_marks());
    assert_eq!(
        tree_bytes(&marked, &PaletteTags),
        b"<r>red</r> <t><b>blue</b> <g>green</g></t> <y>yellow</y>"
    );
}

const OVERLAP_TEXT: &str = "func 10 funky 456";

fn overlap_marks() -> Vec<(Palette, Range<usize>)> {
    vec![
        (Palette::Red, 0..4),
        (Palette::Blue, 5..7),
        (Palette::Red, 8..13),
        (Palette::Yellow, 9..10),
        (Palette::Blue, 14..17),
    ]
}

#[test]
fn inner_close_reannounces_enclosing_stream() {
    let marked = marked_with(OVERLAP_TEXT, &overlap_marks());
    assert_eq!(
        stream_bytes(&marked, &PaletteTags),
        b"<r>func</r> <b>10</b> <r>f</r><y>u</y><r>nky</r> <b>456</b>"
    );
}

#[test]
fn inner_close_stays_nested_in_tree() {
    let marked = marked_with(OVERLAP_TEXT, &overlap_marks());
    assert_eq!(
        tree_bytes(&marked, &PaletteTags),
        b"<r>func</r> <b>10</b> <r>f<y>u</y>nky</r> <b>456</b>"
    );
}

#[test]
fn identical_ranges_suppress_zero_width_open() {
    let marked = marked_with("width", &[(Palette::Red, 0..5), (Palette::Teal, 0..5)]);
    // The superseded outer open and its matching close are both elided.
    assert_eq!(stream_bytes(&marked, &PaletteTags), b"<t>width</t>");
}

#[test]
fn identical_ranges_emit_both_opens_without_skip() {
    let marked = marked_with("width", &[(Palette::Red, 0..5), (Palette::Teal, 0..5)]);
    let mut out = PlainWriter::new(Vec::new());
    marked
        .render_stream_with(
            &PaletteTags,
            StreamOptions {
                skip_zero_width: false,
            },
            &mut out,
        )
        .unwrap();
    assert_eq!(out.into_inner(), b"<r></r><t>width</t><r></r>");
}

fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            out.push(tail);
        }
    }
    out
}

#[test]
fn insertion_order_does_not_affect_output() {
    let baseline = marked_with(SHARED_OFFSET_TEXT, &shared_offset_marks());
    let expected_stream = stream_bytes(&baseline, &PaletteTags);
    let expected_tree = tree_bytes(&baseline, &PaletteTags);

    for permutation in permutations(&shared_offset_marks()) {
        let marked = marked_with(SHARED_OFFSET_TEXT, &permutation);
        assert_eq!(stream_bytes(&marked, &PaletteTags), expected_stream);
        assert_eq!(tree_bytes(&marked, &PaletteTags), expected_tree);
    }
}

#[test]
fn tree_emission_is_balanced_per_mark() {
    let marked = marked_with(OVERLAP_TEXT, &overlap_marks());
    let mut recorder = Recorder::default();
    marked.render_tree(&PaletteTags, &mut recorder).unwrap();

    let markup = recorder.markup();
    assert_eq!(markup.len(), 2 * marked.marks_len());
    for kind in [Palette::Red, Palette::Blue, Palette::Yellow] {
        let opens = markup
            .iter()
            .filter(|m| **m == PaletteTags.open(kind))
            .count();
        let closes = markup
            .iter()
            .filter(|m| **m == PaletteTags.close(kind))
            .count();
        assert_eq!(opens, closes, "kind {kind:?} must balance");

        // Every close must be preceded by a matching open.
        let mut depth = 0_i32;
        for m in &markup {
            if *m == PaletteTags.open(kind) {
                depth += 1;
            } else if *m == PaletteTags.close(kind) {
                depth -= 1;
            }
            assert!(depth >= 0, "close before open for kind {kind:?}");
        }
    }
}

#[test]
fn stream_emission_is_balanced_without_skip() {
    for (text, marks) in [
        (SHARED_OFFSET_TEXT, shared_offset_marks()),
        (OVERLAP_TEXT, overlap_marks()),
    ] {
        let marked = marked_with(text, &marks);
        let mut recorder = Recorder::default();
        marked
            .render_stream_with(
                &PaletteTags,
                StreamOptions {
                    skip_zero_width: false,
                },
                &mut recorder,
            )
            .unwrap();
        let markup = recorder.markup();
        let opens = markup.iter().filter(|m| !m.starts_with(b"</")).count();
        let closes = markup.iter().filter(|m| m.starts_with(b"</")).count();
        assert_eq!(opens, closes);
    }
}

#[test]
fn literal_text_is_covered_exactly_once() {
    let marked = marked_with(OVERLAP_TEXT, &overlap_marks());

    let mut recorder = Recorder::default();
    marked.render_tree(&PaletteTags, &mut recorder).unwrap();
    assert_eq!(recorder.text(), OVERLAP_TEXT.as_bytes());

    for skip_zero_width in [true, false] {
        let mut streamed = Recorder::default();
        marked
            .render_stream_with(&PaletteTags, StreamOptions { skip_zero_width }, &mut streamed)
            .unwrap();
        assert_eq!(streamed.text(), OVERLAP_TEXT.as_bytes());
    }
}

#[test]
fn rendering_is_idempotent_and_preserves_the_store() {
    let marked = marked_with(SHARED_OFFSET_TEXT, &shared_offset_marks());
    let before = marked.marks_len();

    let first = stream_bytes(&marked, &PaletteTags);
    let second = stream_bytes(&marked, &PaletteTags);
    assert_eq!(first, second);

    let first = tree_bytes(&marked, &PaletteTags);
    let second = tree_bytes(&marked, &PaletteTags);
    assert_eq!(first, second);

    assert_eq!(marked.marks_len(), before);
}

/// Stack-based reference rendering for properly-nesting marks.
fn reference_tree(
    text: &[u8],
    marks: &[(Palette, Range<usize>)],
    table: &PaletteTags,
) -> Vec<u8> {
    let mut sorted = marks.to_vec();
    sorted.sort_by(|a, b| {
        a.1.start
            .cmp(&b.1.start)
            .then(b.1.end.cmp(&a.1.end))
            .then(a.0.cmp(&b.0))
    });

    let mut out = Vec::new();
    let mut stack: Vec<(Palette, usize)> = Vec::new();
    let mut cursor = 0_usize;
    for (kind, range) in sorted {
        while let Some(&(top, end)) = stack.last() {
            if end > range.start {
                break;
            }
            out.extend_from_slice(&text[cursor..end]);
            cursor = end;
            out.extend_from_slice(table.close(top));
            stack.pop();
        }
        out.extend_from_slice(&text[cursor..range.start]);
        cursor = range.start;
        out.extend_from_slice(table.open(kind));
        stack.push((kind, range.end));
    }
    while let Some((top, end)) = stack.pop() {
        out.extend_from_slice(&text[cursor..end]);
        cursor = end;
        out.extend_from_slice(table.close(top));
    }
    out.extend_from_slice(&text[cursor..]);
    out
}

#[test]
fn tree_sweep_matches_reference_for_nesting_marks() {
    let cases: &[(&str, Vec<(Palette, Range<usize>)>)] = &[
        (SHARED_OFFSET_TEXT, shared_offset_marks()),
        ("nested spans here", vec![
            (Palette::Red, 0..17),
            (Palette::Teal, 0..6),
            (Palette::Green, 7..12),
            (Palette::Blue, 7..12),
            (Palette::Yellow, 13..17),
        ]),
        ("plain", vec![]),
        ("edges", vec![(Palette::Red, 0..0), (Palette::Teal, 5..5)]),
    ];
    for (text, marks) in cases {
        let marked = marked_with(text, marks.as_slice());
        assert_eq!(
            tree_bytes(&marked, &PaletteTags),
            reference_tree(text.as_bytes(), marks, &PaletteTags),
            "text {text:?}"
        );
    }
}

#[test]
fn apply_queue_clone_leaves_the_store_intact() {
    let marked = marked_with(SHARED_OFFSET_TEXT, &shared_offset_marks());
    let mut queue = marked.apply_queue();
    while queue.pop().is_some() {}
    assert_eq!(marked.marks_len(), shared_offset_marks().len());
}

#[test]
fn tree_output_is_well_nested_for_nesting_marks() {
    let marked = marked_with(SHARED_OFFSET_TEXT, &shared_offset_marks());
    let mut recorder = Recorder::default();
    marked.render_tree(&PaletteTags, &mut recorder).unwrap();

    let mut stack = Vec::new();
    for chunk in recorder.markup() {
        if let Some(rest) = chunk.strip_prefix(b"</") {
            let name = &rest[..rest.len() - 1];
            assert_eq!(stack.pop().as_deref(), Some(name), "mismatched close");
        } else {
            stack.push(chunk[1..chunk.len() - 1].to_vec());
        }
    }
    assert!(stack.is_empty(), "unclosed tags remain");
}

#[test]
fn zero_length_marks_render_adjacent_bookends() {
    let marked = marked_with("abc", &[(Palette::Red, 1..1)]);
    assert_eq!(tree_bytes(&marked, &PaletteTags), b"a<r></r>bc");
}

#[test]
fn no_marks_renders_text_verbatim() {
    let marked: MarkedText<&str, Palette> = MarkedText::new("just text");
    assert_eq!(tree_bytes(&marked, &PaletteTags), b"just text");
    assert_eq!(stream_bytes(&marked, &PaletteTags), b"just text");
}

#[test]
fn html_writer_escapes_text_but_not_bookends() {
    let mut marked = MarkedText::new("1 < 2 & 3");
    marked.mark_slice(Palette::Red, 4..5).unwrap();

    let mut out = HtmlWriter::new(Vec::new());
    marked.render_tree(&PaletteTags, &mut out).unwrap();
    assert_eq!(out.into_inner(), b"1 &lt; <r>2</r> &amp; 3");
}

#[cfg(feature = "regex")]
#[test]
fn match_and_mark_all_feeds_the_renderer() {
    let mut marked = MarkedText::new("func 10 funky 456");
    let digits = regex::bytes::Regex::new(r"[0-9]+").unwrap();
    assert!(marked.match_and_mark_all(Palette::Blue, &digits));
    assert_eq!(marked.find_and_mark(Palette::Red, b"func"), Some(0));

    assert_eq!(
        stream_bytes(&marked, &PaletteTags),
        b"<r>func</r> <b>10</b> funky <b>456</b>"
    );
}
