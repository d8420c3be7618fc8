// Copyright 2026 the Obelizmo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::io::{self, Write};

/// The part of the terminal state a [`Color`] occupies.
///
/// The line printer keeps one stack per class for the first three variants;
/// [`StyleClass::Style`] colors have independent off-sequences and are not
/// stacked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleClass {
    /// Text color and attributes.
    Foreground,
    /// Cell background color.
    Background,
    /// Underline shape and color.
    Underline,
    /// Everything else (inverse, invisible, resets).
    Style,
}

/// One of the eight basic terminal colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BasicColor {
    /// SGR color 0.
    Black,
    /// SGR color 1.
    Red,
    /// SGR color 2.
    Green,
    /// SGR color 3.
    Yellow,
    /// SGR color 4.
    Blue,
    /// SGR color 5.
    Magenta,
    /// SGR color 6.
    Cyan,
    /// SGR color 7.
    White,
}

impl BasicColor {
    fn index(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
        }
    }
}

/// A color value for a foreground, background, or underline slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorValue {
    /// The terminal's default color for the slot.
    #[default]
    Default,
    /// A basic 3-/4-bit color.
    Basic(BasicColor),
    /// An index into the 256-color palette.
    Palette(u8),
    /// A 24-bit color.
    Rgb(u8, u8, u8),
}

/// Boolean text attributes carried by foreground-class colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TextAttributes {
    /// SGR 1.
    pub bold: bool,
    /// SGR 2.
    pub faint: bool,
    /// SGR 3.
    pub italic: bool,
    /// SGR 5.
    pub blink: bool,
    /// SGR 6.
    pub rapid_blink: bool,
    /// SGR 9.
    pub strikethrough: bool,
    /// SGR 53.
    pub overline: bool,
}

/// The payload of foreground-class colors: an optional color value plus text
/// attributes.
///
/// A `None` color changes attributes without touching the current foreground
/// color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Foreground {
    /// The color to apply, if any.
    pub color: Option<ColorValue>,
    /// The attributes to switch on.
    pub attributes: TextAttributes,
}

/// Which parts of the terminal state a [`Color::Reset`] mark clears.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resets {
    /// Full reset, SGR 0. On by default.
    pub all: bool,
    /// Neither bold nor faint, SGR 22.
    pub neutral: bool,
    /// Not italic, SGR 23.
    pub upright: bool,
    /// Not blinking, SGR 25.
    pub steady: bool,
    /// Neither superscript nor subscript, SGR 75.
    pub baseline: bool,
    /// Default foreground, SGR 39.
    pub foreground: bool,
    /// Default background, SGR 49.
    pub background: bool,
    /// No underline, SGR 24.
    pub underline: bool,
    /// Default underline color, SGR 59.
    pub underline_color: bool,
}

impl Default for Resets {
    fn default() -> Self {
        Self {
            all: true,
            neutral: false,
            upright: false,
            steady: false,
            baseline: false,
            foreground: false,
            background: false,
            underline: false,
            underline_color: false,
        }
    }
}

impl Resets {
    /// A reset set with every flag off, for building up selective resets.
    pub fn none() -> Self {
        Self {
            all: false,
            ..Self::default()
        }
    }
}

/// A terminal styling a mark kind renders as.
///
/// Each color knows its [`StyleClass`] and how to emit its SGR on- and
/// off-sequences. The attribute modifiers ([`bold`](Self::bold) and
/// friends) are only meaningful on foreground-class variants
/// ([`Foreground`](Self::Foreground), [`Superscript`](Self::Superscript),
/// [`Subscript`](Self::Subscript)); calling one on any other variant is a
/// programming error and panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Single underline.
    Underline(ColorValue),
    /// Double underline.
    DoubleUnderline(ColorValue),
    /// Curly underline.
    CurlyUnderline(ColorValue),
    /// Dotted underline.
    DottedUnderline(ColorValue),
    /// Dashed underline.
    DashedUnderline(ColorValue),
    /// Background color.
    Background(ColorValue),
    /// Foreground color and attributes.
    Foreground(Foreground),
    /// Superscript text with foreground styling.
    Superscript(Foreground),
    /// Subscript text with foreground styling.
    Subscript(Foreground),
    /// Swapped foreground and background.
    Inverse,
    /// Concealed text.
    Invisible,
    /// Clears prior styling instead of adding any.
    Reset(Resets),
}

impl Color {
    /// A foreground color.
    pub fn foreground(color: ColorValue) -> Self {
        Self::Foreground(Foreground {
            color: Some(color),
            attributes: TextAttributes::default(),
        })
    }

    /// A basic foreground color.
    pub fn basic(color: BasicColor) -> Self {
        Self::foreground(ColorValue::Basic(color))
    }

    /// A 256-palette foreground color.
    pub fn palette(index: u8) -> Self {
        Self::foreground(ColorValue::Palette(index))
    }

    /// A 24-bit foreground color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::foreground(ColorValue::Rgb(r, g, b))
    }

    /// A foreground that changes attributes only, leaving the color alone.
    pub fn attributes() -> Self {
        Self::Foreground(Foreground::default())
    }

    /// Superscript text in the given color.
    pub fn superscript(color: ColorValue) -> Self {
        Self::Superscript(Foreground {
            color: Some(color),
            attributes: TextAttributes::default(),
        })
    }

    /// Subscript text in the given color.
    pub fn subscript(color: ColorValue) -> Self {
        Self::Subscript(Foreground {
            color: Some(color),
            attributes: TextAttributes::default(),
        })
    }

    /// A full reset.
    pub fn reset() -> Self {
        Self::Reset(Resets::default())
    }

    /// Basic black foreground.
    pub fn black() -> Self {
        Self::basic(BasicColor::Black)
    }

    /// Basic red foreground.
    pub fn red() -> Self {
        Self::basic(BasicColor::Red)
    }

    /// Basic green foreground.
    pub fn green() -> Self {
        Self::basic(BasicColor::Green)
    }

    /// Basic yellow foreground.
    pub fn yellow() -> Self {
        Self::basic(BasicColor::Yellow)
    }

    /// Basic blue foreground.
    pub fn blue() -> Self {
        Self::basic(BasicColor::Blue)
    }

    /// Basic magenta foreground.
    pub fn magenta() -> Self {
        Self::basic(BasicColor::Magenta)
    }

    /// Basic cyan foreground.
    pub fn cyan() -> Self {
        Self::basic(BasicColor::Cyan)
    }

    /// Basic white foreground.
    pub fn white() -> Self {
        Self::basic(BasicColor::White)
    }

    /// Adds bold. Panics on non-foreground-class variants.
    #[must_use]
    pub fn bold(self) -> Self {
        self.modify(|a| a.bold = true)
    }

    /// Adds faint. Panics on non-foreground-class variants.
    #[must_use]
    pub fn faint(self) -> Self {
        self.modify(|a| a.faint = true)
    }

    /// Adds italic. Panics on non-foreground-class variants.
    #[must_use]
    pub fn italic(self) -> Self {
        self.modify(|a| a.italic = true)
    }

    /// Adds blink. Panics on non-foreground-class variants.
    #[must_use]
    pub fn blink(self) -> Self {
        self.modify(|a| a.blink = true)
    }

    /// Adds rapid blink. Panics on non-foreground-class variants.
    #[must_use]
    pub fn rapid_blink(self) -> Self {
        self.modify(|a| a.rapid_blink = true)
    }

    /// Adds strikethrough. Panics on non-foreground-class variants.
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.modify(|a| a.strikethrough = true)
    }

    /// Adds overline. Panics on non-foreground-class variants.
    #[must_use]
    pub fn overline(self) -> Self {
        self.modify(|a| a.overline = true)
    }

    fn modify(self, f: impl FnOnce(&mut TextAttributes)) -> Self {
        match self {
            Self::Foreground(mut fg) => {
                f(&mut fg.attributes);
                Self::Foreground(fg)
            }
            Self::Superscript(mut fg) => {
                f(&mut fg.attributes);
                Self::Superscript(fg)
            }
            Self::Subscript(mut fg) => {
                f(&mut fg.attributes);
                Self::Subscript(fg)
            }
            other => panic!(
                "text attribute modifiers apply only to foreground-class colors, got {other:?}"
            ),
        }
    }

    /// The class this color occupies.
    pub fn class(&self) -> StyleClass {
        match self {
            Self::Underline(_)
            | Self::DoubleUnderline(_)
            | Self::CurlyUnderline(_)
            | Self::DottedUnderline(_)
            | Self::DashedUnderline(_) => StyleClass::Underline,
            Self::Background(_) => StyleClass::Background,
            Self::Foreground(_) | Self::Superscript(_) | Self::Subscript(_) => {
                StyleClass::Foreground
            }
            Self::Inverse | Self::Invisible | Self::Reset(_) => StyleClass::Style,
        }
    }

    /// Write the SGR sequence switching this color on.
    pub fn write_on<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Self::Underline(c) => {
                out.write_all(b"\x1b[4m")?;
                write_underline_color(out, *c)
            }
            Self::DoubleUnderline(c) => {
                out.write_all(b"\x1b[4:2m")?;
                write_underline_color(out, *c)
            }
            Self::CurlyUnderline(c) => {
                out.write_all(b"\x1b[4:3m")?;
                write_underline_color(out, *c)
            }
            Self::DottedUnderline(c) => {
                out.write_all(b"\x1b[4:4m")?;
                write_underline_color(out, *c)
            }
            Self::DashedUnderline(c) => {
                out.write_all(b"\x1b[4:5m")?;
                write_underline_color(out, *c)
            }
            Self::Background(c) => match *c {
                ColorValue::Default => out.write_all(b"\x1b[49m"),
                ColorValue::Basic(b) => write!(out, "\x1b[4{}m", b.index()),
                ColorValue::Palette(p) => write!(out, "\x1b[48:5:{p}m"),
                ColorValue::Rgb(r, g, b) => write!(out, "\x1b[48:2::{r}:{g}:{b}m"),
            },
            Self::Foreground(fg) => write_foreground_on(out, fg),
            Self::Superscript(fg) => {
                out.write_all(b"\x1b[73m")?;
                write_foreground_on(out, fg)
            }
            Self::Subscript(fg) => {
                out.write_all(b"\x1b[74m")?;
                write_foreground_on(out, fg)
            }
            Self::Inverse => out.write_all(b"\x1b[7m"),
            Self::Invisible => out.write_all(b"\x1b[8m"),
            Self::Reset(resets) => write_resets(out, resets),
        }
    }

    /// Write the SGR sequence switching this color off.
    pub fn write_off<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match self {
            Self::Underline(c)
            | Self::DoubleUnderline(c)
            | Self::CurlyUnderline(c)
            | Self::DottedUnderline(c)
            | Self::DashedUnderline(c) => {
                out.write_all(b"\x1b[24m")?;
                if *c != ColorValue::Default {
                    out.write_all(b"\x1b[59m")?;
                }
                Ok(())
            }
            Self::Background(_) => out.write_all(b"\x1b[49m"),
            Self::Foreground(fg) => write_foreground_off(out, fg),
            Self::Superscript(fg) | Self::Subscript(fg) => {
                out.write_all(b"\x1b[75m")?;
                write_foreground_off(out, fg)
            }
            Self::Inverse => out.write_all(b"\x1b[27m"),
            Self::Invisible => out.write_all(b"\x1b[28m"),
            Self::Reset(_) => Ok(()),
        }
    }
}

fn write_underline_color<W: Write>(out: &mut W, color: ColorValue) -> io::Result<()> {
    match color {
        ColorValue::Default => Ok(()),
        // Basic underline colors emulate via the first palette indices.
        ColorValue::Basic(b) => write!(out, "\x1b[58:5:{}m", b.index()),
        ColorValue::Palette(p) => write!(out, "\x1b[58:5:{p}m"),
        ColorValue::Rgb(r, g, b) => write!(out, "\x1b[58:2::{r}:{g}:{b}m"),
    }
}

fn write_foreground_on<W: Write>(out: &mut W, fg: &Foreground) -> io::Result<()> {
    if let Some(color) = fg.color {
        match color {
            ColorValue::Default => out.write_all(b"\x1b[39m")?,
            ColorValue::Basic(b) => write!(out, "\x1b[3{}m", b.index())?,
            ColorValue::Palette(p) => write!(out, "\x1b[38:5:{p}m")?,
            ColorValue::Rgb(r, g, b) => write!(out, "\x1b[38:2::{r}:{g}:{b}m")?,
        }
    }
    let a = fg.attributes;
    if a.bold {
        out.write_all(b"\x1b[1m")?;
    }
    if a.faint {
        out.write_all(b"\x1b[2m")?;
    }
    if a.italic {
        out.write_all(b"\x1b[3m")?;
    }
    if a.blink {
        out.write_all(b"\x1b[5m")?;
    }
    if a.rapid_blink {
        out.write_all(b"\x1b[6m")?;
    }
    if a.strikethrough {
        out.write_all(b"\x1b[9m")?;
    }
    if a.overline {
        out.write_all(b"\x1b[53m")?;
    }
    Ok(())
}

fn write_foreground_off<W: Write>(out: &mut W, fg: &Foreground) -> io::Result<()> {
    if fg.color.is_some() {
        out.write_all(b"\x1b[39m")?;
    }
    let a = fg.attributes;
    if a.bold || a.faint {
        out.write_all(b"\x1b[22m")?;
    }
    if a.italic {
        out.write_all(b"\x1b[23m")?;
    }
    if a.blink || a.rapid_blink {
        out.write_all(b"\x1b[25m")?;
    }
    if a.strikethrough {
        out.write_all(b"\x1b[29m")?;
    }
    if a.overline {
        out.write_all(b"\x1b[55m")?;
    }
    Ok(())
}

fn write_resets<W: Write>(out: &mut W, resets: &Resets) -> io::Result<()> {
    if resets.all {
        out.write_all(b"\x1b[0m")?;
    }
    if resets.neutral {
        out.write_all(b"\x1b[22m")?;
    }
    if resets.upright {
        out.write_all(b"\x1b[23m")?;
    }
    if resets.steady {
        out.write_all(b"\x1b[25m")?;
    }
    if resets.baseline {
        out.write_all(b"\x1b[75m")?;
    }
    if resets.foreground {
        out.write_all(b"\x1b[39m")?;
    }
    if resets.background {
        out.write_all(b"\x1b[49m")?;
    }
    if resets.underline {
        out.write_all(b"\x1b[24m")?;
    }
    if resets.underline_color {
        out.write_all(b"\x1b[59m")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BasicColor, Color, ColorValue, Resets, StyleClass};

    fn on(color: Color) -> Vec<u8> {
        let mut out = Vec::new();
        color.write_on(&mut out).unwrap();
        out
    }

    fn off(color: Color) -> Vec<u8> {
        let mut out = Vec::new();
        color.write_off(&mut out).unwrap();
        out
    }

    #[test]
    fn basic_foreground() {
        assert_eq!(on(Color::red()), b"\x1b[31m");
        assert_eq!(on(Color::white()), b"\x1b[37m");
        assert_eq!(off(Color::red()), b"\x1b[39m");
        assert_eq!(on(Color::foreground(ColorValue::Default)), b"\x1b[39m");
    }

    #[test]
    fn palette_and_rgb_foreground() {
        assert_eq!(on(Color::palette(42)), b"\x1b[38:5:42m");
        assert_eq!(on(Color::rgb(1, 22, 133)), b"\x1b[38:2::1:22:133m");
    }

    #[test]
    fn foreground_attributes() {
        assert_eq!(on(Color::red().bold()), b"\x1b[31m\x1b[1m");
        assert_eq!(off(Color::red().bold()), b"\x1b[39m\x1b[22m");
        assert_eq!(
            on(Color::attributes().italic().strikethrough()),
            b"\x1b[3m\x1b[9m"
        );
        // No color was set, so switching off does not touch the foreground.
        assert_eq!(
            off(Color::attributes().italic().strikethrough()),
            b"\x1b[23m\x1b[29m"
        );
        assert_eq!(off(Color::attributes().faint()), b"\x1b[22m");
        assert_eq!(on(Color::attributes().rapid_blink()), b"\x1b[6m");
        assert_eq!(off(Color::attributes().blink()), b"\x1b[25m");
        assert_eq!(on(Color::attributes().overline()), b"\x1b[53m");
        assert_eq!(off(Color::attributes().overline()), b"\x1b[55m");
    }

    #[test]
    fn backgrounds() {
        assert_eq!(on(Color::Background(ColorValue::Basic(BasicColor::Blue))), b"\x1b[44m");
        assert_eq!(on(Color::Background(ColorValue::Palette(7))), b"\x1b[48:5:7m");
        assert_eq!(
            on(Color::Background(ColorValue::Rgb(9, 8, 7))),
            b"\x1b[48:2::9:8:7m"
        );
        assert_eq!(on(Color::Background(ColorValue::Default)), b"\x1b[49m");
        assert_eq!(off(Color::Background(ColorValue::Palette(7))), b"\x1b[49m");
    }

    #[test]
    fn underlines() {
        assert_eq!(on(Color::Underline(ColorValue::Default)), b"\x1b[4m");
        assert_eq!(off(Color::Underline(ColorValue::Default)), b"\x1b[24m");
        // Basic underline colors emulate via the palette.
        assert_eq!(
            on(Color::Underline(ColorValue::Basic(BasicColor::Red))),
            b"\x1b[4m\x1b[58:5:1m"
        );
        assert_eq!(
            off(Color::Underline(ColorValue::Basic(BasicColor::Red))),
            b"\x1b[24m\x1b[59m"
        );
        assert_eq!(
            on(Color::CurlyUnderline(ColorValue::Palette(99))),
            b"\x1b[4:3m\x1b[58:5:99m"
        );
        assert_eq!(on(Color::DoubleUnderline(ColorValue::Default)), b"\x1b[4:2m");
        assert_eq!(on(Color::DottedUnderline(ColorValue::Default)), b"\x1b[4:4m");
        assert_eq!(
            on(Color::DashedUnderline(ColorValue::Rgb(1, 2, 3))),
            b"\x1b[4:5m\x1b[58:2::1:2:3m"
        );
    }

    #[test]
    fn scripts_and_styles() {
        assert_eq!(
            on(Color::superscript(ColorValue::Basic(BasicColor::Green))),
            b"\x1b[73m\x1b[32m"
        );
        assert_eq!(
            off(Color::superscript(ColorValue::Basic(BasicColor::Green))),
            b"\x1b[75m\x1b[39m"
        );
        assert_eq!(on(Color::subscript(ColorValue::Default)), b"\x1b[74m\x1b[39m");
        assert_eq!(on(Color::Inverse), b"\x1b[7m");
        assert_eq!(off(Color::Inverse), b"\x1b[27m");
        assert_eq!(on(Color::Invisible), b"\x1b[8m");
        assert_eq!(off(Color::Invisible), b"\x1b[28m");
    }

    #[test]
    fn resets() {
        assert_eq!(on(Color::reset()), b"\x1b[0m");
        assert_eq!(off(Color::reset()), b"");
        let selective = Resets {
            foreground: true,
            underline: true,
            ..Resets::none()
        };
        assert_eq!(on(Color::Reset(selective)), b"\x1b[39m\x1b[24m");
    }

    #[test]
    fn classes() {
        assert_eq!(Color::red().class(), StyleClass::Foreground);
        assert_eq!(Color::superscript(ColorValue::Default).class(), StyleClass::Foreground);
        assert_eq!(
            Color::Background(ColorValue::Default).class(),
            StyleClass::Background
        );
        assert_eq!(
            Color::CurlyUnderline(ColorValue::Default).class(),
            StyleClass::Underline
        );
        assert_eq!(Color::Inverse.class(), StyleClass::Style);
        assert_eq!(Color::reset().class(), StyleClass::Style);
    }

    #[test]
    #[should_panic(expected = "foreground-class")]
    fn modifier_on_background_panics() {
        let _ = Color::Background(ColorValue::Default).bold();
    }

    #[test]
    #[should_panic(expected = "foreground-class")]
    fn modifier_on_underline_panics() {
        let _ = Color::Underline(ColorValue::Default).italic();
    }
}
