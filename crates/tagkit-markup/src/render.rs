#![forbid(unsafe_code)]

//! Tag serializer.
//!
//! [`render_tag`] writes a tag back in the grammar [`parse_tag`] accepts,
//! keeping the field shape of the source tag and reporting where each
//! field landed in the output.
//!
//! Zero omission is chosen per call with [`RenderOptions`]: after an edit a
//! zero font size or amount is left empty, for display it is written out.
//! Position numbers are never omitted, but a position that moves nothing
//! (every written axis relative and zero) renders as the empty string.
//!
//! [`parse_tag`]: crate::parse_tag

use crate::tag::{
    Axis, ColorValue, FontValue, MAX_FIELDS, Pause, PositionValue, Tag, TagKind, TagValue,
    TokenSpan,
};

/// Serializer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Leave zero sizes and amounts empty.
    pub omit_zero: bool,
}

impl RenderOptions {
    /// Re-rendering an edited tag.
    pub const EDIT: Self = Self { omit_zero: true };
    /// Formatting a value for display.
    pub const DISPLAY: Self = Self { omit_zero: false };
}

/// Rendered tag text and the span of each field within it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Rendered {
    pub text: String,
    /// Field spans relative to the start of `text`.
    pub tokens: [Option<TokenSpan>; MAX_FIELDS],
}

impl Rendered {
    /// Span of field `index`, relative to the start of the text.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<TokenSpan> {
        self.tokens.get(index).copied().flatten()
    }

    /// The tag collapsed to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Format `value` with at most one decimal digit.
///
/// The value is truncated (not rounded) to tenths after absorbing
/// accumulated floating-point error, so `2.1 + 0.1` prints `2.2`. A zero
/// tenths digit prints the integer only; zero itself prints `"0"`, or `""`
/// when `omit_zero` is set.
#[must_use]
pub fn format_decimal(value: f64, omit_zero: bool) -> String {
    let tenths = (value.abs() * 10.0 + 1e-6).trunc() as i64;
    if tenths == 0 {
        return if omit_zero { String::new() } else { "0".to_string() };
    }
    let sign = if value < 0.0 { "-" } else { "" };
    match (tenths / 10, tenths % 10) {
        (whole, 0) => format!("{sign}{whole}"),
        (whole, frac) => format!("{sign}{whole}.{frac}"),
    }
}

/// Render `tag` with its current value.
#[must_use]
pub fn render_tag(tag: &Tag, options: RenderOptions) -> Rendered {
    match &tag.value {
        TagValue::Color(color) => render_color(tag, color),
        TagValue::Position(position) => render_position(tag, position),
        TagValue::Font(font) => render_font(tag, font, options),
        TagValue::Speed(speed) => {
            let mut out = Writer::open(TagKind::Speed);
            out.field(&format_decimal(*speed, options.omit_zero));
            out.close()
        }
        TagValue::Wait(pause) => render_pause(TagKind::Wait, pause, options),
        TagValue::Clear(pause) => render_pause(TagKind::Clear, pause, options),
    }
}

fn render_color(tag: &Tag, color: &ColorValue) -> Rendered {
    let hex = |i: usize| {
        color.colors[i]
            .map(|c| format!("{:06x}", c.to_u32()))
            .unwrap_or_default()
    };
    let mut out = Writer::open(TagKind::Color);
    if tag.tokens[1].is_some() {
        out.field(&hex(0));
        out.field(&hex(1));
    } else if tag.tokens[0].is_some() {
        out.field(&hex(0));
    }
    out.close()
}

fn render_position(tag: &Tag, position: &PositionValue) -> Rendered {
    let three = tag.tokens[2].is_some();
    let z = position.z.unwrap_or_default();
    let still = position.x.is_null_offset()
        && position.y.is_null_offset()
        && (!three || z.is_null_offset());
    if still {
        return Rendered::default();
    }

    let mut out = Writer::open(TagKind::Position);
    out.field(&format_axis(position.x));
    out.field(&format_axis(position.y));
    if three {
        out.field(&format_axis(z));
    }
    out.close()
}

fn format_axis(axis: Axis) -> String {
    let number = format_decimal(axis.value, false);
    if axis.relative && !number.starts_with('-') {
        format!("+{number}")
    } else {
        number
    }
}

fn render_font(tag: &Tag, font: &FontValue, options: RenderOptions) -> Rendered {
    let size = if options.omit_zero && font.size == 0 {
        String::new()
    } else {
        font.size.to_string()
    };
    let style = match (font.bold, font.italic) {
        (true, true) => "BI",
        (true, false) => "B",
        (false, true) => "I",
        (false, false) => "",
    };

    let mut out = Writer::open(TagKind::Font);
    out.field(&size);
    if tag.tokens[1].is_some() || tag.tokens[2].is_some() {
        out.field(&font.name);
    }
    if tag.tokens[2].is_some() {
        out.field(style);
    }
    out.close()
}

fn render_pause(kind: TagKind, pause: &Pause, options: RenderOptions) -> Rendered {
    let amount = format_decimal(pause.amount, options.omit_zero);
    let mut out = Writer::open(kind);
    if pause.per_char {
        out.field(&format!("*{amount}"));
    } else {
        out.field(&amount);
    }
    out.close()
}

/// Appends fields and records their spans.
struct Writer {
    text: String,
    tokens: [Option<TokenSpan>; MAX_FIELDS],
    count: usize,
}

impl Writer {
    fn open(kind: TagKind) -> Self {
        let mut text = String::with_capacity(16);
        text.push('<');
        text.push(kind.marker());
        Self {
            text,
            tokens: [None; MAX_FIELDS],
            count: 0,
        }
    }

    fn field(&mut self, value: &str) {
        if self.count > 0 {
            self.text.push(',');
        }
        let start = self.text.len();
        self.text.push_str(value);
        self.tokens[self.count] = Some(TokenSpan::new(start, value.len()));
        self.count += 1;
    }

    fn close(mut self) -> Rendered {
        self.text.push('>');
        Rendered {
            text: self.text,
            tokens: self.tokens,
        }
    }
}
