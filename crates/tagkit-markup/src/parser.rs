#![forbid(unsafe_code)]

//! Single-pass tag parser.
//!
//! [`parse_tag_at`] reads one tag starting at a `<` and either decodes it or
//! reports why the bytes there are not a tag. There is no tokenizing pass:
//! fields are split on `,` and checked byte by byte as the scan advances, so
//! the first illegal byte ends the attempt.
//!
//! # Grammar
//!
//! ```text
//! tag      = "<" kind field ( "," field ){0,2} ">"
//! kind     = "#" | "p" | "s" | "r" | "w" | "c"
//! ```
//!
//! | Kind     | Fields | Field rules                                       |
//! |----------|--------|---------------------------------------------------|
//! | Color    | 0..=2  | hex digits, each empty or exactly 6               |
//! | Position | 2..=3  | `[+-]?` digits with at most one `.`               |
//! | Font     | 0..=3  | size digits, name (anything, max 255 chars), `B`/`I` |
//! | Speed    | 0..=1  | `[+-]?` digits with at most one `.`               |
//! | Wait     | 0..=1  | `*?[+-]?` digits with at most one `.`             |
//! | Clear    | 0..=1  | same as Wait                                      |
//!
//! A lone empty field counts as no field, so `<#>`, `<s>` and `<r>` are
//! valid closers. `<` is rejected everywhere except inside a font name.
//!
//! All grammar bytes are ASCII; offsets are byte offsets into the text and
//! never split a multi-byte character.

use std::fmt;

use tracing::trace;

use crate::tag::{
    Axis, ColorValue, FontValue, MAX_FIELDS, Pause, PositionValue, Rgb, Tag, TagKind, TagValue,
    TokenSpan,
};

/// Longest accepted font name, in characters.
pub const MAX_FONT_NAME_CHARS: usize = tagkit_fonts::MAX_NAME_CHARS;

/// Why the bytes at a position are not a tag.
///
/// This is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotATag {
    /// Fewer than three bytes remain.
    TooShort,
    /// The byte at the start is not `<`.
    NotAnOpener,
    /// The marker byte names no kind.
    UnknownKind,
    /// A fourth field was opened.
    TooManyFields,
    /// A byte is not allowed in its field.
    IllegalChar {
        /// Offset of the byte.
        at: usize,
    },
    /// The text ended before `>`.
    Unterminated,
    /// The kind does not accept this many fields.
    FieldCount {
        kind: TagKind,
        found: usize,
    },
    /// A colour field is neither empty nor six digits.
    ColorWidth,
    /// The font name is longer than [`MAX_FONT_NAME_CHARS`].
    NameTooLong,
}

impl fmt::Display for NotATag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(f, "too short"),
            Self::NotAnOpener => write!(f, "no '<' at start"),
            Self::UnknownKind => write!(f, "unknown tag kind"),
            Self::TooManyFields => write!(f, "more than {MAX_FIELDS} fields"),
            Self::IllegalChar { at } => write!(f, "illegal character at {at}"),
            Self::Unterminated => write!(f, "missing '>'"),
            Self::FieldCount { kind, found } => {
                write!(f, "{kind} tag cannot have {found} fields")
            }
            Self::ColorWidth => write!(f, "colour field must be empty or 6 hex digits"),
            Self::NameTooLong => {
                write!(f, "font name longer than {MAX_FONT_NAME_CHARS} characters")
            }
        }
    }
}

/// Parse the tag starting at byte `start`, or `None`.
#[must_use]
pub fn parse_tag(text: &str, start: usize) -> Option<Tag> {
    parse_tag_at(text, start).ok()
}

/// Parse the tag starting at byte `start`, reporting why it is not one.
pub fn parse_tag_at(text: &str, start: usize) -> Result<Tag, NotATag> {
    let result = scan(text, start);
    if let Err(reason) = &result {
        trace!(start, %reason, "not a tag");
    }
    result
}

fn scan(text: &str, start: usize) -> Result<Tag, NotATag> {
    let bytes = text.as_bytes();
    if start >= bytes.len() || bytes.len() - start < 3 {
        return Err(NotATag::TooShort);
    }
    if bytes[start] != b'<' {
        return Err(NotATag::NotAnOpener);
    }
    let kind = TagKind::from_marker(bytes[start + 1]).ok_or(NotATag::UnknownKind)?;

    let mut fields = Fields::new(kind, start + 2);
    for (at, &byte) in bytes.iter().enumerate().skip(start + 2) {
        match byte {
            b',' => fields.split(at)?,
            b'>' => {
                let tokens = fields.close(at)?;
                let value = decode(text, kind, &tokens)?;
                return Ok(Tag {
                    span: start..at + 1,
                    tokens,
                    value,
                });
            }
            _ => fields.accept(byte, at)?,
        }
    }
    Err(NotATag::Unterminated)
}

// ---------------------------------------------------------------------------
// Field scanning
// ---------------------------------------------------------------------------

struct Fields {
    kind: TagKind,
    index: usize,
    starts: [usize; MAX_FIELDS],
    lens: [usize; MAX_FIELDS],
    dot: bool,
    star: bool,
}

impl Fields {
    fn new(kind: TagKind, first: usize) -> Self {
        Self {
            kind,
            index: 0,
            starts: [first, 0, 0],
            lens: [0; MAX_FIELDS],
            dot: false,
            star: false,
        }
    }

    fn split(&mut self, at: usize) -> Result<(), NotATag> {
        self.lens[self.index] = at - self.starts[self.index];
        self.index += 1;
        if self.index == MAX_FIELDS {
            return Err(NotATag::TooManyFields);
        }
        self.starts[self.index] = at + 1;
        self.dot = false;
        self.star = false;
        Ok(())
    }

    fn accept(&mut self, byte: u8, at: usize) -> Result<(), NotATag> {
        let offset = at - self.starts[self.index];
        let ok = match (self.kind, self.index) {
            (TagKind::Color, 0 | 1) => byte.is_ascii_hexdigit(),
            (TagKind::Position, _) | (TagKind::Speed, 0) => {
                number_byte(byte, offset == 0, &mut self.dot)
            }
            (TagKind::Font, 0) => byte.is_ascii_digit(),
            (TagKind::Font, 1) => true,
            (TagKind::Font, _) => byte == b'B' || byte == b'I',
            (TagKind::Wait | TagKind::Clear, 0) => {
                // `*` may only lead; a sign may follow it or lead itself.
                if byte == b'*' {
                    self.star = offset == 0;
                    self.star
                } else {
                    let sign_slot = offset == 0 || (offset == 1 && self.star);
                    number_byte(byte, sign_slot, &mut self.dot)
                }
            }
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(NotATag::IllegalChar { at })
        }
    }

    fn close(&mut self, at: usize) -> Result<[Option<TokenSpan>; MAX_FIELDS], NotATag> {
        self.lens[self.index] = at - self.starts[self.index];
        let count = self.index + 1;
        let mut tokens = [None; MAX_FIELDS];
        for (i, token) in tokens.iter_mut().enumerate().take(count) {
            *token = Some(TokenSpan::new(self.starts[i], self.lens[i]));
        }
        if count == 1 && self.lens[0] == 0 {
            tokens[0] = None;
        }
        let arity = tokens.iter().filter(|t| t.is_some()).count();

        let arity_ok = match self.kind {
            TagKind::Color => arity <= 2,
            TagKind::Position => (2..=3).contains(&arity),
            TagKind::Font => true,
            TagKind::Speed | TagKind::Wait | TagKind::Clear => arity <= 1,
        };
        if !arity_ok {
            return Err(NotATag::FieldCount {
                kind: self.kind,
                found: arity,
            });
        }
        if self.kind == TagKind::Color
            && tokens.iter().flatten().any(|t| t.len != 0 && t.len != 6)
        {
            return Err(NotATag::ColorWidth);
        }
        Ok(tokens)
    }
}

/// Digit, a single `.`, or a sign where one is allowed.
fn number_byte(byte: u8, sign_slot: bool, dot: &mut bool) -> bool {
    match byte {
        b'0'..=b'9' => true,
        b'+' | b'-' => sign_slot,
        b'.' if !*dot => {
            *dot = true;
            true
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn field(text: &str, token: Option<TokenSpan>) -> &str {
    token.map_or("", |t| &text[t.start..t.end()])
}

fn decode(
    text: &str,
    kind: TagKind,
    tokens: &[Option<TokenSpan>; MAX_FIELDS],
) -> Result<TagValue, NotATag> {
    let f = |i: usize| field(text, tokens[i]);
    let value = match kind {
        TagKind::Color => TagValue::Color(ColorValue {
            colors: [decode_color(f(0)), decode_color(f(1))],
        }),
        TagKind::Position => TagValue::Position(PositionValue {
            x: decode_axis(f(0)),
            y: decode_axis(f(1)),
            z: tokens[2].map(|_| decode_axis(f(2))),
        }),
        TagKind::Font => {
            let name = f(1);
            if name.chars().count() > MAX_FONT_NAME_CHARS {
                return Err(NotATag::NameTooLong);
            }
            let style = f(2);
            TagValue::Font(FontValue {
                size: decode_size(f(0)),
                name: name.to_string(),
                bold: style.contains('B'),
                italic: style.contains('I'),
            })
        }
        TagKind::Speed => TagValue::Speed(decode_float(f(0))),
        TagKind::Wait => TagValue::Wait(decode_pause(f(0))),
        TagKind::Clear => TagValue::Clear(decode_pause(f(0))),
    };
    Ok(value)
}

fn decode_color(field: &str) -> Option<Rgb> {
    if field.len() != 6 {
        return None;
    }
    u32::from_str_radix(field, 16).ok().map(Rgb::from_u32)
}

/// Empty or sign-only fields decode to zero; the rest saturate to the
/// `i32` range.
fn decode_float(field: &str) -> f64 {
    field
        .parse::<f64>()
        .map_or(0.0, |v| v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)))
}

fn decode_axis(field: &str) -> Axis {
    Axis {
        value: decode_float(field),
        relative: field.starts_with(['+', '-']),
    }
}

fn decode_pause(field: &str) -> Pause {
    match field.strip_prefix('*') {
        Some(rest) => Pause {
            amount: decode_float(rest),
            per_char: true,
        },
        None => Pause {
            amount: decode_float(field),
            per_char: false,
        },
    }
}

/// Digits only; saturates at `i32::MAX`.
fn decode_size(field: &str) -> u32 {
    const LIMIT: u32 = i32::MAX as u32;
    field.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(u32::from(b - b'0'))
            .min(LIMIT)
    })
}
