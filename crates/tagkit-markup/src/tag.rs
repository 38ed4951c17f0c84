#![forbid(unsafe_code)]

//! Decoded tag model.
//!
//! A [`Tag`] ties a typed [`TagValue`] to where it came from: the byte span
//! of the whole tag and the byte span of each of its (up to three) fields.
//! The field shape is kept so that re-rendering reproduces the same number
//! of fields the author wrote.

use std::fmt;
use std::ops::Range;

/// Maximum number of comma-separated fields in any tag.
pub const MAX_FIELDS: usize = 3;

/// Kind of tag, selected by the character after `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<#rrggbb,rrggbb>` text and outline colour.
    Color,
    /// `<px,y[,z]>` draw position.
    Position,
    /// `<ssize,name,style>` font.
    Font,
    /// `<rN>` display speed.
    Speed,
    /// `<w[*]N>` wait.
    Wait,
    /// `<c[*]N>` clear.
    Clear,
}

impl TagKind {
    /// Every kind, in marker order.
    pub const ALL: [Self; 6] = [
        Self::Color,
        Self::Position,
        Self::Font,
        Self::Speed,
        Self::Wait,
        Self::Clear,
    ];

    /// Kind for a marker byte, if any.
    #[must_use]
    pub const fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            b'#' => Some(Self::Color),
            b'p' => Some(Self::Position),
            b's' => Some(Self::Font),
            b'r' => Some(Self::Speed),
            b'w' => Some(Self::Wait),
            b'c' => Some(Self::Clear),
            _ => None,
        }
    }

    /// Marker character written after `<`.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Color => '#',
            Self::Position => 'p',
            Self::Font => 's',
            Self::Speed => 'r',
            Self::Wait => 'w',
            Self::Clear => 'c',
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Color => "color",
            Self::Position => "position",
            Self::Font => "font",
            Self::Speed => "speed",
            Self::Wait => "wait",
            Self::Clear => "clear",
        };
        f.write_str(name)
    }
}

/// Byte range of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TokenSpan {
    /// Offset of the first byte.
    pub start: usize,
    /// Length in bytes (may be zero).
    pub len: usize,
}

impl TokenSpan {
    /// Create a span.
    #[must_use]
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last byte.
    #[must_use]
    pub const fn end(self) -> usize {
        self.start + self.len
    }

    /// Whether `offset` lies on or between the field's edges.
    #[must_use]
    pub const fn touches(self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end()
    }

    /// The same span moved by `base` bytes.
    #[must_use]
    pub const fn shifted(self, base: usize) -> Self {
        Self {
            start: base + self.start,
            len: self.len,
        }
    }
}

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a colour from channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unpack `0xRRGGBB`.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Pack as `0xRRGGBB`.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Value of a colour tag. `None` is an empty field (keep the current colour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorValue {
    pub colors: [Option<Rgb>; 2],
}

/// One coordinate of a position tag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Axis {
    pub value: f64,
    /// Written with a leading sign; offsets the current position.
    pub relative: bool,
}

impl Axis {
    #[must_use]
    pub const fn absolute(value: f64) -> Self {
        Self {
            value,
            relative: false,
        }
    }

    #[must_use]
    pub const fn relative(value: f64) -> Self {
        Self {
            value,
            relative: true,
        }
    }

    /// Relative and zero: moves nothing.
    #[must_use]
    pub fn is_null_offset(self) -> bool {
        self.relative && self.value == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionValue {
    pub x: Axis,
    pub y: Axis,
    pub z: Option<Axis>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontValue {
    pub size: u32,
    pub name: String,
    pub bold: bool,
    pub italic: bool,
}

impl FontValue {
    /// Style as a two-bit value: bold is bit 0, italic bit 1.
    #[must_use]
    pub const fn style_bits(&self) -> u8 {
        (self.bold as u8) | ((self.italic as u8) << 1)
    }

    /// Set style from two bits; higher bits are ignored.
    pub fn set_style_bits(&mut self, bits: u8) {
        self.bold = bits & 1 != 0;
        self.italic = bits & 2 != 0;
    }
}

/// Amount of a wait or clear tag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pause {
    pub amount: f64,
    /// `*` prefix: amount is multiplied per displayed character.
    pub per_char: bool,
}

/// Decoded value, one variant per [`TagKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Color(ColorValue),
    Position(PositionValue),
    Font(FontValue),
    Speed(f64),
    Wait(Pause),
    Clear(Pause),
}

impl TagValue {
    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::Color(_) => TagKind::Color,
            Self::Position(_) => TagKind::Position,
            Self::Font(_) => TagKind::Font,
            Self::Speed(_) => TagKind::Speed,
            Self::Wait(_) => TagKind::Wait,
            Self::Clear(_) => TagKind::Clear,
        }
    }
}

/// A tag located in some text.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Byte range from `<` through `>`.
    pub span: Range<usize>,
    /// Byte span of each field; `None` if the field was not written.
    pub tokens: [Option<TokenSpan>; MAX_FIELDS],
    pub value: TagValue,
}

impl Tag {
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        self.value.kind()
    }

    /// Number of fields written.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_some()).count()
    }

    /// Span of field `index`.
    #[must_use]
    pub fn token(&self, index: usize) -> Option<TokenSpan> {
        self.tokens.get(index).copied().flatten()
    }

    /// Index of the first field whose span touches `caret`.
    #[must_use]
    pub fn field_at(&self, caret: usize) -> Option<usize> {
        self.tokens
            .iter()
            .position(|t| t.is_some_and(|t| t.touches(caret)))
    }

    /// Whether `offset` lies inside the tag (`<` inclusive, past `>` exclusive).
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        self.span.contains(&offset)
    }

    /// Copy of this tag with the font name replaced.
    ///
    /// Non-font tags are returned unchanged.
    #[must_use]
    pub fn with_font_name(&self, name: &str) -> Self {
        let mut tag = self.clone();
        if let TagValue::Font(font) = &mut tag.value {
            font.name = name.to_string();
        }
        tag
    }
}
