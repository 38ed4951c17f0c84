#![forbid(unsafe_code)]

//! Inline tag markup.
//!
//! Tags are short `<...>` runs embedded in ordinary text:
//!
//! | Tag              | Meaning                               |
//! |------------------|---------------------------------------|
//! | `<#ffffff,000000>` | text and outline colour             |
//! | `<p+10,-5>`      | draw position (signed = relative)     |
//! | `<s32,Arial,BI>` | font size, name and style             |
//! | `<r2>`           | display speed                         |
//! | `<w*0.5>`        | wait (`*` = per character)            |
//! | `<c1>`           | clear                                 |
//!
//! The crate is a parse → edit → render pipeline of pure functions:
//! - [`locate_tag`] finds the tag under a caret via [`parse_tag`]
//! - [`edit_tag`] applies an arrow key to the field under the caret
//! - [`render_tag`] writes the tag back and reports the new field spans
//!
//! All offsets are UTF-8 byte offsets.
//!
//! # Example
//! ```
//! use tagkit_fonts::Catalog;
//! use tagkit_markup::{Arrow, Edit, RenderOptions, edit_tag, locate_tag, render_tag};
//!
//! let text = "Hello <r1.5>world";
//! let tag = locate_tag(text, 9).unwrap();
//! let Edit::Changed { tag, .. } = edit_tag(&tag, 9, Arrow::Up, false, &Catalog::empty()).unwrap()
//! else {
//!     unreachable!()
//! };
//! assert_eq!(render_tag(&tag, RenderOptions::EDIT).text, "<r1.6>");
//! ```

pub mod editor;
pub mod locate;
pub mod parser;
pub mod render;
pub mod tag;

pub use editor::{Arrow, Edit, edit_tag};
pub use locate::locate_tag;
pub use parser::{MAX_FONT_NAME_CHARS, NotATag, parse_tag, parse_tag_at};
pub use render::{RenderOptions, Rendered, format_decimal, render_tag};
pub use tag::{
    Axis, ColorValue, FontValue, MAX_FIELDS, Pause, PositionValue, Rgb, Tag, TagKind, TagValue,
    TokenSpan,
};
