#![forbid(unsafe_code)]

//! Host-side collaborators.
//!
//! A session never owns the text. It reads and writes it through a
//! [`TextSurface`] and asks the user to pick from a list through a
//! [`ChoiceSurface`]. Both are usually the same host widget.

use std::fmt;
use std::ops::Range;

/// Failure reported by a [`TextSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The text could not be read.
    Read(String),
    /// The text could not be replaced.
    Write(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(reason) => write!(f, "cannot read text: {reason}"),
            Self::Write(reason) => write!(f, "cannot write text: {reason}"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// An editable text buffer with a selection.
///
/// Offsets are UTF-8 byte offsets into the string returned by
/// [`text`](Self::text).
pub trait TextSurface {
    /// Current contents.
    fn text(&self) -> Result<String, SurfaceError>;

    /// Replace the contents.
    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Current selection; empty when only a caret is shown.
    fn selection(&self) -> Range<usize>;

    /// Move the selection.
    fn set_selection(&mut self, selection: Range<usize>);

    /// Called once after a successful edit.
    fn notify_changed(&mut self) {}
}

/// A popup menu.
pub trait ChoiceSurface {
    /// Show `options` near byte offset `anchor` and return the chosen index,
    /// or `None` if the user dismissed the menu.
    fn present_choices(&mut self, anchor: usize, options: &[String]) -> Option<usize>;
}

impl<T: TextSurface + ?Sized> TextSurface for &mut T {
    fn text(&self) -> Result<String, SurfaceError> {
        (**self).text()
    }

    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        (**self).set_text(text)
    }

    fn selection(&self) -> Range<usize> {
        (**self).selection()
    }

    fn set_selection(&mut self, selection: Range<usize>) {
        (**self).set_selection(selection);
    }

    fn notify_changed(&mut self) {
        (**self).notify_changed();
    }
}

impl<C: ChoiceSurface + ?Sized> ChoiceSurface for &mut C {
    fn present_choices(&mut self, anchor: usize, options: &[String]) -> Option<usize> {
        (**self).present_choices(anchor, options)
    }
}
