#![forbid(unsafe_code)]

//! In-memory host for driving a [`Session`](crate::Session) without a UI.

use std::collections::VecDeque;
use std::ops::Range;

use crate::surface::{ChoiceSurface, SurfaceError, TextSurface};

/// A text buffer plus a scripted popup menu.
///
/// Menu answers are consumed in order; once the script runs out every menu
/// is dismissed.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub text: String,
    pub selection: Range<usize>,
    /// Answers returned by successive menus.
    pub choices: VecDeque<Option<usize>>,
    /// Every menu shown, as `(anchor, options)`.
    pub presented: Vec<(usize, Vec<String>)>,
    /// Number of `notify_changed` calls.
    pub changes: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryHost {
    /// A host holding `text` with the caret at the end.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selection: end..end,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_caret(self, caret: usize) -> Self {
        self.with_selection(caret..caret)
    }

    #[must_use]
    pub fn with_selection(mut self, selection: Range<usize>) -> Self {
        self.selection = selection;
        self
    }

    /// Queue the answer for the next menu.
    #[must_use]
    pub fn answer(mut self, choice: Option<usize>) -> Self {
        self.choices.push_back(choice);
        self
    }

    /// Current caret, if the selection is collapsed.
    #[must_use]
    pub fn caret(&self) -> Option<usize> {
        (self.selection.start == self.selection.end).then_some(self.selection.start)
    }
}

impl TextSurface for MemoryHost {
    fn text(&self) -> Result<String, SurfaceError> {
        if self.fail_reads {
            return Err(SurfaceError::Read("scripted failure".to_string()));
        }
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<(), SurfaceError> {
        if self.fail_writes {
            return Err(SurfaceError::Write("scripted failure".to_string()));
        }
        self.text = text.to_string();
        Ok(())
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn set_selection(&mut self, selection: Range<usize>) {
        self.selection = selection;
    }

    fn notify_changed(&mut self) {
        self.changes += 1;
    }
}

impl ChoiceSurface for MemoryHost {
    fn present_choices(&mut self, anchor: usize, options: &[String]) -> Option<usize> {
        self.presented.push((anchor, options.to_vec()));
        self.choices.pop_front().flatten()
    }
}
