#![forbid(unsafe_code)]

//! Canned tags offered by the insert menu.
//!
//! With a collapsed caret every template inserts a single opener. With a
//! selection only the kinds that have a closing form are offered, and each
//! wraps the selection in an opener/closer pair.

/// One entry of the insert menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTemplate {
    /// Menu text.
    pub label: String,
    /// Inserted before the selection.
    pub open: String,
    /// Inserted after the selection; empty for a collapsed caret.
    pub close: String,
}

impl TagTemplate {
    fn new(title: &str, open: String, close: &str) -> Self {
        let label = if close.is_empty() {
            format!("{title} {open}")
        } else {
            format!("{title} {open} ~ {close}")
        };
        Self {
            label,
            open,
            close: close.to_string(),
        }
    }
}

/// Templates for the insert menu, in display order.
///
/// `font` fills the name field of the font template.
#[must_use]
pub fn insert_menu(selection_empty: bool, font: &str) -> Vec<TagTemplate> {
    let color = "<#000000,ffffff>".to_string();
    let font = format!("<s32,{font},>");
    let speed = "<r1>".to_string();
    if selection_empty {
        vec![
            TagTemplate::new("Color", color, ""),
            TagTemplate::new("Font", font, ""),
            TagTemplate::new("Position", "<p0,0>".to_string(), ""),
            TagTemplate::new("Speed", speed, ""),
            TagTemplate::new("Wait", "<w1>".to_string(), ""),
            TagTemplate::new("Clear", "<c1>".to_string(), ""),
        ]
    } else {
        vec![
            TagTemplate::new("Color", color, "<#>"),
            TagTemplate::new("Font", font, "<s>"),
            TagTemplate::new("Speed", speed, "<r>"),
        ]
    }
}
