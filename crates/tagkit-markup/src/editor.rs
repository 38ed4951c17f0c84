#![forbid(unsafe_code)]

//! Arrow-key field editing.
//!
//! [`edit_tag`] is pure: it takes a decoded tag and a key and returns the
//! edited copy, leaving rendering and splicing to the caller. A font name
//! that is not in the catalog cannot be stepped; the editor ranks it and
//! returns [`Edit::ChooseFont`] so the caller can ask the user.
//!
//! | Kind     | Keys        | Effect                                        |
//! |----------|-------------|-----------------------------------------------|
//! | Color    | Up / Down   | channel under caret ±1 (±16), 0..=255         |
//! | Position | all arrows  | Left/Right x ∓ step, Up/Down y ∓ step (1, 10) |
//! | Font     | Up / Down   | size ±1 (±10), catalog step ±1 (±10), style ±1 mod 4 |
//! | Speed, Wait, Clear | Up / Down | ±0.1 (±1), 0..=`i32::MAX`          |

use tagkit_fonts::{Catalog, RankError, Ranking, rank};
use tracing::trace;

use crate::tag::{Axis, FontValue, Pause, Tag, TagValue};

/// Arrow key that drives an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// +1 for Up, -1 for Down, nothing for Left/Right.
    const fn vertical(self) -> Option<i64> {
        match self {
            Self::Up => Some(1),
            Self::Down => Some(-1),
            Self::Left | Self::Right => None,
        }
    }
}

/// Outcome of [`edit_tag`].
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// The key does nothing here; leave the text alone.
    NoChange,
    /// The value changed. `field` is the edited field, for caret placement.
    Changed { tag: Tag, field: usize },
    /// The font name is not in the catalog. Present `ranking` and write the
    /// chosen name back with [`Tag::with_font_name`].
    ChooseFont { tag: Tag, ranking: Ranking },
}

const INT_MAX: f64 = i32::MAX as f64;
const INT_MIN: f64 = i32::MIN as f64;

/// Apply `arrow` to the field of `tag` under `caret`.
///
/// # Errors
///
/// Ranking errors from an unmatched font name (empty catalog, or a name
/// whose comparison key is empty).
pub fn edit_tag(
    tag: &Tag,
    caret: usize,
    arrow: Arrow,
    shift: bool,
    catalog: &Catalog,
) -> Result<Edit, RankError> {
    let mut edited = tag.clone();
    let field = match &mut edited.value {
        TagValue::Color(color) => {
            let Some(field) = tag.field_at(caret).filter(|&f| f < 2) else {
                return Ok(Edit::NoChange);
            };
            let (Some(step), Some(span)) = (arrow.vertical(), tag.token(field)) else {
                return Ok(Edit::NoChange);
            };
            let Some(rgb) = color.colors[field].as_mut() else {
                return Ok(Edit::NoChange);
            };
            let channel = match caret - span.start {
                0 | 1 => &mut rgb.r,
                3 => &mut rgb.g,
                5 | 6 => &mut rgb.b,
                _ => return Ok(Edit::NoChange),
            };
            let delta = if shift { step * 16 } else { step };
            *channel = (i64::from(*channel) + delta).clamp(0, 255) as u8;
            Some(field)
        }
        TagValue::Position(position) => {
            let step = if shift { 10.0 } else { 1.0 };
            match arrow {
                Arrow::Left => nudge_axis(&mut position.x, -step),
                Arrow::Right => nudge_axis(&mut position.x, step),
                Arrow::Up => nudge_axis(&mut position.y, -step),
                Arrow::Down => nudge_axis(&mut position.y, step),
            }
            Some(if matches!(arrow, Arrow::Left | Arrow::Right) { 0 } else { 1 })
        }
        TagValue::Font(font) => {
            let Some(field) = tag.field_at(caret) else {
                return Ok(Edit::NoChange);
            };
            let Some(step) = arrow.vertical() else {
                return Ok(Edit::NoChange);
            };
            match field {
                0 => {
                    let delta = if shift { step * 10 } else { step };
                    font.size = (i64::from(font.size) + delta).clamp(0, i64::from(i32::MAX)) as u32;
                }
                1 => match step_font_name(font, step, shift, catalog) {
                    NameStep::Stepped => {}
                    NameStep::AtEdge => return Ok(Edit::NoChange),
                    NameStep::Unknown => {
                        let ranking = rank(catalog, &font.name)?;
                        return Ok(Edit::ChooseFont { tag: edited, ranking });
                    }
                },
                _ => {
                    let bits = (i64::from(font.style_bits()) + step).rem_euclid(4);
                    font.set_style_bits(bits as u8);
                }
            }
            Some(field)
        }
        TagValue::Speed(speed) => nudge_amount(speed, arrow, shift),
        TagValue::Wait(Pause { amount, .. }) | TagValue::Clear(Pause { amount, .. }) => {
            nudge_amount(amount, arrow, shift)
        }
    };

    Ok(match field {
        Some(field) => {
            trace!(kind = %tag.kind(), field, ?arrow, shift, "edited tag field");
            Edit::Changed { tag: edited, field }
        }
        None => Edit::NoChange,
    })
}

fn nudge_axis(axis: &mut Axis, delta: f64) {
    let floor = if axis.relative { INT_MIN } else { 0.0 };
    axis.value = (axis.value + delta).clamp(floor, INT_MAX);
}

fn nudge_amount(amount: &mut f64, arrow: Arrow, shift: bool) -> Option<usize> {
    let step = arrow.vertical()? as f64;
    let delta = if shift { step } else { step * 0.1 };
    *amount = (*amount + delta).clamp(0.0, INT_MAX);
    Some(0)
}

enum NameStep {
    Stepped,
    AtEdge,
    Unknown,
}

fn step_font_name(font: &mut FontValue, step: i64, shift: bool, catalog: &Catalog) -> NameStep {
    let Some(index) = catalog.index_of(&font.name) else {
        return NameStep::Unknown;
    };
    let delta = if shift { step * 10 } else { step };
    let last = catalog.len() as i64 - 1;
    let target = (index as i64 + delta).clamp(0, last) as usize;
    if target == index {
        return NameStep::AtEdge;
    }
    match catalog.name(target) {
        Some(name) => {
            font.name = name.to_string();
            NameStep::Stepped
        }
        None => NameStep::AtEdge,
    }
}
