#![forbid(unsafe_code)]

//! The editing session.
//!
//! A [`Session`] owns the font catalog for its lifetime and turns host key
//! events into text edits:
//!
//! - an arrow key at a collapsed caret edits the tag under the caret, or
//!   spawns a relative position tag when there is none
//! - `T` opens the insert menu and splices the chosen template around the
//!   selection
//!
//! # Invariants
//!
//! 1. The catalog is built once in [`Session::start`] and never mutated.
//! 2. A failed or declined action leaves the host text and selection as
//!    they were.
//! 3. `notify_changed` is called exactly once per successful edit, after
//!    both text and selection are updated.

use std::ops::Range;

use tagkit_fonts::{Catalog, FontSource};
use tagkit_markup::{
    Arrow, Axis, Edit, PositionValue, RenderOptions, Rendered, Tag, TagKind, TagValue, TokenSpan,
    edit_tag, locate_tag, render_tag,
};
use tracing::{debug, debug_span, info, trace, warn};

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};
use crate::event::KeyEvent;
use crate::menu::insert_menu;
use crate::surface::{ChoiceSurface, TextSurface};

/// Live editing state for one host.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    config: SessionConfig,
}

impl Session {
    /// Enumerate fonts from `source` and start a session.
    ///
    /// Enumeration failure is logged; the session still starts, with an
    /// empty catalog, so font name lookups fail until the next session.
    pub fn start(source: &mut dyn FontSource, config: SessionConfig) -> Self {
        let catalog = match Catalog::build(source, config.key_options) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(error = %err, "font enumeration failed, starting without fonts");
                Catalog::from_faces(Vec::new(), config.key_options)
            }
        };
        Self::with_catalog(catalog, config)
    }

    /// Enumerate fonts from `source` and start a session, failing if the
    /// fonts cannot be enumerated.
    ///
    /// # Errors
    ///
    /// [`SessionError::Catalog`] when enumeration fails.
    pub fn try_start(source: &mut dyn FontSource, config: SessionConfig) -> Result<Self> {
        let catalog = Catalog::build(source, config.key_options)?;
        Ok(Self::with_catalog(catalog, config))
    }

    /// Start a session around a catalog built elsewhere.
    #[must_use]
    pub fn with_catalog(catalog: Catalog, config: SessionConfig) -> Self {
        info!(
            fonts = catalog.len(),
            form = %catalog.key_options().form,
            "tag session started"
        );
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// End the session and release the catalog.
    pub fn end(self) {
        info!(fonts = self.catalog.len(), "tag session ended");
    }

    /// Handle a key, logging any failure.
    ///
    /// Returns `true` if the host text was changed.
    pub fn handle_key<H>(&self, host: &mut H, event: KeyEvent) -> bool
    where
        H: TextSurface + ChoiceSurface + ?Sized,
    {
        match self.try_handle_key(host, event) {
            Ok(changed) => changed,
            Err(err) => {
                warn!(error = %err, key = ?event.code, "key action abandoned");
                false
            }
        }
    }

    /// Handle a key.
    ///
    /// Returns `Ok(true)` if the host text was changed, `Ok(false)` if the
    /// key was ignored or the user dismissed a menu.
    ///
    /// # Errors
    ///
    /// Host read/write failures, ranking failures and selections that do not
    /// fit the text. The host is untouched in every error case except a
    /// failed write, where only the write itself was attempted.
    pub fn try_handle_key<H>(&self, host: &mut H, event: KeyEvent) -> Result<bool>
    where
        H: TextSurface + ChoiceSurface + ?Sized,
    {
        if !event.modifiers.contains(self.config.trigger) {
            trace!(key = ?event.code, modifiers = ?event.modifiers, "trigger not held");
            return Ok(false);
        }
        if let Some(arrow) = event.arrow() {
            return self.adjust(host, arrow, event.shift());
        }
        if event.is_char('t') || event.is_char('T') {
            return self.insert(host);
        }
        Ok(false)
    }

    // -----------------------------------------------------------------------
    // Arrow keys
    // -----------------------------------------------------------------------

    fn adjust<H>(&self, host: &mut H, arrow: Arrow, shift: bool) -> Result<bool>
    where
        H: TextSurface + ChoiceSurface + ?Sized,
    {
        let selection = host.selection();
        if selection.start != selection.end {
            trace!(?selection, "arrow ignored with a selection");
            return Ok(false);
        }
        let caret = selection.start;
        let text = host.text()?;
        check_selection(&text, &selection)?;

        let _span = debug_span!("adjust", caret, ?arrow, shift).entered();

        let tag = match locate_tag(&text, caret) {
            Some(tag) => tag,
            None if self.config.spawn_relative_position => {
                trace!("no tag under caret, spawning position");
                spawned_position(caret)
            }
            None => return Ok(false),
        };

        let (tag, field) = match edit_tag(&tag, caret, arrow, shift, &self.catalog)? {
            Edit::NoChange => {
                trace!(kind = %tag.kind(), "key has no effect");
                return Ok(false);
            }
            Edit::Changed { tag, field } => (tag, field),
            Edit::ChooseFont { tag, ranking } => {
                let names: Vec<String> = ranking
                    .top_names(&self.catalog, self.config.max_suggestions)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                debug!(suggestions = names.len(), "presenting font suggestions");
                let Some(choice) = host.present_choices(caret, &names) else {
                    debug!("font suggestions dismissed");
                    return Ok(false);
                };
                let Some(name) = names.get(choice) else {
                    warn!(choice, options = names.len(), "menu returned an unknown choice");
                    return Ok(false);
                };
                (tag.with_font_name(name), 1)
            }
        };

        let rendered = render_tag(&tag, RenderOptions::EDIT);
        let old = &text[tag.span.clone()];
        if rendered.text == old {
            trace!(tag = old, "edit leaves text unchanged");
            return Ok(false);
        }

        let mut updated = String::with_capacity(text.len() + rendered.text.len());
        updated.push_str(&text[..tag.span.start]);
        updated.push_str(&rendered.text);
        updated.push_str(&text[tag.span.end..]);
        host.set_text(&updated)?;

        let caret = placed_caret(&tag, &rendered, field, caret, &updated);
        host.set_selection(caret..caret);
        host.notify_changed();
        debug!(from = old, to = %rendered.text, caret, "tag rewritten");
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Insert menu
    // -----------------------------------------------------------------------

    fn insert<H>(&self, host: &mut H) -> Result<bool>
    where
        H: TextSurface + ChoiceSurface + ?Sized,
    {
        let selection = host.selection();
        let text = host.text()?;
        check_selection(&text, &selection)?;

        let menu = insert_menu(selection.is_empty(), &self.config.template_font);
        let labels: Vec<String> = menu.iter().map(|t| t.label.clone()).collect();
        let Some(choice) = host.present_choices(selection.end, &labels) else {
            debug!("insert menu dismissed");
            return Ok(false);
        };
        let Some(template) = menu.get(choice) else {
            warn!(choice, options = menu.len(), "menu returned an unknown choice");
            return Ok(false);
        };

        let Range { start, end } = selection;
        let mut updated =
            String::with_capacity(text.len() + template.open.len() + template.close.len());
        updated.push_str(&text[..start]);
        updated.push_str(&template.open);
        updated.push_str(&text[start..end]);
        updated.push_str(&template.close);
        updated.push_str(&text[end..]);
        host.set_text(&updated)?;

        let shift = template.open.len();
        host.set_selection(start + shift..end + shift);
        host.notify_changed();
        debug!(open = %template.open, close = %template.close, "tag inserted");
        Ok(true)
    }
}

fn check_selection(text: &str, selection: &Range<usize>) -> Result<()> {
    let (start, end) = (selection.start, selection.end);
    if start <= end && text.is_char_boundary(start) && text.is_char_boundary(end) {
        Ok(())
    } else {
        Err(SessionError::InvalidSelection {
            start,
            end,
            len: text.len(),
        })
    }
}

/// A zero-width `<p+0,+0>` at the caret, ready to be nudged.
fn spawned_position(caret: usize) -> Tag {
    let empty = Some(TokenSpan::new(caret, 0));
    Tag {
        span: caret..caret,
        tokens: [empty, empty, None],
        value: TagValue::Position(PositionValue {
            x: Axis::relative(0.0),
            y: Axis::relative(0.0),
            z: None,
        }),
    }
}

/// Caret after `tag` was rewritten as `rendered` inside `updated`.
///
/// A kept caret must still fall on a char boundary; a same-length font name
/// can move the boundaries.
fn placed_caret(
    tag: &Tag,
    rendered: &Rendered,
    field: usize,
    caret: usize,
    updated: &str,
) -> usize {
    let same_width = tag.kind() == TagKind::Color || rendered.text.len() == tag.span.len();
    if same_width && updated.is_char_boundary(caret) {
        caret
    } else if rendered.is_empty() {
        tag.span.start
    } else {
        let end = rendered
            .token(field)
            .map_or(rendered.text.len(), TokenSpan::end);
        tag.span.start + end
    }
}
