#![forbid(unsafe_code)]

//! Tagkit public facade crate.
//!
//! Re-exports the pieces a host needs to embed tag editing, plus the pure
//! tag and font APIs for tools that work on markup directly.
//!
//! ```
//! use tagkit::prelude::*;
//!
//! let session = Session::with_catalog(
//!     Catalog::from_names(["Arial"], KeyOptions::default()),
//!     SessionConfig::default(),
//! );
//! let mut host = MemoryHost::new("<c0.9>").with_caret(3);
//! let up = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::ALT);
//! assert!(session.handle_key(&mut host, up));
//! assert_eq!(host.text, "<c1>");
//! ```

// --- Font re-exports -------------------------------------------------------

#[cfg(feature = "system-fonts")]
pub use tagkit_fonts::SystemFonts;
pub use tagkit_fonts::{
    Catalog, CatalogEntry, CatalogError, ComparisonKey, FontFace, FontSource, KeyOptions,
    MAX_NAME_CHARS, NormalizationForm, RankError, Ranking, Score, Similarity, StaticFonts,
    edit_distance, fits_font_field, rank,
};

// --- Markup re-exports -----------------------------------------------------

pub use tagkit_markup::{
    Arrow, Axis, ColorValue, Edit, FontValue, NotATag, Pause, PositionValue, RenderOptions,
    Rendered, Rgb, Tag, TagKind, TagValue, TokenSpan, edit_tag, locate_tag, parse_tag,
    parse_tag_at, render_tag,
};

// --- Session re-exports ----------------------------------------------------

#[cfg(feature = "subscriber")]
pub use tagkit_session::init_logging;
pub use tagkit_session::testing::MemoryHost;
pub use tagkit_session::{
    ChoiceSurface, KeyCode, KeyEvent, Modifiers, Session, SessionConfig, SessionError,
    SurfaceError, TagTemplate, TextSurface,
};

/// Standard result type for session APIs.
pub type Result<T> = tagkit_session::Result<T>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, ChoiceSurface, FontSource, KeyCode, KeyEvent, KeyOptions, MemoryHost,
        Modifiers, Result, Session, SessionConfig, SessionError, StaticFonts, TextSurface,
    };

    pub use tagkit_fonts as fonts;
    pub use tagkit_markup as markup;
    pub use tagkit_session as session;
}
