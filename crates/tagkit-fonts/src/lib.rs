#![forbid(unsafe_code)]

//! Font name lookup for tag editing.
//!
//! - [`Catalog`] - sorted, deduplicated font display names with precomputed
//!   comparison keys
//! - [`ComparisonKey`] - normalized, case-folded and kana-folded name form
//! - [`rank`] - O(NP) similarity ranking of a query against the catalog
//!
//! # Example
//! ```
//! use tagkit_fonts::{Catalog, KeyOptions, rank};
//!
//! let catalog = Catalog::from_names(["Verdana", "Arial", "Arial Black"], KeyOptions::default());
//! assert_eq!(catalog.index_of("Arial"), Some(0));
//!
//! let ranking = rank(&catalog, "arial").unwrap();
//! assert_eq!(ranking.top_names(&catalog, 2), ["Arial", "Arial Black"]);
//! ```

pub mod catalog;
pub mod kana;
pub mod key;
pub mod ranker;

#[cfg(feature = "system")]
pub use catalog::SystemFonts;
pub use catalog::{
    Catalog, CatalogEntry, CatalogError, FontFace, FontSource, MAX_NAME_CHARS, StaticFonts,
    fits_font_field,
};
pub use kana::fold_kana;
pub use key::{ComparisonKey, KeyOptions, NormalizationForm};
pub use ranker::{RankError, Ranking, Score, Similarity, edit_distance, rank};
