#![forbid(unsafe_code)]

//! The font catalog: enumerated, deduplicated and sorted display names.
//!
//! A [`Catalog`] is built once per editing session from a [`FontSource`] and
//! is read-only afterwards. Entries keep the display name exactly as
//! enumerated (minus a leading `@` vertical-writing prefix) together with a
//! precomputed [`ComparisonKey`].
//!
//! # Invariants
//!
//! 1. Entries are unique by display name (ordinal equality). Two names that
//!    normalize to the same key are both kept.
//! 2. Entries are sorted by display name in code point order; the key plays
//!    no part in ordering.
//! 3. Raster-only faces and names whose key is empty never enter the catalog.
//! 4. Every name fits a tag's font field: no `,`, `<` or `>`, and at most
//!    [`MAX_NAME_CHARS`] chars.

use std::fmt;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use crate::key::{ComparisonKey, KeyOptions};

/// Longest font name, in chars, a tag can carry.
pub const MAX_NAME_CHARS: usize = 255;

/// Whether `name` can be written into a tag's font field unchanged.
#[must_use]
pub fn fits_font_field(name: &str) -> bool {
    !name.contains([',', '<', '>']) && name.chars().count() <= MAX_NAME_CHARS
}

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The host could not enumerate its fonts.
    Enumeration(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enumeration(reason) => write!(f, "font enumeration failed: {reason}"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// One face reported by a [`FontSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    /// Family name as the environment reports it.
    pub name: String,
    /// Bitmap-only family. These are skipped.
    pub raster: bool,
}

impl FontFace {
    /// A scalable (outline) face.
    #[must_use]
    pub fn outline(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raster: false,
        }
    }

    /// A bitmap-only face.
    #[must_use]
    pub fn raster(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raster: true,
        }
    }
}

/// Something that can enumerate the font families available to the host.
pub trait FontSource {
    /// Enumerate every face, in discovery order.
    fn enumerate(&mut self) -> Result<Vec<FontFace>, CatalogError>;
}

/// A fixed list of faces, for hosts that enumerate fonts themselves.
#[derive(Debug, Clone, Default)]
pub struct StaticFonts(pub Vec<FontFace>);

impl StaticFonts {
    /// Outline faces from a list of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(FontFace::outline).collect())
    }
}

impl FontSource for StaticFonts {
    fn enumerate(&mut self) -> Result<Vec<FontFace>, CatalogError> {
        Ok(self.0.clone())
    }
}

impl<F> FontSource for F
where
    F: FnMut() -> Result<Vec<FontFace>, CatalogError>,
{
    fn enumerate(&mut self) -> Result<Vec<FontFace>, CatalogError> {
        self()
    }
}

/// Installed font families, enumerated through the platform backends.
///
/// Every family the backends report is scalable, so nothing is marked raster.
#[cfg(feature = "system")]
#[derive(Default)]
pub struct SystemFonts {
    collection: Option<fontique::Collection>,
}

#[cfg(feature = "system")]
impl SystemFonts {
    /// Create a source; the platform collection is opened lazily.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "system")]
impl fmt::Debug for SystemFonts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemFonts")
            .field("opened", &self.collection.is_some())
            .finish()
    }
}

#[cfg(feature = "system")]
impl FontSource for SystemFonts {
    fn enumerate(&mut self) -> Result<Vec<FontFace>, CatalogError> {
        let collection = self.collection.get_or_insert_with(|| {
            fontique::Collection::new(fontique::CollectionOptions {
                shared: false,
                system_fonts: true,
            })
        });
        let faces: Vec<FontFace> = collection.family_names().map(FontFace::outline).collect();
        if faces.is_empty() {
            return Err(CatalogError::Enumeration(
                "no font families reported by the system".to_string(),
            ));
        }
        Ok(faces)
    }
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    name: String,
    key: ComparisonKey,
}

impl CatalogEntry {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Comparison key used for ranking.
    #[must_use]
    pub fn key(&self) -> &ComparisonKey {
        &self.key
    }
}

/// Sorted, deduplicated, immutable list of available font names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    options: KeyOptions,
}

impl Catalog {
    /// A catalog with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Enumerate `source` and build the catalog.
    ///
    /// Enumeration is attempted once; a failure is returned unchanged.
    pub fn build(source: &mut dyn FontSource, options: KeyOptions) -> Result<Self, CatalogError> {
        let faces = source.enumerate()?;
        Ok(Self::from_faces(faces, options))
    }

    /// Build a catalog from already enumerated faces.
    pub fn from_faces<I>(faces: I, options: KeyOptions) -> Self
    where
        I: IntoIterator<Item = FontFace>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut entries = Vec::new();
        let mut skipped_raster = 0usize;

        for face in faces {
            if face.raster {
                skipped_raster += 1;
                continue;
            }
            let name = face.name.strip_prefix('@').unwrap_or(&face.name);
            if seen.contains(name) {
                continue;
            }
            if !fits_font_field(name) {
                warn!(name = %face.name, "skipping font name that cannot appear in a tag");
                continue;
            }
            let key = ComparisonKey::new(name, options);
            if key.is_empty() {
                warn!(name = %face.name, "skipping font whose comparison key is empty");
                continue;
            }
            seen.insert(name.to_string());
            entries.push(CatalogEntry {
                name: name.to_string(),
                key,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(
            entries = entries.len(),
            skipped_raster,
            form = %options.form,
            "font catalog built"
        );
        Self { entries, options }
    }

    /// Convenience: outline faces from plain names.
    pub fn from_names<I, S>(names: I, options: KeyOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_faces(names.into_iter().map(FontFace::outline), options)
    }

    /// Options the comparison keys were derived with.
    #[must_use]
    pub fn key_options(&self) -> KeyOptions {
        self.options
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Display name at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(CatalogEntry::name)
    }

    /// Index of the entry whose display name equals `name` exactly.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
    }

    /// Iterate over entries in sorted order.
    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Iterate over display names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(CatalogEntry::name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
