#![forbid(unsafe_code)]

//! Comparison keys used for similarity ranking.
//!
//! A key is derived from a display name in three steps:
//! 1. Unicode composition normalization ([`NormalizationForm`]),
//! 2. ASCII letters uppercased,
//! 3. kana folded through [`fold_kana`](crate::kana::fold_kana).
//!
//! Keys are never displayed and never used for sort order.

use std::fmt;

use unicode_normalization::UnicodeNormalization;

use crate::kana::fold_kana;

/// Unicode composition form applied before case and kana folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NormalizationForm {
    /// Canonical composition (NFC).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "nfc"))]
    Canonical,
    /// Compatibility composition (NFKC). Also folds full-width Latin and
    /// half-width katakana.
    #[cfg_attr(feature = "serde", serde(rename = "nfkc"))]
    Compatibility,
}

impl NormalizationForm {
    /// Parse `nfc` / `nfkc` (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("nfc") {
            Some(Self::Canonical)
        } else if name.eq_ignore_ascii_case("nfkc") {
            Some(Self::Compatibility)
        } else {
            None
        }
    }
}

impl fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical => write!(f, "nfc"),
            Self::Compatibility => write!(f, "nfkc"),
        }
    }
}

/// Options controlling comparison-key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyOptions {
    /// Composition form applied first.
    pub form: NormalizationForm,
}

impl KeyOptions {
    /// Options using the given normalization form.
    #[must_use]
    pub const fn with_form(form: NormalizationForm) -> Self {
        Self { form }
    }
}

/// Normalized, case-folded and kana-folded form of a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonKey(Box<[char]>);

impl ComparisonKey {
    /// Derive the key for `name`.
    #[must_use]
    pub fn new(name: &str, options: KeyOptions) -> Self {
        let chars: Vec<char> = match options.form {
            NormalizationForm::Canonical => name.nfc().map(fold_char).collect(),
            NormalizationForm::Compatibility => name.nfkc().map(fold_char).collect(),
        };
        Self(chars.into_boxed_slice())
    }

    /// Key as a slice of scalar values.
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.0
    }

    /// Number of scalar values in the key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ComparisonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.iter() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

fn fold_char(c: char) -> char {
    fold_kana(c.to_ascii_uppercase())
}
