#![forbid(unsafe_code)]

use std::fmt;

use tagkit_fonts::{CatalogError, RankError};

use crate::surface::SurfaceError;

/// Why a session action was abandoned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The host text surface failed.
    Surface(SurfaceError),
    /// Font ranking failed.
    Rank(RankError),
    /// Font enumeration failed.
    Catalog(CatalogError),
    /// The host selection does not fit the text.
    InvalidSelection { start: usize, end: usize, len: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(e) => write!(f, "{e}"),
            Self::Rank(e) => write!(f, "{e}"),
            Self::Catalog(e) => write!(f, "{e}"),
            Self::InvalidSelection { start, end, len } => {
                write!(f, "selection {start}..{end} does not fit text of {len} bytes")
            }
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Surface(e) => Some(e),
            Self::Rank(e) => Some(e),
            Self::Catalog(e) => Some(e),
            Self::InvalidSelection { .. } => None,
        }
    }
}

impl From<SurfaceError> for SessionError {
    fn from(e: SurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<RankError> for SessionError {
    fn from(e: RankError) -> Self {
        Self::Rank(e)
    }
}

impl From<CatalogError> for SessionError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

/// Result alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
