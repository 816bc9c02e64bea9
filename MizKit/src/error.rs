//! Error types for `MizKit`

use thiserror::Error;

/// The error type for `MizKit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Archive Errors ====================
    /// The zip container could not be read or written.
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// One of the entries every mission archive must carry is absent.
    #[error("archive entry not found: {0}")]
    MissingArchiveEntry(String),

    /// The finished archive could not be moved into place.
    #[error("failed to persist archive: {0}")]
    Persist(#[from] tempfile::PersistError),

    // ==================== Table Literal Errors ====================
    /// Table-literal text could not be decoded.
    #[error("syntax error at {line}:{column}: {message}")]
    LuaSyntax {
        /// 1-based line of the offending token.
        line: usize,
        /// 1-based column of the offending token.
        column: usize,
        /// What the decoder expected.
        message: String,
    },

    // ==================== Mission Model Errors ====================
    /// A required key is missing or has the wrong shape during import.
    #[error("structural mismatch at {path}: {reason}")]
    StructuralMismatch {
        /// Dotted key path, e.g. `mission.coalition.blue.country.1.id`.
        path: String,
        /// What was expected at that path.
        reason: String,
    },

    /// A localized string was resolved for an id with no entry.
    #[error("missing translation for '{id}' in language {lang}")]
    MissingTranslation {
        /// Dictionary id.
        id: String,
        /// Language the lookup was made in.
        lang: String,
    },

    /// A builder-level lookup did not match anything.
    #[error("{what} not found: {name}")]
    NotFound {
        /// Kind of entity searched for.
        what: &'static str,
        /// The name or id searched for.
        name: String,
    },

    /// Source content that the model does not represent.
    #[error("unsupported feature at {path}: {feature}")]
    UnsupportedFeature {
        /// Where the content was found.
        path: String,
        /// What kind of content it is.
        feature: String,
    },

    /// A coalition outside the three sides a mission file can carry.
    #[error("unknown coalition '{0}', expected blue, red or neutral")]
    UnknownCoalition(String),

    /// A unit or group was added to a container of another kind.
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind the container holds.
        expected: &'static str,
        /// Kind that was offered.
        found: &'static str,
    },

    // ==================== Parsing Errors ====================
    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Shorthand for a [`Error::StructuralMismatch`] at `path`.
    pub(crate) fn structural(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::StructuralMismatch {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for `MizKit` operations.
pub type Result<T> = std::result::Result<T, Error>;
