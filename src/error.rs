//! Error types for package URL parsing and construction.

use std::fmt;

/// The fields of a package URL, used to locate validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// The package type (`maven`, `npm`, ...)
    Type,
    /// The namespace segments
    Namespace,
    /// The package name
    Name,
    /// The package version
    Version,
    /// The qualifier pairs
    Qualifiers,
    /// The subpath segments
    Subpath,
}

impl Field {
    /// Returns the field name as used in diagnostics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Namespace => "namespace",
            Self::Name => "name",
            Self::Version => "version",
            Self::Qualifiers => "qualifiers",
            Self::Subpath => "subpath",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when a package URL is rejected.
///
/// This is the general "invalid package URL" error. The more specific
/// failure classes (empty segment, illegal segment content, malformed
/// percent-encoding) are reachable through the `kind` field and the
/// `is_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that was rejected
    pub input: String,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(input: impl Into<String>, kind: ParseErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// Returns true if a namespace or subpath segment was empty.
    #[must_use]
    pub const fn is_empty_segment(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::Namespace(SegmentError::Empty { .. })
                | ParseErrorKind::Subpath(SegmentError::Empty { .. })
        )
    }

    /// Returns true if a decoded segment contained a forbidden value.
    #[must_use]
    pub const fn is_illegal_segment_content(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::Namespace(SegmentError::IllegalContent { .. })
                | ParseErrorKind::Subpath(SegmentError::IllegalContent { .. })
        )
    }

    /// Returns true if a percent-escape could not be decoded.
    #[must_use]
    pub const fn is_malformed_encoding(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::Encoding { .. }
                | ParseErrorKind::Namespace(SegmentError::Encoding { .. })
                | ParseErrorKind::Subpath(SegmentError::Encoding { .. })
                | ParseErrorKind::Qualifiers(QualifierError::Encoding { .. })
        )
    }
}

/// Specific rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The input does not follow the `type:namespace/name@version?qualifiers#subpath` layout
    Grammar {
        /// What part of the layout was violated
        reason: &'static str,
    },
    /// A field value does not match its character class
    InvalidField {
        /// The offending field
        field: Field,
        /// Reason for invalidity
        reason: &'static str,
    },
    /// A name or version could not be percent-decoded
    Encoding {
        /// The offending field
        field: Field,
        /// The decoding failure
        source: EncodingError,
    },
    /// A namespace segment was rejected
    Namespace(SegmentError),
    /// A subpath segment was rejected
    Subpath(SegmentError),
    /// A qualifier pair was rejected
    Qualifiers(QualifierError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid package URL '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Grammar { reason } => write!(f, "{reason}"),
            ParseErrorKind::InvalidField { field, reason } => {
                write!(f, "invalid {field}: {reason}")
            }
            ParseErrorKind::Encoding { field, source } => {
                write!(f, "cannot decode {field}: {source}")
            }
            ParseErrorKind::Namespace(e) => write!(f, "invalid namespace: {e}"),
            ParseErrorKind::Subpath(e) => write!(f, "invalid subpath: {e}"),
            ParseErrorKind::Qualifiers(e) => write!(f, "invalid qualifiers: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ParseErrorKind::Encoding { source, .. } => Some(source),
            ParseErrorKind::Namespace(e) | ParseErrorKind::Subpath(e) => Some(e),
            ParseErrorKind::Qualifiers(e) => Some(e),
            ParseErrorKind::Grammar { .. } | ParseErrorKind::InvalidField { .. } => None,
        }
    }
}

/// Errors for percent-decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// A `%` is not followed by two hexadecimal digits
    Malformed {
        /// Byte offset of the `%`
        position: usize,
    },
    /// The decoded octets are not valid UTF-8
    InvalidUtf8,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { position } => write!(
                f,
                "malformed percent-escape at position {position}; expected '%' followed by two hex digits"
            ),
            Self::InvalidUtf8 => write!(f, "decoded octets are not valid UTF-8"),
        }
    }
}

impl std::error::Error for EncodingError {}

/// Errors for namespace and subpath segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentError {
    /// Segment is empty
    Empty {
        /// Index of the segment
        index: usize,
    },
    /// Decoded segment is a separator or a forbidden literal
    IllegalContent {
        /// Index of the segment
        index: usize,
        /// The forbidden content that was found
        content: &'static str,
    },
    /// Segment could not be percent-decoded
    Encoding {
        /// Index of the segment
        index: usize,
        /// The decoding failure
        source: EncodingError,
    },
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { index } => write!(f, "segment {index} is empty"),
            Self::IllegalContent { index, content } => {
                write!(f, "segment {index} contains illegal content '{content}'")
            }
            Self::Encoding { index, source } => write!(f, "segment {index}: {source}"),
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding { source, .. } => Some(source),
            Self::Empty { .. } | Self::IllegalContent { .. } => None,
        }
    }
}

/// Errors for qualifier parsing and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QualifierError {
    /// A pair has no `=` between key and value
    MissingSeparator {
        /// The offending pair
        pair: String,
    },
    /// Key does not match `[A-Za-z.\-_][A-Za-z0-9.\-_]*`
    InvalidKey {
        /// The offending key
        key: String,
    },
    /// Value is empty
    EmptyValue {
        /// Key of the offending pair
        key: String,
    },
    /// Decoded value contains the pair separator `&`
    IllegalValue {
        /// Key of the offending pair
        key: String,
    },
    /// Value could not be percent-decoded
    Encoding {
        /// Key of the offending pair
        key: String,
        /// The decoding failure
        source: EncodingError,
    },
}

impl fmt::Display for QualifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { pair } => {
                write!(f, "qualifier '{pair}' is missing '=' between key and value")
            }
            Self::InvalidKey { key } => write!(
                f,
                "invalid qualifier key '{key}'; keys must start with a letter, '.', '-' or '_' and contain only letters, digits, '.', '-' or '_'"
            ),
            Self::EmptyValue { key } => write!(f, "qualifier '{key}' has an empty value"),
            Self::IllegalValue { key } => {
                write!(f, "qualifier '{key}' has a value containing '&'")
            }
            Self::Encoding { key, source } => write!(f, "qualifier '{key}': {source}"),
        }
    }
}

impl std::error::Error for QualifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can occur when building a package URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// A required field was never set
    MissingField {
        /// The missing field
        field: Field,
    },
    /// A raw string handed to the builder could not be split
    Segments {
        /// The field being set
        field: Field,
        /// The raw value
        value: String,
        /// The segment failure
        source: SegmentError,
    },
    /// A raw qualifier string handed to the builder could not be parsed
    Qualifiers {
        /// The raw value
        value: String,
        /// The qualifier failure
        source: QualifierError,
    },
    /// The assembled fields were rejected by validation
    Invalid(ParseError),
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::Segments {
                field,
                value,
                source,
            } => write!(f, "invalid {field} '{value}': {source}"),
            Self::Qualifiers { value, source } => {
                write!(f, "invalid qualifiers '{value}': {source}")
            }
            Self::Invalid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for BuilderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MissingField { .. } => None,
            Self::Segments { source, .. } => Some(source),
            Self::Qualifiers { source, .. } => Some(source),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<ParseError> for BuilderError {
    fn from(e: ParseError) -> Self {
        Self::Invalid(e)
    }
}
