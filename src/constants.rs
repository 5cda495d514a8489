//! Delimiters and reserved values of the package URL grammar.

/// Separates the type from the rest of the package URL.
pub const TYPE_SEPARATOR: char = ':';

/// Optional authority marker accepted (and dropped) right after the type separator.
pub const AUTHORITY_MARKER: &str = "//";

/// Separates namespace segments from each other and from the name.
pub const SEGMENT_SEPARATOR: char = '/';

/// Introduces the version.
pub const VERSION_SEPARATOR: char = '@';

/// Introduces the qualifiers.
pub const QUALIFIERS_SEPARATOR: char = '?';

/// Separates qualifier pairs.
pub const QUALIFIER_PAIR_SEPARATOR: char = '&';

/// Separates a qualifier key from its value.
pub const QUALIFIER_KV_SEPARATOR: char = '=';

/// Introduces the subpath.
pub const SUBPATH_SEPARATOR: char = '#';

/// Subpath segments that would allow directory traversal.
pub const FORBIDDEN_SUBPATH_SEGMENTS: &[&str] = &[".", ".."];
