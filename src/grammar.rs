//! Character classes of the package URL fields and the delimiter scanner.
//!
//! ```text
//! purl       = type ":" [ "//" ] [ namespace "/" ] name [ "@" version ]
//!              [ "?" qualifiers ] [ "#" subpath ]
//! type       = ALPHA *( ALPHA / DIGIT / "." / "+" / "-" )
//! namespace  = segment *( "/" segment )        ; no "@" or "#"
//! name       = 1*( any char except "/" and "@" )
//! version    = 1*( any char except "?" and "#" )
//! qualifiers = key "=" value *( "&" key "=" value )
//! key        = ( ALPHA / "." / "-" / "_" ) *( ALPHA / DIGIT / "." / "-" / "_" )
//! value      = *( any char except "&" )
//! subpath    = segment *( "/" segment )
//! ```
//!
//! The scanner cuts the input from the outside in. Each step consumes one
//! delimiter and leaves a strictly shorter remainder, so no backtracking is
//! involved.

use crate::constants::{
    AUTHORITY_MARKER, QUALIFIERS_SEPARATOR, SEGMENT_SEPARATOR, SUBPATH_SEPARATOR, TYPE_SEPARATOR,
    VERSION_SEPARATOR,
};
use crate::error::{Field, ParseErrorKind};

/// Raw, still percent-encoded zones of a package URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawParts<'a> {
    pub ty: &'a str,
    /// Namespace zone including the `/` that terminates it
    pub namespace: Option<&'a str>,
    pub name: &'a str,
    pub version: Option<&'a str>,
    pub qualifiers: Option<&'a str>,
    pub subpath: Option<&'a str>,
}

/// Cuts `input` into its raw zones.
///
/// Boundary rules, applied in order:
/// 1. The subpath is everything after the first `#`.
/// 2. The qualifiers are everything after the first `?` before the subpath.
/// 3. The type is everything before the first `:`; a `//` right after it is dropped.
/// 4. The version is everything after the first `@` in what remains.
/// 5. The name is everything after the last `/` before the version; the
///    namespace zone is everything up to and including that `/`.
///
/// An empty subpath or qualifier zone is treated as absent.
pub(crate) fn scan(input: &str) -> Result<RawParts<'_>, ParseErrorKind> {
    let (rest, subpath) = cut_suffix(input, SUBPATH_SEPARATOR);
    let (rest, qualifiers) = cut_suffix(rest, QUALIFIERS_SEPARATOR);

    let Some((ty, rest)) = rest.split_once(TYPE_SEPARATOR) else {
        return Err(ParseErrorKind::Grammar {
            reason: "missing ':' after the package type",
        });
    };
    check_type(ty)?;

    let rest = rest.strip_prefix(AUTHORITY_MARKER).unwrap_or(rest);

    let (path, version) = match rest.split_once(VERSION_SEPARATOR) {
        Some((_, "")) => {
            return Err(ParseErrorKind::Grammar {
                reason: "'@' must be followed by a version",
            });
        }
        Some((path, version)) => (path, Some(version)),
        None => (rest, None),
    };

    let (namespace, name) = match path.rfind(SEGMENT_SEPARATOR) {
        Some(idx) => (Some(&path[..=idx]), &path[idx + 1..]),
        None => (None, path),
    };
    if name.is_empty() {
        return Err(ParseErrorKind::Grammar {
            reason: "missing package name",
        });
    }

    Ok(RawParts {
        ty,
        namespace,
        name,
        version,
        qualifiers,
        subpath,
    })
}

/// Returns true if `value` matches `[A-Za-z][A-Za-z0-9.+-]*`.
#[must_use]
pub fn is_valid_type(value: &str) -> bool {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
}

/// Returns true if `value` is a non-empty name without `/` or `@`.
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    !value.is_empty() && !value.contains([SEGMENT_SEPARATOR, VERSION_SEPARATOR])
}

/// Returns true if `value` is a non-empty version.
#[must_use]
pub fn is_valid_version(value: &str) -> bool {
    !value.is_empty()
}

pub(crate) fn check_type(value: &str) -> Result<(), ParseErrorKind> {
    if is_valid_type(value) {
        Ok(())
    } else {
        Err(ParseErrorKind::InvalidField {
            field: Field::Type,
            reason: "must start with an ASCII letter followed by letters, digits, '.', '+' or '-'",
        })
    }
}

pub(crate) fn check_name(value: &str) -> Result<(), ParseErrorKind> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(ParseErrorKind::InvalidField {
            field: Field::Name,
            reason: "must be non-empty and must not contain '/' or '@'",
        })
    }
}

pub(crate) fn check_version(value: &str) -> Result<(), ParseErrorKind> {
    if is_valid_version(value) {
        Ok(())
    } else {
        Err(ParseErrorKind::InvalidField {
            field: Field::Version,
            reason: "must not be empty",
        })
    }
}

/// Splits at the first `delimiter`; an empty suffix counts as absent.
fn cut_suffix(input: &str, delimiter: char) -> (&str, Option<&str>) {
    match input.split_once(delimiter) {
        Some((head, "")) => (head, None),
        Some((head, tail)) => (head, Some(tail)),
        None => (input, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_all_zones() {
        let parts = scan("maven:org.apache/commons-io@2.6?classifier=sources#src/main").unwrap();
        assert_eq!(parts.ty, "maven");
        assert_eq!(parts.namespace, Some("org.apache/"));
        assert_eq!(parts.name, "commons-io");
        assert_eq!(parts.version, Some("2.6"));
        assert_eq!(parts.qualifiers, Some("classifier=sources"));
        assert_eq!(parts.subpath, Some("src/main"));
    }

    #[test]
    fn scan_name_only() {
        let parts = scan("generic:openssl").unwrap();
        assert_eq!(parts.namespace, None);
        assert_eq!(parts.name, "openssl");
        assert_eq!(parts.version, None);
        assert_eq!(parts.qualifiers, None);
        assert_eq!(parts.subpath, None);
    }

    #[test]
    fn scan_drops_authority_marker() {
        let parts = scan("npm://%40babel/core").unwrap();
        assert_eq!(parts.ty, "npm");
        assert_eq!(parts.namespace, Some("%40babel/"));
        assert_eq!(parts.name, "core");
    }

    #[test]
    fn scan_namespace_zone_keeps_doubled_separator() {
        let parts = scan("pkg:type/a//b").unwrap();
        assert_eq!(parts.namespace, Some("type/a//"));
        assert_eq!(parts.name, "b");
    }

    #[test]
    fn scan_version_may_contain_at_sign() {
        let parts = scan("t:n@1@2").unwrap();
        assert_eq!(parts.name, "n");
        assert_eq!(parts.version, Some("1@2"));
    }

    #[test]
    fn scan_version_stops_at_qualifiers_and_subpath() {
        let parts = scan("t:n@1.0?a=b#c").unwrap();
        assert_eq!(parts.version, Some("1.0"));
        assert_eq!(parts.qualifiers, Some("a=b"));
        assert_eq!(parts.subpath, Some("c"));
    }

    #[test]
    fn scan_question_mark_inside_subpath() {
        let parts = scan("t:n#dir/file?x").unwrap();
        assert_eq!(parts.qualifiers, None);
        assert_eq!(parts.subpath, Some("dir/file?x"));
    }

    #[test]
    fn scan_empty_trailing_zones_are_absent() {
        let parts = scan("t:n?#").unwrap();
        assert_eq!(parts.qualifiers, None);
        assert_eq!(parts.subpath, None);
    }

    #[test]
    fn scan_missing_type_separator_fails() {
        assert!(matches!(scan("no-colon"), Err(ParseErrorKind::Grammar { .. })));
    }

    #[test]
    fn scan_invalid_type_fails() {
        assert!(matches!(
            scan("1pkg:name"),
            Err(ParseErrorKind::InvalidField { field: Field::Type, .. })
        ));
        assert!(matches!(
            scan(":name"),
            Err(ParseErrorKind::InvalidField { field: Field::Type, .. })
        ));
    }

    #[test]
    fn scan_missing_name_fails() {
        assert!(matches!(scan("t:"), Err(ParseErrorKind::Grammar { .. })));
        assert!(matches!(scan("t:ns/"), Err(ParseErrorKind::Grammar { .. })));
        assert!(matches!(scan("t:@1.0"), Err(ParseErrorKind::Grammar { .. })));
    }

    #[test]
    fn scan_empty_version_fails() {
        assert!(matches!(scan("t:n@"), Err(ParseErrorKind::Grammar { .. })));
    }

    #[test]
    fn type_grammar() {
        assert!(is_valid_type("maven"));
        assert!(is_valid_type("MAVEN"));
        assert!(is_valid_type("c++.x-1"));
        assert!(!is_valid_type(""));
        assert!(!is_valid_type("-npm"));
        assert!(!is_valid_type("np m"));
    }

    #[test]
    fn name_grammar() {
        assert!(is_valid_name("commons lang"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a/b"));
        assert!(!is_valid_name("a@b"));
    }
}
