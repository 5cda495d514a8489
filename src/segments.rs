//! Splitting and joining of `/`-delimited namespace and subpath values.

use crate::codec;
use crate::constants::SEGMENT_SEPARATOR;
use crate::error::SegmentError;

const SEPARATOR_CONTENT: &str = "/";

/// Splits a raw, percent-encoded value into decoded segments.
///
/// Exactly one leading and one trailing `/` are stripped before splitting.
/// A value that is empty after stripping yields a single empty segment and
/// is therefore rejected.
///
/// # Errors
///
/// Returns `SegmentError` if:
/// - A raw segment is empty
/// - A segment cannot be percent-decoded
/// - A decoded segment contains `/` or equals one of `forbidden`
///
/// # Examples
///
/// ```
/// use package_url::segments::split;
///
/// let segments = split("/org/apache%2Ecommons/", &[]).unwrap();
/// assert_eq!(segments, vec!["org", "apache.commons"]);
///
/// assert!(split("docs/../etc", &[".", ".."]).is_err());
/// ```
pub fn split(raw: &str, forbidden: &[&'static str]) -> Result<Vec<String>, SegmentError> {
    let stripped = raw.strip_prefix(SEGMENT_SEPARATOR).unwrap_or(raw);
    let stripped = stripped.strip_suffix(SEGMENT_SEPARATOR).unwrap_or(stripped);

    let mut segments = Vec::new();
    for (index, part) in stripped.split(SEGMENT_SEPARATOR).enumerate() {
        if part.is_empty() {
            return Err(SegmentError::Empty { index });
        }
        let decoded =
            codec::decode(part).map_err(|source| SegmentError::Encoding { index, source })?;
        check_content(index, &decoded, forbidden)?;
        segments.push(decoded.into_owned());
    }

    Ok(segments)
}

/// Validates already-decoded segments.
///
/// # Errors
///
/// Returns `SegmentError` if a segment is empty, contains `/`, or equals
/// one of `forbidden`.
pub fn validate<S: AsRef<str>>(
    segments: &[S],
    forbidden: &[&'static str],
) -> Result<(), SegmentError> {
    for (index, segment) in segments.iter().enumerate() {
        let segment = segment.as_ref();
        if segment.is_empty() {
            return Err(SegmentError::Empty { index });
        }
        check_content(index, segment, forbidden)?;
    }
    Ok(())
}

/// Percent-encodes each segment and joins them with `/`.
///
/// # Examples
///
/// ```
/// use package_url::segments::join;
///
/// assert_eq!(join(&["@babel", "core"]), "%40babel/core");
/// ```
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S]) -> String {
    let mut joined = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            joined.push(SEGMENT_SEPARATOR);
        }
        joined.push_str(&codec::encode(segment.as_ref()));
    }
    joined
}

fn check_content(
    index: usize,
    segment: &str,
    forbidden: &[&'static str],
) -> Result<(), SegmentError> {
    if segment.contains(SEGMENT_SEPARATOR) {
        return Err(SegmentError::IllegalContent {
            index,
            content: SEPARATOR_CONTENT,
        });
    }
    if let Some(&content) = forbidden.iter().find(|f| **f == segment) {
        return Err(SegmentError::IllegalContent { index, content });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FORBIDDEN_SUBPATH_SEGMENTS;
    use crate::error::EncodingError;

    #[test]
    fn split_single_segment() {
        assert_eq!(split("org.apache", &[]).unwrap(), vec!["org.apache"]);
    }

    #[test]
    fn split_strips_one_slash_each_side() {
        assert_eq!(split("/a/b/", &[]).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn split_strips_only_once() {
        assert!(matches!(split("//a", &[]), Err(SegmentError::Empty { index: 0 })));
        assert!(matches!(split("a//", &[]), Err(SegmentError::Empty { index: 1 })));
    }

    #[test]
    fn split_empty_yields_empty_segment_error() {
        assert!(matches!(split("", &[]), Err(SegmentError::Empty { index: 0 })));
        assert!(matches!(split("/", &[]), Err(SegmentError::Empty { index: 0 })));
    }

    #[test]
    fn split_inner_empty_segment_fails() {
        assert!(matches!(split("a//b", &[]), Err(SegmentError::Empty { index: 1 })));
    }

    #[test]
    fn split_decodes_segments() {
        assert_eq!(split("%40scope/pkg", &[]).unwrap(), vec!["@scope", "pkg"]);
    }

    #[test]
    fn split_rejects_encoded_separator() {
        assert!(matches!(
            split("a/b%2Fc", &[]),
            Err(SegmentError::IllegalContent { index: 1, content: "/" })
        ));
    }

    #[test]
    fn split_rejects_forbidden_literals() {
        assert!(matches!(
            split("a/./b", FORBIDDEN_SUBPATH_SEGMENTS),
            Err(SegmentError::IllegalContent { index: 1, content: "." })
        ));
        assert!(matches!(
            split("..", FORBIDDEN_SUBPATH_SEGMENTS),
            Err(SegmentError::IllegalContent { index: 0, content: ".." })
        ));
    }

    #[test]
    fn split_forbids_decoded_traversal() {
        assert!(matches!(
            split("%2E%2E/etc", FORBIDDEN_SUBPATH_SEGMENTS),
            Err(SegmentError::IllegalContent { index: 0, content: ".." })
        ));
    }

    #[test]
    fn split_allows_dots_without_forbidden_list() {
        assert_eq!(split("../x", &[]).unwrap(), vec!["..", "x"]);
    }

    #[test]
    fn split_reports_malformed_escape() {
        assert!(matches!(
            split("a/b%zz", &[]),
            Err(SegmentError::Encoding {
                index: 1,
                source: EncodingError::Malformed { position: 1 }
            })
        ));
    }

    #[test]
    fn validate_accepts_decoded_values() {
        assert!(validate(&["@scope", "a b"], &[]).is_ok());
    }

    #[test]
    fn validate_rejects_empty_and_separator() {
        assert!(matches!(
            validate(&["a", ""], &[]),
            Err(SegmentError::Empty { index: 1 })
        ));
        assert!(matches!(
            validate(&["a/b"], &[]),
            Err(SegmentError::IllegalContent { index: 0, content: "/" })
        ));
    }

    #[test]
    fn join_encodes_and_interleaves() {
        assert_eq!(join(&["a b", "c"]), "a%20b/c");
        assert_eq!(join::<&str>(&[]), "");
    }
}
