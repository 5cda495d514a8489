//! Builder for constructing [`PackageUrl`] instances field by field.
//!
//! The builder only accumulates values. Validation happens once, in
//! [`PackageUrlBuilder::build`], through the same constructor used by the
//! parser.

use tracing::debug;

use crate::constants::FORBIDDEN_SUBPATH_SEGMENTS;
use crate::error::{BuilderError, Field};
use crate::package_url::PackageUrl;
use crate::qualifiers::Qualifiers;
use crate::segments;

/// A builder for [`PackageUrl`] instances.
///
/// Namespace, qualifiers and subpath can be given either as structured,
/// decoded values or as raw, percent-encoded strings; raw strings are split
/// exactly the way the parser splits them.
///
/// # Examples
///
/// ```
/// use package_url::PackageUrlBuilder;
///
/// let purl = PackageUrlBuilder::new()
///     .ty("maven")
///     .try_namespace("org.apache.commons")?
///     .name("commons-lang3")
///     .version("3.9")
///     .qualifier("classifier", "sources")
///     .build()?;
///
/// assert_eq!(
///     purl.render(),
///     "maven:org.apache.commons/commons-lang3@3.9?classifier=sources"
/// );
/// # Ok::<(), package_url::BuilderError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageUrlBuilder {
    ty: Option<String>,
    namespace: Option<Vec<String>>,
    name: Option<String>,
    version: Option<String>,
    qualifiers: Option<Qualifiers>,
    subpath: Option<Vec<String>>,
}

impl PackageUrlBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the type.
    #[must_use]
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    /// Sets the decoded namespace segments.
    #[must_use]
    pub fn namespace<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespace = Some(segments.into_iter().map(Into::into).collect());
        self
    }

    /// Splits and sets the namespace from its raw, percent-encoded form.
    ///
    /// An empty string clears the namespace.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Segments`] if a segment is empty, cannot be
    /// decoded, or decodes to a `/`.
    pub fn try_namespace(mut self, raw: &str) -> Result<Self, BuilderError> {
        self.namespace = split_raw(Field::Namespace, raw, &[])?;
        Ok(self)
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets or clears the version.
    #[must_use]
    pub fn maybe_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    /// Sets all qualifiers, replacing any set before.
    #[must_use]
    pub fn qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers = Some(qualifiers);
        self
    }

    /// Parses and sets the qualifiers from their raw `k=v&k=v` form.
    ///
    /// An empty string clears the qualifiers.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Qualifiers`] if a pair is missing its `=`,
    /// has an invalid key, or cannot be decoded.
    pub fn try_qualifiers(mut self, raw: &str) -> Result<Self, BuilderError> {
        if raw.is_empty() {
            self.qualifiers = None;
            return Ok(self);
        }
        let qualifiers = Qualifiers::parse(raw).map_err(|source| BuilderError::Qualifiers {
            value: raw.to_string(),
            source,
        })?;
        self.qualifiers = Some(qualifiers);
        Ok(self)
    }

    /// Adds a single qualifier; a repeated key replaces the earlier value.
    #[must_use]
    pub fn qualifier(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifiers
            .get_or_insert_with(Qualifiers::new)
            .insert(key, value);
        self
    }

    /// Sets the decoded subpath segments.
    #[must_use]
    pub fn subpath<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subpath = Some(segments.into_iter().map(Into::into).collect());
        self
    }

    /// Splits and sets the subpath from its raw, percent-encoded form.
    ///
    /// An empty string clears the subpath.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Segments`] if a segment is empty, cannot be
    /// decoded, decodes to a `/`, or is `.` or `..`.
    pub fn try_subpath(mut self, raw: &str) -> Result<Self, BuilderError> {
        self.subpath = split_raw(Field::Subpath, raw, FORBIDDEN_SUBPATH_SEGMENTS)?;
        Ok(self)
    }

    /// Builds the final [`PackageUrl`].
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::MissingField`] if the type or name was never
    /// set, and [`BuilderError::Invalid`] if any field fails validation.
    pub fn build(self) -> Result<PackageUrl, BuilderError> {
        let Some(ty) = self.ty else {
            return Err(missing(Field::Type));
        };
        let Some(name) = self.name else {
            return Err(missing(Field::Name));
        };

        let purl = PackageUrl::new(
            ty,
            self.namespace,
            name,
            self.version,
            self.qualifiers,
            self.subpath,
        )?;
        Ok(purl)
    }
}

fn missing(field: Field) -> BuilderError {
    debug!(%field, "package URL builder is missing a required field");
    BuilderError::MissingField { field }
}

fn split_raw(
    field: Field,
    raw: &str,
    forbidden: &[&'static str],
) -> Result<Option<Vec<String>>, BuilderError> {
    if raw.is_empty() {
        return Ok(None);
    }
    segments::split(raw, forbidden)
        .map(Some)
        .map_err(|source| BuilderError::Segments {
            field,
            value: raw.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseErrorKind, QualifierError, SegmentError};

    #[test]
    fn build_minimal() {
        let purl = PackageUrlBuilder::new().ty("cargo").name("serde").build().unwrap();
        assert_eq!(purl.render(), "cargo:serde");
    }

    #[test]
    fn build_matches_parse() {
        let built = PackageUrlBuilder::new()
            .ty("maven")
            .name("junit")
            .version("4.12")
            .build()
            .unwrap();
        let parsed = PackageUrl::parse("maven:junit@4.12").unwrap();
        assert_eq!(built.render(), parsed.render());
        assert_eq!(built, parsed);
    }

    #[test]
    fn build_uses_type_not_name() {
        let purl = PackageUrlBuilder::new().ty("npm").name("lodash").build().unwrap();
        assert_eq!(purl.ty(), "npm");
        assert_eq!(purl.name(), "lodash");
    }

    #[test]
    fn build_without_type_fails() {
        let result = PackageUrlBuilder::new().name("x").build();
        assert!(matches!(
            result,
            Err(BuilderError::MissingField { field: Field::Type })
        ));
    }

    #[test]
    fn build_without_name_fails() {
        let result = PackageUrlBuilder::new().ty("t").build();
        assert!(matches!(
            result,
            Err(BuilderError::MissingField { field: Field::Name })
        ));
    }

    #[test]
    fn build_invalid_type_fails() {
        let result = PackageUrlBuilder::new().ty("1t").name("n").build();
        assert!(matches!(
            result,
            Err(BuilderError::Invalid(e)) if matches!(e.kind, ParseErrorKind::InvalidField { field: Field::Type, .. })
        ));
    }

    #[test]
    fn raw_namespace_is_split_like_parser() {
        let from_raw = PackageUrlBuilder::new()
            .ty("t")
            .try_namespace("/%40scope/sub/")
            .unwrap()
            .name("n")
            .build()
            .unwrap();
        let from_list = PackageUrlBuilder::new()
            .ty("t")
            .namespace(["@scope", "sub"])
            .name("n")
            .build()
            .unwrap();
        assert_eq!(from_raw, from_list);
        assert_eq!(from_raw, PackageUrl::parse("t:%40scope/sub/n").unwrap());
    }

    #[test]
    fn raw_empty_string_clears_field() {
        let purl = PackageUrlBuilder::new()
            .ty("t")
            .namespace(["a"])
            .try_namespace("")
            .unwrap()
            .try_subpath("")
            .unwrap()
            .try_qualifiers("")
            .unwrap()
            .name("n")
            .build()
            .unwrap();
        assert_eq!(purl.namespace(), None);
        assert_eq!(purl.subpath(), None);
        assert_eq!(purl.qualifiers(), None);
    }

    #[test]
    fn raw_namespace_with_empty_segment_fails() {
        let result = PackageUrlBuilder::new().try_namespace("a//b");
        assert!(matches!(
            result,
            Err(BuilderError::Segments {
                field: Field::Namespace,
                source: SegmentError::Empty { index: 1 },
                ..
            })
        ));
    }

    #[test]
    fn raw_subpath_traversal_fails() {
        let result = PackageUrlBuilder::new().try_subpath("a/../b");
        assert!(matches!(
            result,
            Err(BuilderError::Segments {
                field: Field::Subpath,
                source: SegmentError::IllegalContent { content: "..", .. },
                ..
            })
        ));
    }

    #[test]
    fn structured_subpath_traversal_fails_at_build() {
        let result = PackageUrlBuilder::new()
            .ty("t")
            .name("n")
            .subpath(["..", "etc"])
            .build();
        assert!(matches!(result, Err(BuilderError::Invalid(e)) if e.is_illegal_segment_content()));
    }

    #[test]
    fn raw_qualifiers_are_parsed() {
        let purl = PackageUrlBuilder::new()
            .ty("t")
            .name("n")
            .try_qualifiers("OS=linux&empty=&arch=x86%5F64")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(purl.render(), "t:n?os=linux&arch=x86_64");
    }

    #[test]
    fn raw_qualifiers_without_separator_fail() {
        let result = PackageUrlBuilder::new().try_qualifiers("flag");
        assert!(matches!(
            result,
            Err(BuilderError::Qualifiers {
                source: QualifierError::MissingSeparator { .. },
                ..
            })
        ));
    }

    #[test]
    fn qualifier_last_write_wins() {
        let purl = PackageUrlBuilder::new()
            .ty("t")
            .name("n")
            .qualifier("a", "1")
            .qualifier("b", "2")
            .qualifier("a", "3")
            .build()
            .unwrap();
        assert_eq!(purl.render(), "t:n?a=3&b=2");
    }

    #[test]
    fn qualifier_with_empty_value_fails_at_build() {
        let result = PackageUrlBuilder::new()
            .ty("t")
            .name("n")
            .qualifier("a", "")
            .build();
        assert!(matches!(result, Err(BuilderError::Invalid(_))));
    }

    #[test]
    fn qualifier_with_ampersand_fails_at_build() {
        let result = PackageUrlBuilder::new()
            .ty("t")
            .name("n")
            .qualifier("k", "a&b")
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::Invalid(e))
                if matches!(e.kind, ParseErrorKind::Qualifiers(QualifierError::IllegalValue { .. }))
        ));

        let result = PackageUrlBuilder::new().try_qualifiers("k=a%26b");
        assert!(matches!(
            result,
            Err(BuilderError::Qualifiers {
                source: QualifierError::IllegalValue { .. },
                ..
            })
        ));
    }

    #[test]
    fn maybe_version_clears() {
        let purl = PackageUrlBuilder::new()
            .ty("t")
            .name("n")
            .version("1")
            .maybe_version(None)
            .build()
            .unwrap();
        assert_eq!(purl.version(), None);
    }

    #[test]
    fn builder_is_reusable_via_clone() {
        let base = PackageUrlBuilder::new().ty("pypi").name("django");
        let a = base.clone().version("1.11").build().unwrap();
        let b = base.build().unwrap();
        assert_eq!(a.version(), Some("1.11"));
        assert_eq!(b.version(), None);
    }
}
