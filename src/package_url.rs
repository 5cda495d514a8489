//! Main package URL type.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, trace};

use crate::codec;
use crate::constants::{
    FORBIDDEN_SUBPATH_SEGMENTS, QUALIFIERS_SEPARATOR, SEGMENT_SEPARATOR, SUBPATH_SEPARATOR,
    TYPE_SEPARATOR, VERSION_SEPARATOR,
};
use crate::error::{Field, ParseError, ParseErrorKind};
use crate::grammar;
use crate::qualifiers::Qualifiers;
use crate::segments;

/// A parsed and validated package URL.
///
/// Every field is validated when the value is created, either by
/// [`PackageUrl::parse`], [`PackageUrl::new`] or
/// [`PackageUrlBuilder::build`](crate::PackageUrlBuilder::build), and never
/// changes afterwards.
///
/// # Structure
///
/// ```text
/// type:namespace/name@version?qualifiers#subpath
/// ```
///
/// # Examples
///
/// ```
/// use package_url::PackageUrl;
///
/// let purl = PackageUrl::parse("maven:org.apache.commons/commons-lang3@3.9").unwrap();
/// assert_eq!(purl.ty(), "maven");
/// assert_eq!(purl.namespace(), Some(&["org.apache.commons".to_string()][..]));
/// assert_eq!(purl.name(), "commons-lang3");
/// assert_eq!(purl.version(), Some("3.9"));
/// assert_eq!(purl.render(), "maven:org.apache.commons/commons-lang3@3.9");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageUrl {
    ty: String,
    namespace: Option<Vec<String>>,
    name: String,
    version: Option<String>,
    qualifiers: Option<Qualifiers>,
    subpath: Option<Vec<String>>,
}

impl PackageUrl {
    /// Parses a package URL from a string.
    ///
    /// The name, version, qualifier values and segments are percent-decoded;
    /// qualifier keys are lower-cased and qualifiers with an empty value are
    /// dropped. The type keeps its case until rendering.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input does not follow the package URL layout
    /// - The type or name does not match its character class
    /// - A namespace or subpath segment is empty, or decodes to a `/`
    /// - A subpath segment is `.` or `..`
    /// - A qualifier pair is missing its `=` or has an invalid key
    /// - A percent-escape is malformed
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        match Self::parse_inner(input) {
            Ok(purl) => {
                trace!(input, "parsed package URL");
                Ok(purl)
            }
            Err(kind) => {
                let err = ParseError::new(input, kind);
                debug!(input, error = %err, "rejected package URL");
                Err(err)
            }
        }
    }

    /// Creates a package URL from decoded field values.
    ///
    /// Every field is validated. Qualifier keys are lower-cased. Empty
    /// namespace, qualifier and subpath collections are stored as absent.
    ///
    /// # Errors
    ///
    /// Returns `ParseError`, carrying the offending value, if any field fails
    /// its validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_url::{PackageUrl, Qualifiers};
    ///
    /// let qualifiers: Qualifiers = [("type", "jar")].into_iter().collect();
    /// let purl = PackageUrl::new(
    ///     "maven",
    ///     Some(vec!["org.junit".to_string()]),
    ///     "junit",
    ///     Some("4.12".to_string()),
    ///     Some(qualifiers),
    ///     None,
    /// )
    /// .unwrap();
    /// assert_eq!(purl.to_string(), "maven:org.junit/junit@4.12?type=jar");
    /// ```
    pub fn new(
        ty: impl Into<String>,
        namespace: Option<Vec<String>>,
        name: impl Into<String>,
        version: Option<String>,
        qualifiers: Option<Qualifiers>,
        subpath: Option<Vec<String>>,
    ) -> Result<Self, ParseError> {
        let ty = ty.into();
        let name = name.into();

        grammar::check_type(&ty).map_err(|kind| Self::reject(&ty, kind))?;

        let namespace = namespace.filter(|segments| !segments.is_empty());
        if let Some(segments) = &namespace {
            segments::validate(segments, &[])
                .map_err(|e| Self::reject(&segments.join("/"), ParseErrorKind::Namespace(e)))?;
        }

        grammar::check_name(&name).map_err(|kind| Self::reject(&name, kind))?;

        if let Some(version) = &version {
            grammar::check_version(version).map_err(|kind| Self::reject(version, kind))?;
        }

        let qualifiers = match qualifiers {
            Some(qualifiers) => {
                let rendered = qualifiers.to_string();
                let canonical = qualifiers
                    .canonicalize()
                    .map_err(|e| Self::reject(&rendered, ParseErrorKind::Qualifiers(e)))?;
                Some(canonical).filter(|q| !q.is_empty())
            }
            None => None,
        };

        let subpath = subpath.filter(|segments| !segments.is_empty());
        if let Some(segments) = &subpath {
            segments::validate(segments, FORBIDDEN_SUBPATH_SEGMENTS)
                .map_err(|e| Self::reject(&segments.join("/"), ParseErrorKind::Subpath(e)))?;
        }

        Ok(Self {
            ty,
            namespace,
            name,
            version,
            qualifiers,
            subpath,
        })
    }

    /// Returns the type, in the case it was given.
    #[must_use]
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Returns the decoded namespace segments, if present.
    #[must_use]
    pub fn namespace(&self) -> Option<&[String]> {
        self.namespace.as_deref()
    }

    /// Returns the namespace as its encoded, `/`-joined form.
    ///
    /// Returns `None` when there is no namespace, never an empty string.
    #[must_use]
    pub fn namespace_as_string(&self) -> Option<String> {
        self.namespace.as_deref().map(segments::join)
    }

    /// Returns the decoded name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the decoded version, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the qualifiers, if present.
    #[must_use]
    pub const fn qualifiers(&self) -> Option<&Qualifiers> {
        self.qualifiers.as_ref()
    }

    /// Returns the decoded subpath segments, if present.
    #[must_use]
    pub fn subpath(&self) -> Option<&[String]> {
        self.subpath.as_deref()
    }

    /// Returns the subpath as its encoded, `/`-joined form.
    ///
    /// Returns `None` when there is no subpath, never an empty string.
    #[must_use]
    pub fn subpath_as_string(&self) -> Option<String> {
        self.subpath.as_deref().map(segments::join)
    }

    /// Renders the canonical form.
    ///
    /// The type is lower-cased, the name, version, qualifier values and
    /// segments are percent-encoded, and qualifiers appear in insertion
    /// order. Parsing the result yields an equal value whenever the type is
    /// already lower-case.
    ///
    /// # Examples
    ///
    /// ```
    /// use package_url::PackageUrl;
    ///
    /// let purl = PackageUrl::parse("NPM://%40angular/core@12.0.0?B=2&a=1").unwrap();
    /// assert_eq!(purl.render(), "npm:%40angular/core@12.0.0?b=2&a=1");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = self.ty.to_ascii_lowercase();
        out.push(TYPE_SEPARATOR);

        if let Some(namespace) = &self.namespace {
            out.push_str(&segments::join(namespace));
            out.push(SEGMENT_SEPARATOR);
        }

        out.push_str(&codec::encode(&self.name));

        if let Some(version) = &self.version {
            out.push(VERSION_SEPARATOR);
            out.push_str(&codec::encode(version));
        }

        if let Some(qualifiers) = &self.qualifiers {
            out.push(QUALIFIERS_SEPARATOR);
            out.push_str(&qualifiers.to_string());
        }

        if let Some(subpath) = &self.subpath {
            out.push(SUBPATH_SEPARATOR);
            out.push_str(&segments::join(subpath));
        }

        out
    }

    /// Returns a field-by-field dump for diagnostics.
    ///
    /// Unlike [`render`](Self::render) this shows decoded values and is not
    /// meant to be parsed back.
    #[must_use]
    pub fn explain(&self) -> String {
        let qualifiers = self
            .qualifiers
            .as_ref()
            .map(|q| q.iter().collect::<Vec<_>>());
        format!(
            "{{type='{}', namespace={:?}, name='{}', version={:?}, qualifiers={:?}, subpath={:?}}}",
            self.ty, self.namespace, self.name, self.version, qualifiers, self.subpath
        )
    }

    fn parse_inner(input: &str) -> Result<Self, ParseErrorKind> {
        let raw = grammar::scan(input)?;

        let namespace = raw
            .namespace
            .map(|zone| segments::split(zone, &[]))
            .transpose()
            .map_err(ParseErrorKind::Namespace)?;

        let name = decode_field(Field::Name, raw.name)?;

        let version = raw
            .version
            .map(|version| decode_field(Field::Version, version))
            .transpose()?;

        let qualifiers = raw
            .qualifiers
            .map(Qualifiers::parse)
            .transpose()
            .map_err(ParseErrorKind::Qualifiers)?;

        let subpath = raw
            .subpath
            .map(|zone| segments::split(zone, FORBIDDEN_SUBPATH_SEGMENTS))
            .transpose()
            .map_err(ParseErrorKind::Subpath)?;

        Self::new(
            raw.ty,
            namespace,
            name.into_owned(),
            version.map(Cow::into_owned),
            qualifiers,
            subpath,
        )
        .map_err(|e| e.kind)
    }

    fn reject(value: &str, kind: ParseErrorKind) -> ParseError {
        let err = ParseError::new(value, kind);
        debug!(value, error = %err, "rejected package URL field");
        err
    }
}

fn decode_field(field: Field, value: &str) -> Result<Cow<'_, str>, ParseErrorKind> {
    codec::decode(value).map_err(|source| ParseErrorKind::Encoding { field, source })
}

impl fmt::Display for PackageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl FromStr for PackageUrl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for PackageUrl {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PackageUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.render())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PackageUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
