//! Parser, validator and canonical renderer for Package URLs (purls).
//!
//! A package URL names a software package independently of the ecosystem
//! it comes from:
//!
//! ```text
//! type:namespace/name@version?qualifiers#subpath
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use package_url::PackageUrl;
//!
//! let purl = PackageUrl::parse("npm:%40angular/animation@12.3.1").unwrap();
//!
//! assert_eq!(purl.ty(), "npm");
//! assert_eq!(purl.namespace_as_string().as_deref(), Some("%40angular"));
//! assert_eq!(purl.name(), "animation");
//! assert_eq!(purl.version(), Some("12.3.1"));
//!
//! // The canonical form is a fixed point of parsing
//! let again = PackageUrl::parse(&purl.render()).unwrap();
//! assert_eq!(again, purl);
//! ```
//!
//! # Builder
//!
//! ```rust
//! use package_url::PackageUrlBuilder;
//!
//! let purl = PackageUrlBuilder::new()
//!     .ty("deb")
//!     .namespace(["debian"])
//!     .name("curl")
//!     .version("7.50.3-1")
//!     .qualifier("arch", "i386")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(purl.to_string(), "deb:debian/curl@7.50.3-1?arch=i386");
//! ```
//!
//! # Canonical Form
//!
//! | Field | Rendering |
//! |-------|-----------|
//! | type | lower-cased |
//! | namespace | segments percent-encoded, joined with `/` |
//! | name | percent-encoded |
//! | version | percent-encoded |
//! | qualifiers | keys lower-cased, values percent-encoded, insertion order |
//! | subpath | segments percent-encoded, joined with `/` |
//!
//! Qualifiers with an empty value are dropped while parsing, and empty
//! namespace, qualifier or subpath collections are stored as absent.
//!
//! # Logging
//!
//! Rejections are reported as `tracing` events at `debug` level, successful
//! parses at `trace` level. The crate never installs a subscriber.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
pub mod codec;
mod constants;
mod error;
mod grammar;
mod package_url;
pub mod prelude;
mod qualifiers;
pub mod segments;

pub use builder::PackageUrlBuilder;
pub use constants::{
    AUTHORITY_MARKER, FORBIDDEN_SUBPATH_SEGMENTS, QUALIFIER_KV_SEPARATOR,
    QUALIFIER_PAIR_SEPARATOR, QUALIFIERS_SEPARATOR, SEGMENT_SEPARATOR, SUBPATH_SEPARATOR,
    TYPE_SEPARATOR, VERSION_SEPARATOR,
};
pub use error::{
    BuilderError, EncodingError, Field, ParseError, ParseErrorKind, QualifierError, SegmentError,
};
pub use grammar::{is_valid_name, is_valid_type, is_valid_version};
pub use package_url::PackageUrl;
pub use qualifiers::Qualifiers;
