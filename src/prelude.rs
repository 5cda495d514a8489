//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use package_url::prelude::*;
//!
//! let purl = PackageUrl::parse("cargo:rand@0.8.5").unwrap();
//! assert_eq!(purl.name(), "rand");
//! ```

pub use crate::{
    // Core types
    PackageUrl, Qualifiers,
    // Builder
    PackageUrlBuilder,
    // Errors
    BuilderError, EncodingError, Field, ParseError, ParseErrorKind, QualifierError, SegmentError,
};
