//! Percent-encoding of package URL components.
//!
//! The encoder is compatible with the usual URL component encoder
//! (`encodeURIComponent`): ASCII letters, digits and `-_.!~*'()` stay literal,
//! every other octet of the UTF-8 representation is written as `%XX`. In
//! particular all purl delimiters (`:/@?#&=`) are escaped, so an encoded
//! component can never be mistaken for structure.
//!
//! Decoding is strict: a `%` that is not followed by two hexadecimal digits
//! is an error, as is a decoded octet sequence that is not UTF-8.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::error::EncodingError;

/// Octets that are percent-encoded in every component.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a component.
///
/// # Examples
///
/// ```
/// use package_url::codec::encode;
///
/// assert_eq!(encode("@angular"), "%40angular");
/// assert_eq!(encode("1.0 beta"), "1.0%20beta");
/// assert_eq!(encode("plain-name_1.0"), "plain-name_1.0");
/// ```
#[must_use]
pub fn encode(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, COMPONENT).into()
}

/// Decodes a percent-encoded component.
///
/// # Errors
///
/// Returns [`EncodingError::Malformed`] if a `%` is not followed by two
/// hexadecimal digits, and [`EncodingError::InvalidUtf8`] if the decoded
/// octets are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use package_url::codec::decode;
///
/// assert_eq!(decode("%40angular").unwrap(), "@angular");
/// assert!(decode("100%").is_err());
/// ```
pub fn decode(value: &str) -> Result<Cow<'_, str>, EncodingError> {
    check_escapes(value)?;
    percent_decode_str(value)
        .decode_utf8()
        .map_err(|_| EncodingError::InvalidUtf8)
}

/// Rejects `%` signs that do not start a complete escape.
fn check_escapes(value: &str) -> Result<(), EncodingError> {
    let bytes = value.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(EncodingError::Malformed { position: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
