//! `application/x-www-form-urlencoded` component decoding.
//!
//! `+` becomes a space and `%HH` becomes the byte `0xHH`. A `%` that is not
//! followed by two hex digits is rejected rather than passed through.

use std::borrow::Cow;

use memchr::memchr2;

use crate::error::ErrorKind;

/// Percent-decode a single key or value.
///
/// Input without any `%` or `+` is returned borrowed. Decoded bytes that are
/// not UTF-8 are replaced lossily unless `strict_utf8` is set.
///
/// # Example
///
/// ```rust
/// use php_parse_str_core::decode::decode_component;
///
/// assert_eq!(decode_component("a+b%21", false).unwrap(), "a b!");
/// assert!(decode_component("100%", false).is_err());
/// ```
pub fn decode_component(input: &str, strict_utf8: bool) -> Result<Cow<'_, str>, ErrorKind> {
    let bytes = input.as_bytes();
    let Some(first) = memchr2(b'%', b'+', bytes) else {
        return Ok(Cow::Borrowed(input));
    };

    let mut out = Vec::with_capacity(bytes.len());
    out.extend_from_slice(&bytes[..first]);

    let mut pos = first;
    while pos < bytes.len() {
        match bytes[pos] {
            b'+' => {
                out.push(b' ');
                pos += 1;
            }
            b'%' => {
                out.push(decode_escape(bytes, pos)?);
                pos += 3;
            }
            _ => {
                // Copy the plain run up to the next escape in one go.
                let run = memchr2(b'%', b'+', &bytes[pos..]).unwrap_or(bytes.len() - pos);
                out.extend_from_slice(&bytes[pos..pos + run]);
                pos += run;
            }
        }
    }

    match String::from_utf8(out) {
        Ok(s) => Ok(Cow::Owned(s)),
        Err(_) if strict_utf8 => Err(ErrorKind::InvalidUtf8),
        Err(e) => Ok(Cow::Owned(
            String::from_utf8_lossy(e.as_bytes()).into_owned(),
        )),
    }
}

/// Decode the `%HH` escape starting at `pos`.
#[inline]
fn decode_escape(bytes: &[u8], pos: usize) -> Result<u8, ErrorKind> {
    let invalid = || ErrorKind::InvalidPercentEncoding { position: pos };
    let hi = bytes.get(pos + 1).copied().and_then(hex_value).ok_or_else(invalid)?;
    let lo = bytes.get(pos + 2).copied().and_then(hex_value).ok_or_else(invalid)?;
    Ok((hi << 4) | lo)
}

#[inline(always)]
fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
