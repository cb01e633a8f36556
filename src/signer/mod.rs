//! RPC signature v1.0 primitives: canonical query string, string-to-sign,
//! and the HMAC-SHA1 signature.
//!
//! These are free functions so the pipeline can be verified against the
//! documented vectors without any network access. [`DysmsClient`] feeds its
//! request parameters through them on every call.
//!
//! [`DysmsClient`]: crate::client::DysmsClient

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Percent-encoding alphabet required by the signature algorithm.
///
/// Only the RFC 3986 unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass
/// through. Space becomes `%20` (never `+`), and `*`, `!`, `'`, `(`, `)` are
/// all encoded. This is stricter than `x-www-form-urlencoded` defaults; the
/// remote verifier recomputes the signature over exactly this alphabet.
const RPC_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a single value with the signature alphabet.
pub fn percent_encode(value: &str) -> String {
    utf8_percent_encode(value, RPC_ENCODE).to_string()
}

/// Build the canonical query string for a parameter list.
///
/// Pairs whose key is exactly `Signature` are dropped, the rest are sorted by
/// key in ascending byte order, and each key and value is percent-encoded.
/// The result is deterministic: input order never matters. An empty parameter
/// list yields the empty string.
pub fn canonicalize(params: &[(String, String)]) -> String {
    let mut pairs: Vec<&(String, String)> = params
        .iter()
        .filter(|(key, _)| key != "Signature")
        .collect();
    pairs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the string-to-sign from the HTTP method and a canonical query string.
///
/// The canonical query string is percent-encoded a second time and embedded
/// as one opaque value: `{method}&%2F&{encode(cqs)}`. The double encoding is
/// part of the protocol, not an accident.
pub fn string_to_sign(method: &str, canonical_query_string: &str) -> String {
    format!(
        "{method}&{}&{}",
        percent_encode("/"),
        percent_encode(canonical_query_string)
    )
}

/// Compute the base64 signature for a string-to-sign.
///
/// HMAC-SHA1 keyed with `{secret}&` over the UTF-8 bytes, then standard
/// padded base64. Pure: the same inputs always produce the same signature.
pub fn sign(string_to_sign: &str, secret: &str) -> String {
    let key = format!("{secret}&");
    let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(string_to_sign.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
