/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Encodings applied to the variable parts of a signed login URL.
//!
//! The `Policy` and `Signature` values and the `RedirectTo` value use different percent-encoding
//! sets. Edge servers decode each field independently, so the sets must not be merged.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in base64 query values: everything but ASCII letters and digits.
///
/// This escapes `+`, `/` and `=` from the base64 alphabet.
pub(crate) const BASE64_VALUE_SET: &AsciiSet = NON_ALPHANUMERIC;

/// Characters escaped in the redirect path: everything outside the RFC 3986 unreserved set.
///
/// `/` is escaped, and a space becomes `%20` rather than `+`.
pub(crate) const REDIRECT_PATH_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Standard-alphabet, padded base64, percent-encoded for use as a query value.
pub(crate) fn base64_query_value(data: &[u8]) -> String {
    let encoded = base64_simd::STANDARD.encode_to_string(data);
    utf8_percent_encode(&encoded, BASE64_VALUE_SET).to_string()
}

pub(crate) fn redirect_path_value(path: &str) -> String {
    utf8_percent_encode(path, REDIRECT_PATH_SET).to_string()
}
