/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::SigningError;
use aws_smithy_async::time::SharedTimeSource;
use aws_smithy_types::{DateTime, Number};
use std::borrow::Cow;
use std::fmt::Write;

const SECONDS_PER_DAY: i64 = 86_400;
const RESOURCE_WILDCARD: &str = "/*";

/// Single-statement access policy granting access to everything under a distribution URL
/// until an expiration time.
///
/// The JSON form produced by [`Policy::to_json`] is the exact byte sequence that gets signed,
/// so it is whitespace-free and its keys are always written in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    resource: String,
    expires_at: i64,
}

impl Policy {
    /// Creates a policy covering `resource_url` and everything below it.
    ///
    /// The resource URL is used as-is; `/*` is appended to form the resource pattern.
    pub fn new(resource_url: &str, expires_at: DateTime) -> Self {
        Self {
            resource: format!("{resource_url}{RESOURCE_WILDCARD}"),
            expires_at: expires_at.secs(),
        }
    }

    /// The resource pattern, including the trailing wildcard.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Expiration as seconds since the Unix epoch.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// Serializes the policy into its canonical JSON form.
    pub fn to_json(&self) -> String {
        let mut out = String::new();
        let mut root = aws_smithy_json::serialize::JsonObjectWriter::new(&mut out);

        let mut statement_array = root.key("Statement").start_array();
        let mut statement = statement_array.value().start_object();

        statement
            .key("Resource")
            .string_unchecked(&escape_ascii_only(&self.resource));

        let mut condition = statement.key("Condition").start_object();
        let mut date_less = condition.key("DateLessThan").start_object();
        date_less
            .key("AWS:EpochTime")
            .number(epoch_number(self.expires_at));
        date_less.finish();
        condition.finish();

        statement.finish();
        statement_array.finish();
        root.finish();

        out
    }

    /// Canonical JSON form as UTF-8 bytes. These are the bytes that get signed.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_json().into_bytes()
    }
}

/// Escapes `value` for a JSON string so that the output is printable ASCII only.
///
/// `"` and `\` get a backslash, `\b \f \n \r \t` use their short forms, and every other
/// character outside `' '..='~'` becomes `\uXXXX` (lowercase hex), with characters above
/// U+FFFF written as a UTF-16 surrogate pair.
fn escape_ascii_only(value: &str) -> Cow<'_, str> {
    if value.bytes().all(|b| (b' '..=b'~').contains(&b) && b != b'"' && b != b'\\') {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{08}' => escaped.push_str("\\b"),
            '\u{0c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            ' '..='~' => escaped.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units).iter() {
                    // writing to a String never fails
                    let _ = write!(escaped, "\\u{unit:04x}");
                }
            }
        }
    }
    Cow::Owned(escaped)
}

fn epoch_number(secs: i64) -> Number {
    match u64::try_from(secs) {
        Ok(secs) => Number::PosInt(secs),
        Err(_) => Number::NegInt(secs),
    }
}

/// Parses an expiration given as a whole number of days.
///
/// Zero and negative values are accepted; they produce policies that are already expired
/// (or expire immediately).
///
/// Surrounding whitespace is ignored, and single underscores may separate digit groups
/// (`1_000`).
pub fn parse_expiration_days(input: &str) -> Result<i64, SigningError> {
    let not_a_number = |source: Option<Box<dyn std::error::Error + Send + Sync>>| {
        SigningError::invalid_expiration(
            format!("`{input}` is not a whole number of days"),
            source,
        )
    };

    let trimmed = input.trim();
    let digits = trimmed.trim_start_matches(['+', '-']);
    let bytes = digits.as_bytes();
    let misplaced_underscore = bytes.iter().enumerate().any(|(i, b)| {
        *b == b'_'
            && !(i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).map_or(false, u8::is_ascii_digit))
    });
    if misplaced_underscore {
        return Err(not_a_number(None));
    }

    trimmed
        .replace('_', "")
        .parse::<i64>()
        .map_err(|err| not_a_number(Some(err.into())))
}

/// Returns the epoch second `days` days after `now`.
pub(crate) fn expires_after_days(now: DateTime, days: i64) -> Result<i64, SigningError> {
    days.checked_mul(SECONDS_PER_DAY)
        .and_then(|offset| now.secs().checked_add(offset))
        .ok_or_else(|| {
            SigningError::invalid_expiration(format!("{days} days is out of range"), None)
        })
}

/// Builds the access policy for `resource_url` expiring `expiration_days` days from now.
///
/// "Now" is read from `time_source`, truncated to whole seconds.
pub fn build_policy(
    resource_url: &str,
    expiration_days: &str,
    time_source: &SharedTimeSource,
) -> Result<Policy, SigningError> {
    let days = parse_expiration_days(expiration_days)?;
    let now = DateTime::from(time_source.now());
    let expires_at = expires_after_days(now, days)?;
    let policy = Policy::new(resource_url, DateTime::from_secs(expires_at));
    tracing::debug!(policy = %policy.to_json(), "built access policy");
    Ok(policy)
}
