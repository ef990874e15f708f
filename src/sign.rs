/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::encoding::{base64_query_value, redirect_path_value};
use crate::error::SigningError;
use crate::key::PrivateKey;
use crate::policy::{expires_after_days, Policy};
use aws_smithy_async::time::SharedTimeSource;
use aws_smithy_types::DateTime;
use std::fmt;

const LOGIN_PAGE: &str = "login.html";

#[derive(Debug, Clone)]
enum Expiration {
    DateTime(DateTime),
    Days(i64),
}

/// Request to sign a login URL for a distribution.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    pub(crate) distribution_url: String,
    pub(crate) key_pair_id: String,
    pub(crate) private_key: PrivateKey,
    pub(crate) expiration: DateTime,
    pub(crate) redirect_path: String,
}

impl SigningRequest {
    /// Creates a new builder for constructing a signing request.
    pub fn builder() -> SigningRequestBuilder {
        SigningRequestBuilder::default()
    }
}

/// Builder for [`SigningRequest`].
#[derive(Default, Debug)]
pub struct SigningRequestBuilder {
    distribution_url: Option<String>,
    key_pair_id: Option<String>,
    private_key: Option<PrivateKey>,
    expiration: Option<Expiration>,
    redirect_path: Option<String>,
    time_source: Option<SharedTimeSource>,
}

impl SigningRequestBuilder {
    /// Sets the distribution URL, without a trailing slash.
    ///
    /// The signed policy covers this URL and everything below it.
    pub fn distribution_url(mut self, url: impl Into<String>) -> Self {
        self.distribution_url = Some(url.into());
        self
    }

    /// Sets the ID of the key pair whose private half signs the policy.
    pub fn key_pair_id(mut self, id: impl Into<String>) -> Self {
        self.key_pair_id = Some(id.into());
        self
    }

    /// Sets the private key for signing.
    pub fn private_key(mut self, key: PrivateKey) -> Self {
        self.private_key = Some(key);
        self
    }

    /// Sets an absolute expiration time.
    pub fn expires_at(mut self, time: DateTime) -> Self {
        self.expiration = Some(Expiration::DateTime(time));
        self
    }

    /// Sets an expiration a whole number of days from now. Zero or negative values are allowed.
    pub fn expires_in_days(mut self, days: i64) -> Self {
        self.expiration = Some(Expiration::Days(days));
        self
    }

    /// Sets the path the login page redirects to. Defaults to an empty path.
    pub fn redirect_path(mut self, path: impl Into<String>) -> Self {
        self.redirect_path = Some(path.into());
        self
    }

    /// Overrides the clock used to resolve [`expires_in_days`](Self::expires_in_days).
    pub fn time_source(mut self, time_source: SharedTimeSource) -> Self {
        self.time_source = Some(time_source);
        self
    }

    /// Builds the signing request.
    pub fn build(self) -> Result<SigningRequest, SigningError> {
        let distribution_url = self
            .distribution_url
            .ok_or_else(|| SigningError::invalid_input("distribution_url is required"))?;

        let key_pair_id = self
            .key_pair_id
            .ok_or_else(|| SigningError::invalid_input("key_pair_id is required"))?;

        let private_key = self
            .private_key
            .ok_or_else(|| SigningError::invalid_input("private_key is required"))?;

        let expiration = self.expiration.ok_or_else(|| {
            SigningError::invalid_input(
                "expiration is required (use expires_at or expires_in_days)",
            )
        })?;

        let expiration = match expiration {
            Expiration::DateTime(dt) => dt,
            Expiration::Days(days) => {
                let time_source = self.time_source.unwrap_or_default();
                let now = DateTime::from(time_source.now());
                DateTime::from_secs(expires_after_days(now, days)?)
            }
        };

        Ok(SigningRequest {
            distribution_url,
            key_pair_id,
            private_key,
            expiration,
            redirect_path: self.redirect_path.unwrap_or_default(),
        })
    }
}

/// A signed login URL.
#[derive(Debug, Clone)]
pub struct SignedUrl {
    url: String,
}

impl SignedUrl {
    pub(crate) fn new(url: String) -> Self {
        Self { url }
    }

    /// Returns the complete signed URL as a string.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for SignedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// Assembles a signed login URL from an already-signed policy.
///
/// `policy` and `signature` are base64-encoded and then percent-encoded. `redirect_path`
/// is percent-encoded with every character outside the unreserved set escaped. `base_url`,
/// `key_id` and `expires_at` are written verbatim.
pub fn assemble(
    base_url: &str,
    key_id: &str,
    policy: &[u8],
    signature: &[u8],
    expires_at: i64,
    redirect_path: &str,
) -> String {
    format!(
        "{base_url}/{LOGIN_PAGE}?Policy={}&Signature={}&Key-Pair-Id={key_id}&Expires={expires_at}&RedirectTo={}",
        base64_query_value(policy),
        base64_query_value(signature),
        redirect_path_value(redirect_path),
    )
}

impl SigningRequest {
    pub(crate) fn sign_url(&self) -> Result<SignedUrl, SigningError> {
        let policy = Policy::new(&self.distribution_url, self.expiration);
        let policy_bytes = policy.to_bytes();
        let signature = self.private_key.sign(&policy_bytes)?;

        let url = assemble(
            &self.distribution_url,
            &self.key_pair_id,
            &policy_bytes,
            &signature,
            policy.expires_at(),
            &self.redirect_path,
        );
        tracing::debug!(
            key_pair_id = %self.key_pair_id,
            expires_at = policy.expires_at(),
            url_len = url.len(),
            "signed login URL"
        );

        Ok(SignedUrl::new(url))
    }
}
