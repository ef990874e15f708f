/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Signed login URLs for restricted CloudFront distributions.
//!
//! A login URL carries a single-statement access policy covering everything under a
//! distribution URL, an RSA-SHA1 signature over that policy, the key pair ID and the
//! expiration, plus the path the login page should redirect to.
//!
//! ```no_run
//! use cloudfront_login_signer::{sign_url, PrivateKey, SigningRequest};
//!
//! # fn main() -> Result<(), cloudfront_login_signer::error::SigningError> {
//! let request = SigningRequest::builder()
//!     .distribution_url("https://d111111abcdef8.cloudfront.net")
//!     .key_pair_id("APKAEXAMPLE")
//!     .private_key(PrivateKey::from_pem_file("private_key.pem")?)
//!     .expires_in_days(7)
//!     .redirect_path("/members/index.html")
//!     .build()?;
//! println!("{}", sign_url(request)?);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

/// Error types for login URL signing.
pub mod error;
mod encoding;
mod key;
mod policy;
mod sign;

pub use key::{sign, PrivateKey};
pub use policy::{build_policy, parse_expiration_days, Policy};
pub use sign::{assemble, SignedUrl, SigningRequest, SigningRequestBuilder};

/// Sign a login URL for the distribution described by `request`
pub fn sign_url(request: SigningRequest) -> Result<SignedUrl, error::SigningError> {
    request.sign_url()
}
