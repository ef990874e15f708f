/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::SigningError;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};
use std::path::Path;

const PKCS1_HEADER: &str = "BEGIN RSA PRIVATE KEY";
const PKCS8_HEADER: &str = "BEGIN PRIVATE KEY";
const ENCRYPTED_PKCS8_HEADER: &str = "BEGIN ENCRYPTED PRIVATE KEY";
// Legacy OpenSSL encryption marker inside a PKCS#1 block
const ENCRYPTED_PKCS1_MARKER: &str = "Proc-Type: 4,ENCRYPTED";

/// RSA private key used to sign access policies.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    inner: Box<RsaPrivateKey>,
}

impl PrivateKey {
    /// Loads an unencrypted RSA private key from PEM-encoded bytes.
    ///
    /// Both PKCS#1 (`BEGIN RSA PRIVATE KEY`) and PKCS#8 (`BEGIN PRIVATE KEY`) encodings are
    /// accepted. Passphrase-protected keys are rejected.
    pub fn from_pem(bytes: &[u8]) -> Result<Self, SigningError> {
        let pem_str = std::str::from_utf8(bytes).map_err(SigningError::invalid_key)?;

        if pem_str.contains(ENCRYPTED_PKCS8_HEADER) || pem_str.contains(ENCRYPTED_PKCS1_MARKER) {
            return Err(SigningError::invalid_key_message(
                "passphrase-protected keys are not supported",
            ));
        }

        let key = if pem_str.contains(PKCS1_HEADER) {
            RsaPrivateKey::from_pkcs1_pem(pem_str).map_err(SigningError::invalid_key)?
        } else if pem_str.contains(PKCS8_HEADER) {
            RsaPrivateKey::from_pkcs8_pem(pem_str).map_err(SigningError::invalid_key)?
        } else {
            return Err(SigningError::invalid_key_message(
                "unsupported key format, expected an RSA key in PKCS#1 or PKCS#8 PEM encoding",
            ));
        };

        tracing::debug!(modulus_bits = key.size() * 8, "loaded RSA private key");
        Ok(Self {
            inner: Box::new(key),
        })
    }

    /// Reads and loads an unencrypted RSA private key from a PEM file.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, SigningError> {
        let bytes = std::fs::read(path.as_ref()).map_err(SigningError::invalid_key)?;
        Self::from_pem(&bytes)
    }

    /// Size of the RSA modulus in bytes. Every signature has exactly this length.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// The public half of this key, for verifying signatures it produced.
    pub fn public_key(&self) -> RsaPublicKey {
        self.inner.to_public_key()
    }

    /// Signs `message` with RSASSA-PKCS1-v1_5 over a SHA-1 digest.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        let digest = Sha1::digest(message);
        self.inner
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
            .map_err(SigningError::signing_failure)
    }
}

/// Loads the PEM-encoded RSA private key in `private_key_pem` and signs `message` with it.
pub fn sign(private_key_pem: &[u8], message: &[u8]) -> Result<Vec<u8>, SigningError> {
    PrivateKey::from_pem(private_key_pem)?.sign(message)
}
