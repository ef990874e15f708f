/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt;

#[derive(Debug)]
pub(crate) enum ErrorKind {
    InvalidKey,
    InvalidExpiration,
    InvalidInput,
    SigningFailure,
}

/// Error type for signed login URL generation
#[derive(Debug)]
pub struct SigningError {
    kind: ErrorKind,
    source: Option<Box<dyn StdError + Send + Sync>>,
    message: Option<Cow<'static, str>>,
}

impl SigningError {
    pub(crate) fn new(
        kind: ErrorKind,
        source: Option<Box<dyn StdError + Send + Sync>>,
        message: Option<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            source,
            message,
        }
    }

    pub(crate) fn invalid_key(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::InvalidKey, Some(source.into()), None)
    }

    pub(crate) fn invalid_key_message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidKey, None, Some(message.into()))
    }

    pub(crate) fn invalid_expiration(
        message: impl Into<Cow<'static, str>>,
        source: Option<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::new(ErrorKind::InvalidExpiration, source, Some(message.into()))
    }

    pub(crate) fn invalid_input(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InvalidInput, None, Some(message.into()))
    }

    pub(crate) fn signing_failure(source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::new(ErrorKind::SigningFailure, Some(source.into()), None)
    }

    /// Returns true if the private key could not be read or parsed.
    ///
    /// This covers malformed PEM, unsupported key types and passphrase-protected keys.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidKey)
    }

    /// Returns true if the expiration could not be parsed as a whole number of days,
    /// or the resulting timestamp is out of range.
    pub fn is_invalid_expiration(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidExpiration)
    }

    /// Returns true if a required signing request field was missing.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidInput)
    }

    /// Returns true if the RSA signing operation itself failed.
    pub fn is_signing_failure(&self) -> bool {
        matches!(self.kind, ErrorKind::SigningFailure)
    }

    fn write_message(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref msg) = self.message {
            write!(f, ": {msg}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvalidKey => {
                write!(f, "invalid private key")?;
                self.write_message(f)
            }
            ErrorKind::InvalidExpiration => {
                write!(f, "invalid expiration")?;
                self.write_message(f)
            }
            ErrorKind::InvalidInput => {
                write!(f, "invalid input")?;
                self.write_message(f)
            }
            ErrorKind::SigningFailure => write!(f, "signing operation failed"),
        }
    }
}

impl StdError for SigningError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}
