// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! BIP-32 derivation paths

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::SignerError;

/// Hardened-derivation flag of a path component
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// A parsed BIP-32 derivation path such as `44'/60'/0'/0/0`.
///
/// Components are stored the way devices expect them: plain `u32` indices
/// with [`HARDENED_BIT`] set for hardened steps. An optional `m/` prefix is
/// accepted and `h` is accepted as a synonym for `'`. [`Display`](fmt::Display)
/// renders the canonical form without the prefix.
///
/// # Examples
///
/// ```
/// use erc20_relay::DerivationPath;
///
/// let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
/// assert_eq!(path.components()[0], 44 | 0x8000_0000);
/// assert_eq!(path.to_string(), "44'/60'/0'/0/0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// Build a path from raw components.
    pub fn from_components(components: Vec<u32>) -> Result<Self, SignerError> {
        if components.is_empty() {
            return Err(SignerError::invalid_path("", "path has no components"));
        }
        Ok(Self(components))
    }

    /// The first Ethereum account, `44'/60'/0'/0/0`.
    pub fn ethereum_default() -> Self {
        Self(vec![
            44 | HARDENED_BIT,
            60 | HARDENED_BIT,
            HARDENED_BIT,
            0,
            0,
        ])
    }

    /// Raw components with the hardened bit applied.
    pub fn components(&self) -> &[u32] {
        &self.0
    }
}

impl Default for DerivationPath {
    fn default() -> Self {
        Self::ethereum_default()
    }
}

impl FromStr for DerivationPath {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("m/")
            .or_else(|| trimmed.strip_prefix("M/"))
            .unwrap_or(trimmed);
        if body.is_empty() {
            return Err(SignerError::invalid_path(s, "path has no components"));
        }

        let mut components = Vec::new();
        for segment in body.split('/') {
            let (digits, hardened) = match segment
                .strip_suffix('\'')
                .or_else(|| segment.strip_suffix('h'))
            {
                Some(digits) => (digits, true),
                None => (segment, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(SignerError::invalid_path(
                    s,
                    format!("`{segment}` is not a path index"),
                ));
            }
            let index: u32 = digits
                .parse()
                .map_err(|_| SignerError::invalid_path(s, format!("`{segment}` is out of range")))?;
            if index & HARDENED_BIT != 0 {
                return Err(SignerError::invalid_path(
                    s,
                    format!("`{segment}` is out of range"),
                ));
            }
            components.push(if hardened { index | HARDENED_BIT } else { index });
        }

        Ok(Self(components))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            if component & HARDENED_BIT != 0 {
                write!(f, "{}'", component & !HARDENED_BIT)?;
            } else {
                write!(f, "{component}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
