//! Asset identifier type

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::limits::ASSET_ID_LEN;

/// Unique identifier for an asset
///
/// A fixed-length ASCII alphanumeric token. The all-zero value is reserved
/// for "no reference" and can never be constructed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetId(String);

impl AssetId {
    /// Parse a token into an identifier
    pub fn parse(token: &str) -> Result<Self> {
        if Self::is_valid(token) {
            Ok(Self(token.to_string()))
        } else {
            Err(Error::InvalidIdentifier(token.to_string()))
        }
    }

    /// Check a token without allocating
    pub fn is_valid(token: &str) -> bool {
        token.len() == ASSET_ID_LEN
            && token.bytes().all(|b| b.is_ascii_alphanumeric())
            && !Self::is_reserved(token)
    }

    /// True for the all-zero "no reference" value
    pub fn is_reserved(token: &str) -> bool {
        !token.is_empty() && token.bytes().all(|b| b == b'0')
    }

    /// Take a fixed-length token from the start of `rest`
    ///
    /// Returns `None` when fewer than [`ASSET_ID_LEN`] bytes remain or the
    /// cut would land inside a multi-byte character.
    pub(crate) fn take_token(rest: &str) -> Option<&str> {
        rest.get(..ASSET_ID_LEN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AssetId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AssetId {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(Error::InvalidIdentifier(s))
        }
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
