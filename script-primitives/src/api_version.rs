//! Opaque API compatibility tiers declared by scripts.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed ordered list of API levels the host understands, oldest to newest.
///
/// Entries are opaque tokens: membership is tested by exact match and no
/// numeric comparison is defined across them.
pub const SUPPORTED_API_VERSIONS: [&str; 8] =
    ["0.7", "1.0", "1.1", "1.2", "1.3", "1.4", "1.5", "1.6"];

/// One member of [`SUPPORTED_API_VERSIONS`].
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Creates an API version after checking membership in the supported list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedApiVersion`] when the token is not an exact
    /// match for any supported entry.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if !Self::is_supported(&token) {
            return Err(Error::UnsupportedApiVersion { version: token });
        }
        Ok(Self(token))
    }

    /// Returns the oldest supported API level.
    ///
    /// Scripts that predate the version-declaration mechanism default here.
    #[must_use]
    pub fn oldest() -> Self {
        Self(SUPPORTED_API_VERSIONS[0].to_owned())
    }

    /// Returns the newest supported API level.
    #[must_use]
    pub fn newest() -> Self {
        Self(SUPPORTED_API_VERSIONS[SUPPORTED_API_VERSIONS.len() - 1].to_owned())
    }

    /// Returns `true` when the token is a member of the supported list.
    #[must_use]
    pub fn is_supported(token: &str) -> bool {
        SUPPORTED_API_VERSIONS.contains(&token)
    }

    /// Returns the version token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ApiVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<ApiVersion> for String {
    fn from(value: ApiVersion) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_every_supported_token() {
        for token in SUPPORTED_API_VERSIONS {
            assert_eq!(ApiVersion::new(token).expect("supported").as_str(), token);
        }
    }

    #[test]
    fn rejects_unknown_token() {
        let err = ApiVersion::new("2.0").expect_err("not in the list");
        assert!(matches!(err, Error::UnsupportedApiVersion { version } if version == "2.0"));
    }

    #[test]
    fn oldest_and_newest_bracket_the_list() {
        assert_eq!(ApiVersion::oldest().as_str(), SUPPORTED_API_VERSIONS[0]);
        assert_eq!(
            ApiVersion::newest().as_str(),
            SUPPORTED_API_VERSIONS[SUPPORTED_API_VERSIONS.len() - 1]
        );
    }

    #[test]
    fn membership_is_exact_match() {
        assert!(!ApiVersion::is_supported("1.60"));
        assert!(!ApiVersion::is_supported(" 1.6"));
    }
}
