//! Identifiers for legal entities, securities, quotes and curve buckets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A scheme-qualified identifier such as `OG~UK_GOVT`.
///
/// Serialized as the `scheme~value` string so it can key maps in JSON and
/// TOML documents.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StandardId {
    scheme: String,
    value: String,
}

impl StandardId {
    /// Creates an identifier from a scheme and a value.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidIdentifier` if either part is empty or the
    /// scheme contains the `~` separator.
    pub fn of(scheme: impl Into<String>, value: impl Into<String>) -> CoreResult<Self> {
        let scheme = scheme.into();
        let value = value.into();
        if scheme.is_empty() || value.is_empty() {
            return Err(CoreError::invalid_identifier(
                format!("{scheme}~{value}"),
                "scheme and value must be non-empty",
            ));
        }
        if scheme.contains('~') {
            return Err(CoreError::invalid_identifier(scheme, "scheme must not contain '~'"));
        }
        Ok(Self { scheme, value })
    }

    /// The scheme part.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The value part.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for StandardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.scheme, self.value)
    }
}

impl FromStr for StandardId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, value) = s
            .split_once('~')
            .ok_or_else(|| CoreError::invalid_identifier(s, "expected 'scheme~value'"))?;
        Self::of(scheme, value)
    }
}

impl TryFrom<String> for StandardId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<StandardId> for String {
    fn from(id: StandardId) -> Self {
        id.to_string()
    }
}

macro_rules! standard_id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(StandardId);

        impl $name {
            /// Creates the identifier from a scheme and a value.
            pub fn of(scheme: impl Into<String>, value: impl Into<String>) -> CoreResult<Self> {
                StandardId::of(scheme, value).map(Self)
            }

            /// The underlying standard identifier.
            #[must_use]
            pub fn standard_id(&self) -> &StandardId {
                &self.0
            }
        }

        impl From<StandardId> for $name {
            fn from(id: StandardId) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

macro_rules! name_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates the name.
            #[must_use]
            pub fn of(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// The name as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

standard_id_type!(
    /// Identifies a legal entity, typically a bond issuer.
    LegalEntityId
);
standard_id_type!(
    /// Identifies a security, such as a government bond used as repo collateral.
    SecurityId
);
standard_id_type!(
    /// Identifies an observable market quote.
    QuoteId
);

name_type!(
    /// Bucket of legal entities or securities sharing a repo curve.
    RepoGroup
);
name_type!(
    /// Bucket of legal entities sharing an issuer curve.
    LegalEntityGroup
);
name_type!(
    /// Name of a curve.
    CurveName
);
name_type!(
    /// Name of a curve group.
    CurveGroupName
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_id() {
        let id = StandardId::of("OG", "UK_GOVT").unwrap();
        assert_eq!(id.to_string(), "OG~UK_GOVT");
        assert_eq!("OG~UK_GOVT".parse::<StandardId>().unwrap(), id);
        assert!(StandardId::of("", "X").is_err());
        assert!("NOSEP".parse::<StandardId>().is_err());
    }

    #[test]
    fn test_typed_ids_are_distinct_types() {
        let entity = LegalEntityId::of("OG", "US_GOVT").unwrap();
        let security = SecurityId::of("OG", "US_GOVT").unwrap();
        assert_eq!(entity.standard_id(), security.standard_id());
        assert_eq!(entity.to_string(), "OG~US_GOVT");
    }

    #[test]
    fn test_names() {
        let group = RepoGroup::of("UK_GROUP");
        assert_eq!(group.as_str(), "UK_GROUP");
        assert_eq!(CurveName::from("UK_REPO").to_string(), "UK_REPO");
        let json = serde_json::to_string(&group).unwrap();
        assert_eq!(json, "\"UK_GROUP\"");
    }

    #[test]
    fn test_id_serializes_as_string() {
        let id = SecurityId::of("OG", "UK_GOVT_10Y").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"OG~UK_GOVT_10Y\"");
        assert_eq!(serde_json::from_str::<SecurityId>(&json).unwrap(), id);
        assert!(serde_json::from_str::<SecurityId>("\"bad\"").is_err());
    }
}
