use crate::domain::errors::ValidationError;

/// Opaque identifier of one revision of an object
///
/// Backends choose the format (S3 ids are URL-safe base64-ish strings, an
/// unversioned object reports `null`), so no character set is enforced.
/// Ordering is plain string ordering and carries no recency guarantee on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VersionId(String);

impl VersionId {
    /// Create a new VersionId with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyVersionId);
        }

        if value.len() > 1024 {
            return Err(ValidationError::VersionIdTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        Ok(Self(value))
    }

    /// Get the version ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for VersionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl serde::Serialize for VersionId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
