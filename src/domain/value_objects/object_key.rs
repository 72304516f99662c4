use crate::domain::errors::ValidationError;

const MAX_KEY_BYTES: usize = 1024;

/// A validated object key in a bucket
///
/// S3 keys are arbitrary UTF-8, so only emptiness, length and NUL bytes are
/// rejected. Leading and repeated slashes are legal and kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > MAX_KEY_BYTES {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: MAX_KEY_BYTES,
            });
        }

        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        Ok(Self(value))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if this key has the given prefix
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ObjectKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl serde::Serialize for ObjectKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
