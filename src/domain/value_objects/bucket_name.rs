use crate::domain::errors::ValidationError;

const MAX_LEN: usize = 255;

/// Bucket to list or prune
///
/// Only emptiness, length and the character set are checked. Shorter or
/// IP-shaped legacy names that some endpoints still serve are left for the
/// backend to accept or refuse.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketName(String);

impl BucketName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyBucketName);
        }
        if value.len() > MAX_LEN {
            return Err(ValidationError::BucketNameTooLong {
                actual: value.len(),
                max: MAX_LEN,
            });
        }

        if let Some(bad) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_')))
        {
            return Err(ValidationError::BucketNameInvalidCharacter(bad));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BucketName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for BucketName {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}
