/// Validation errors for domain value objects
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    // ObjectKey validation errors
    EmptyObjectKey,
    ObjectKeyTooLong {
        actual: usize,
        max: usize,
    },
    InvalidObjectKeyCharacter(char),

    // BucketName validation errors
    EmptyBucketName,
    BucketNameTooLong {
        actual: usize,
        max: usize,
    },
    BucketNameInvalidCharacter(char),

    // VersionId validation errors
    EmptyVersionId,
    VersionIdTooLong {
        actual: usize,
        max: usize,
    },

    // RetainCount validation errors
    RetainCountNotAnInteger(String),
    RetainCountNotPositive(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ObjectKey errors
            ValidationError::EmptyObjectKey => write!(f, "Object key cannot be empty"),
            ValidationError::ObjectKeyTooLong { actual, max } => {
                write!(f, "Object key too long: {} bytes (max: {})", actual, max)
            }
            ValidationError::InvalidObjectKeyCharacter(c) => {
                write!(f, "Invalid character in object key: {:?}", c)
            }

            // BucketName errors
            ValidationError::EmptyBucketName => write!(f, "Bucket name cannot be empty"),
            ValidationError::BucketNameTooLong { actual, max } => {
                write!(
                    f,
                    "Bucket name too long: {} characters (max: {})",
                    actual, max
                )
            }
            ValidationError::BucketNameInvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character in bucket name: '{}'. Only letters, numbers, '.', '_' and '-' \
                     allowed",
                    c
                )
            }

            // VersionId errors
            ValidationError::EmptyVersionId => write!(f, "Version ID cannot be empty"),
            ValidationError::VersionIdTooLong { actual, max } => {
                write!(
                    f,
                    "Version ID too long: {} characters (max: {})",
                    actual, max
                )
            }

            // RetainCount errors
            ValidationError::RetainCountNotAnInteger(value) => {
                write!(f, "{} is not an integer", value)
            }
            ValidationError::RetainCountNotPositive(value) => {
                write!(f, "{} is not a valid positive integer (>0)", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
