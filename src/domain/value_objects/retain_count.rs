use crate::domain::errors::ValidationError;
use std::num::NonZeroUsize;

/// Number of most recent versions kept per key, always at least one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RetainCount(NonZeroUsize);

impl RetainCount {
    pub fn new(value: usize) -> Result<Self, ValidationError> {
        NonZeroUsize::new(value)
            .map(Self)
            .ok_or_else(|| ValidationError::RetainCountNotPositive(value.to_string()))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl std::fmt::Display for RetainCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RetainCount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::RetainCountNotAnInteger(s.to_string()))?;

        if value <= 0 {
            return Err(ValidationError::RetainCountNotPositive(s.to_string()));
        }

        let value = usize::try_from(value)
            .map_err(|_| ValidationError::RetainCountNotAnInteger(s.to_string()))?;
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        let retain: RetainCount = "2".parse().unwrap();
        assert_eq!(retain.get(), 2);
    }

    #[test]
    fn test_rejects_zero_and_negative() {
        assert_eq!(
            "0".parse::<RetainCount>(),
            Err(ValidationError::RetainCountNotPositive("0".to_string()))
        );
        assert_eq!(
            "-3".parse::<RetainCount>(),
            Err(ValidationError::RetainCountNotPositive("-3".to_string()))
        );
        assert!(RetainCount::new(0).is_err());
    }

    #[test]
    fn test_rejects_non_integer() {
        let err = "two".parse::<RetainCount>().unwrap_err();
        assert_eq!(err.to_string(), "two is not an integer");
        assert!("1.5".parse::<RetainCount>().is_err());
    }
}
