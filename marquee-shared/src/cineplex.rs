use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-letter uppercase code grouping a batch of cinemas under one venue
/// brand. Prefixes every booking transaction id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CineplexCode(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid cineplex code {0:?}: expected exactly three uppercase letters")]
pub struct CineplexCodeError(pub String);

impl CineplexCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CineplexCodeError> {
        let code = code.into();
        if code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase()) {
            Ok(Self(code))
        } else {
            Err(CineplexCodeError(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CineplexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CineplexCode {
    type Error = CineplexCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CineplexCode> for String {
    fn from(code: CineplexCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_uppercase_letters() {
        let code = CineplexCode::new("GVC").unwrap();
        assert_eq!(code.as_str(), "GVC");
        assert_eq!(code.to_string(), "GVC");
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(CineplexCode::new("gvc").is_err());
        assert!(CineplexCode::new("GV").is_err());
        assert!(CineplexCode::new("GVCX").is_err());
        assert!(CineplexCode::new("G1C").is_err());
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<CineplexCode>("\"JEM\"").is_ok());
        assert!(serde_json::from_str::<CineplexCode>("\"jem\"").is_err());
    }
}
