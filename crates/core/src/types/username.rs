//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is empty or only whitespace.
    #[error("username cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a control character.
    #[error("username cannot contain control characters")]
    ControlCharacter,
}

/// A store account username.
///
/// Usernames are the unique key of an account. Surrounding whitespace is
/// trimmed; the remaining text is kept exactly as typed (case-sensitive).
///
/// ## Constraints
///
/// - Length: 1-64 characters after trimming
/// - No control characters
///
/// ## Examples
///
/// ```
/// use loja_core::Username;
///
/// assert_eq!(Username::parse("  alice ").unwrap().as_str(), "alice");
/// assert!(Username::parse("João").is_ok());
///
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Maximum length of a username, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`] characters, or contains control characters.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UsernameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_usernames() {
        assert!(Username::parse("alice").is_ok());
        assert!(Username::parse("Maria Clara").is_ok());
        assert!(Username::parse("user_01").is_ok());
        assert!(Username::parse("a").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let username = Username::parse("\t bob \n").unwrap();
        assert_eq!(username.as_str(), "bob");
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_ne!(Username::parse("Alice").unwrap(), Username::parse("alice").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse("    "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "x".repeat(Username::MAX_LENGTH + 1);
        assert_eq!(
            Username::parse(&long),
            Err(UsernameError::TooLong {
                max: Username::MAX_LENGTH
            })
        );
        assert!(Username::parse(&"x".repeat(Username::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_parse_counts_characters_not_bytes() {
        let accented = "é".repeat(Username::MAX_LENGTH);
        assert!(Username::parse(&accented).is_ok());
    }

    #[test]
    fn test_parse_control_character() {
        assert_eq!(
            Username::parse("ali\u{0}ce"),
            Err(UsernameError::ControlCharacter)
        );
    }

    #[test]
    fn test_serde_validates() {
        let username: Username = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(username.as_str(), "carol");
        assert!(serde_json::from_str::<Username>("\"   \"").is_err());
        assert_eq!(serde_json::to_string(&username).unwrap(), "\"carol\"");
    }
}
