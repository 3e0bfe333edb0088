use crate::error::{ModelError, Result};

/// Number of digits in a national phone number.
pub const PHONE_NUMBER_LEN: usize = 10;

const COUNTRY_PREFIX: &str = "+91";

/// A validated 10-digit national phone number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse an already-sanitized number. Exactly ten ASCII digits.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() == PHONE_NUMBER_LEN
            && raw.bytes().all(|b| b.is_ascii_digit())
        {
            Ok(Self(raw.to_string()))
        } else {
            Err(ModelError::InvalidPhoneNumber(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display form used on the verification screen, e.g. `+91 98765 43210`.
    pub fn display(&self) -> String {
        let (head, tail) = self.0.split_at(5);
        format!("{COUNTRY_PREFIX} {head} {tail}")
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Strip everything but digits from raw keyboard input and cap the result at
/// [`PHONE_NUMBER_LEN`] characters.
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_NUMBER_LEN)
        .collect()
}
