use crate::phone::PhoneNumber;

/// What the phone-entry and verification screens hand to `login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub phone_number: PhoneNumber,
    pub otp: Option<String>,
}

impl Credentials {
    pub fn phone(phone_number: PhoneNumber) -> Self {
        Self {
            phone_number,
            otp: None,
        }
    }

    pub fn with_otp(mut self, otp: impl Into<String>) -> Self {
        self.otp = Some(otp.into());
        self
    }
}
