use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::phone::PhoneNumber;

/// Opaque user identifier issued by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque bearer credential. Wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// The signed-in user as known to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct User {
    pub id: UserId,
    pub phone_number: PhoneNumber,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub token: Option<AuthToken>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub full_name: Option<String>,
}

impl User {
    pub fn new(id: UserId, phone_number: PhoneNumber) -> Self {
        Self {
            id,
            phone_number,
            token: None,
            full_name: None,
        }
    }

    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Shallow merge: every field present in `patch` overwrites the current
    /// value, absent fields are left untouched.
    pub fn merge(&mut self, patch: UserPatch) {
        let UserPatch {
            id,
            phone_number,
            token,
            full_name,
        } = patch;

        if let Some(id) = id {
            self.id = id;
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = phone_number;
        }
        if let Some(token) = token {
            self.token = Some(token);
        }
        if let Some(full_name) = full_name {
            self.full_name = Some(full_name);
        }
    }
}

/// Field-wise partial update of a [`User`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub id: Option<UserId>,
    pub phone_number: Option<PhoneNumber>,
    pub token: Option<AuthToken>,
    pub full_name: Option<String>,
}

impl UserPatch {
    pub fn full_name(name: impl Into<String>) -> Self {
        Self {
            full_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn token(token: AuthToken) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.phone_number.is_none()
            && self.token.is_none()
            && self.full_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            UserId::new("user-1"),
            PhoneNumber::parse("9876543210").unwrap(),
        )
        .with_token(AuthToken::new("mock-jwt-token"))
    }

    #[test]
    fn merge_preserves_untouched_fields() {
        let mut user = sample_user();
        user.merge(UserPatch::full_name("Asha"));

        assert_eq!(user.full_name.as_deref(), Some("Asha"));
        assert_eq!(user.phone_number.as_str(), "9876543210");
        assert_eq!(
            user.token.as_ref().map(AuthToken::expose),
            Some("mock-jwt-token")
        );
        assert_eq!(user.id.as_str(), "user-1");
    }

    #[test]
    fn empty_patch_is_identity() {
        let mut user = sample_user();
        let before = user.clone();
        assert!(UserPatch::default().is_empty());
        user.merge(UserPatch::default());
        assert_eq!(user, before);
    }

    #[test]
    fn token_debug_is_redacted() {
        let rendered = format!("{:?}", sample_user());
        assert!(!rendered.contains("mock-jwt-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn user_serializes_with_camel_case_keys() {
        let mut user = sample_user();
        user.full_name = Some("Asha".into());

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["phoneNumber"], "9876543210");
        assert_eq!(json["fullName"], "Asha");
        assert_eq!(json["token"], "mock-jwt-token");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_phone_is_rejected_on_deserialize() {
        let json = serde_json::json!({ "id": "u", "phoneNumber": "123" });
        assert!(serde_json::from_value::<User>(json).is_err());
    }
}
