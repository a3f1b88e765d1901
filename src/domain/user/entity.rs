//! User entity and related types

use serde::{Deserialize, Serialize};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique login name, also the primary key
    username: String,
    /// Argon2 password hash - never exposed in serialization
    #[serde(skip_serializing, default)]
    password_hash: String,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

impl User {
    /// Create a new non-admin user
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            photo_url: None,
            is_admin: false,
        }
    }

    pub fn with_photo_url(mut self, photo_url: Option<String>) -> Self {
        self.photo_url = photo_url;
        self
    }

    pub fn with_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }

    // Getters

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Apply a partial update; fields left as `None` are untouched
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(hash) = &changes.password_hash {
            self.password_hash = hash.clone();
        }
        if let Some(first_name) = &changes.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(photo_url) = &changes.photo_url {
            self.photo_url = photo_url.clone();
        }
        if let Some(is_admin) = changes.is_admin {
            self.is_admin = is_admin;
        }
    }
}

/// Partial update of a stored user
///
/// `password_hash` is already hashed; plaintext never reaches the repository.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// `Some(None)` clears the photo
    pub photo_url: Option<Option<String>>,
    pub is_admin: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(username: &str) -> User {
        User::new(username, "hashed_password", "Test", "User", "test@example.com")
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user("alice");

        assert_eq!(user.username(), "alice");
        assert_eq!(user.password_hash(), "hashed_password");
        assert_eq!(user.first_name(), "Test");
        assert_eq!(user.last_name(), "User");
        assert_eq!(user.email(), "test@example.com");
        assert!(user.photo_url().is_none());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_user_builders() {
        let user = create_test_user("root")
            .with_admin(true)
            .with_photo_url(Some("http://img.example.com/root.png".to_string()));

        assert!(user.is_admin());
        assert_eq!(user.photo_url(), Some("http://img.example.com/root.png"));
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut user = create_test_user("alice");
        let changes = UserChanges {
            first_name: Some("Alicia".to_string()),
            ..Default::default()
        };

        user.apply(&changes);

        assert_eq!(user.first_name(), "Alicia");
        assert_eq!(user.last_name(), "User");
        assert_eq!(user.email(), "test@example.com");
        assert_eq!(user.password_hash(), "hashed_password");
    }

    #[test]
    fn test_apply_password_and_admin() {
        let mut user = create_test_user("alice");
        let changes = UserChanges {
            password_hash: Some("new_hash".to_string()),
            is_admin: Some(true),
            ..Default::default()
        };

        user.apply(&changes);

        assert_eq!(user.password_hash(), "new_hash");
        assert!(user.is_admin());
    }

    #[test]
    fn test_apply_clears_photo() {
        let mut user = create_test_user("alice")
            .with_photo_url(Some("http://img.example.com/a.png".to_string()));

        user.apply(&UserChanges {
            first_name: Some("Alicia".to_string()),
            ..Default::default()
        });
        assert_eq!(user.photo_url(), Some("http://img.example.com/a.png"));

        user.apply(&UserChanges {
            photo_url: Some(None),
            ..Default::default()
        });
        assert!(user.photo_url().is_none());
    }

    #[test]
    fn test_empty_changes() {
        assert!(UserChanges::default().is_empty());
        assert!(!UserChanges {
            email: Some("x@y.z".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!UserChanges {
            photo_url: Some(None),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = create_test_user("alice");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("\"first_name\":\"Test\""));
        assert!(json.contains("\"is_admin\":false"));
    }
}
