use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored account. `password` holds the bcrypt hash, never the plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub active: bool,
    pub admin: bool,
    pub created_date: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, username: &str, email: &str, password_hash: &str) -> Self {
        User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            active: true,
            admin: false,
            created_date: Utc::now(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity::from(self)
    }
}

/// The part of a user the auth gate and access policy care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub active: bool,
    pub admin: bool,
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Identity {
            id: user.id,
            active: user.active,
            admin: user.admin,
        }
    }
}

/// Fields accepted when creating an account; ids are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub active: bool,
    pub admin: bool,
}

impl NewUser {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            password: self.password_hash,
            active: self.active,
            admin: self.admin,
            created_date: Utc::now(),
        }
    }
}

/// Partial update applied to a stored user. `None` leaves the field alone.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "password", skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
}

impl UserChanges {
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password = hash.clone();
        }
        if let Some(active) = self.active {
            user.active = active;
        }
        if let Some(admin) = self.admin {
            user.admin = admin;
        }
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(id: i64, username: &str) -> Self {
        User::new(id, username, &format!("{}@example.com", username), "hash")
    }

    pub fn test_admin(id: i64, username: &str) -> Self {
        User {
            admin: true,
            ..User::test_user(id, username)
        }
    }
}
