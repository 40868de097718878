use base64::{engine::general_purpose::STANDARD, Engine};
use cmis_core::SessionEntries;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A user name and password read from the session, wiped on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Read `user_key`/`password_key`. Without a user there are no
    /// credentials; a missing password is empty.
    pub fn from_entries(
        entries: &SessionEntries,
        user_key: &str,
        password_key: &str,
    ) -> Option<Self> {
        let user = entries.get_str(user_key)?;
        let password = entries.get_str(password_key).unwrap_or_default();
        Some(Self::new(user, password))
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// `Basic base64(user:password)`
    pub fn basic_authorization(&self) -> String {
        let mut pair = format!("{}:{}", self.user, self.password);
        let value = format!("Basic {}", STANDARD.encode(pair.as_bytes()));
        pair.zeroize();
        value
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
