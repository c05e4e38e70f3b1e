//! Session data structure and its storage mapping

use enhancer_api::User;
use enhancer_storage::Database;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Storage key of the bearer token (plain string).
pub const TOKEN_KEY: &str = "token";
/// Storage key of the user profile (JSON object).
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: String, user: User) -> Self {
        Self { token, user }
    }

    /// Read the persisted session. No token (or an empty one) means logged
    /// out. A missing or unreadable user decodes to the empty user.
    pub fn load(db: &Database) -> Result<Option<Self>> {
        let token = match db.get_item(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(None),
        };

        let user = match db.get_item(USER_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "Stored user is not valid JSON, using empty user");
                User::default()
            }),
            None => User::default(),
        };

        Ok(Some(Self { token, user }))
    }

    /// Write both keys in one transaction.
    pub fn persist(&self, db: &Database) -> Result<()> {
        let user_json = serde_json::to_string(&self.user)?;
        db.set_items(&[(TOKEN_KEY, self.token.as_str()), (USER_KEY, user_json.as_str())])?;
        Ok(())
    }

    pub fn clear(db: &Database) -> Result<()> {
        db.remove_items(&[TOKEN_KEY, USER_KEY])?;
        Ok(())
    }
}
