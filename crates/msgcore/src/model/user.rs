use serde::{Deserialize, Serialize};

use super::snowflake::snowflake_id;

snowflake_id!(
    /// A user ID.
    UserId
);

/// A user as the host's user directory knows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

impl User {
    /// `name#1234` for legacy accounts, the bare username otherwise.
    pub fn tag(&self) -> String {
        match self.discriminator.as_deref() {
            Some(d) if d != "0" => format!("{}#{d}", self.username),
            _ => self.username.clone(),
        }
    }
}

/// The partial user object embedded in raw message records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub bot: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag() {
        let mut user = User {
            id: UserId(1),
            username: "meow".to_string(),
            discriminator: Some("0042".to_string()),
            bot: false,
        };
        assert_eq!(user.tag(), "meow#0042");

        user.discriminator = Some("0".to_string());
        assert_eq!(user.tag(), "meow");
    }
}
