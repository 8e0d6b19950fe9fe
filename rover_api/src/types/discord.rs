use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::de::null_as_default;

/// A Discord account as embedded in RoVer responses (Discord's own field names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub discriminator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_flags: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: u64,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub accent_color: Option<u32>,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar_decoration_data: Option<serde_json::Value>,
    #[serde(default)]
    pub banner_color: Option<String>,
    #[serde(default)]
    pub clan: Option<serde_json::Value>,
}

impl DiscordUser {
    /// Global display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// A guild member: the user plus guild-specific attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscordGuildMember {
    pub user: DiscordUser,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub communication_disabled_until: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: u64,
    #[serde(default)]
    pub joined_at: Option<String>, // ISO8601
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending: bool,
    #[serde(default)]
    pub premium_since: Option<String>, // ISO8601
    #[serde(default, deserialize_with = "null_as_default")]
    pub mute: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub deaf: bool,
    #[serde(default)]
    pub banner: Option<String>,
    #[serde(default)]
    pub unusual_dm_activity_until: Option<String>,
    /// Fields Discord added that this crate does not model yet.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl DiscordGuildMember {
    /// Guild nickname, then global name, then username.
    pub fn display_name(&self) -> &str {
        self.nick.as_deref().unwrap_or_else(|| self.user.display_name())
    }

    pub fn has_role(&self, role_id: &str) -> bool {
        self.roles.iter().any(|r| r == role_id)
    }
}

/// Result of a Roblox → Discord lookup. `discord_users` may be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscordInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub discord_users: Vec<DiscordGuildMember>,
    pub roblox_id: u64,
    #[serde(default)]
    pub guild_id: Option<String>,
}
