use serde::{Deserialize, Serialize};

/// Result of a Discord → Roblox lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RobloxInfo {
    pub roblox_id: u64,
    #[serde(default)]
    pub cached_username: Option<String>,
    #[serde(default)]
    pub discord_id: Option<String>,
    #[serde(default)]
    pub guild_id: Option<String>,
}
