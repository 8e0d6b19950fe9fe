use async_trait::async_trait;

use crate::{
    client::{parse_json_if_ok, RoverClient},
    error::RoverError,
    types::{discord::DiscordInfo, roblox::RobloxInfo},
    util::guild_url,
};

/// Account-link lookups in both directions.
#[async_trait]
pub trait LookupApi {
    /// Roblox account linked to a Discord user in a guild.
    ///
    /// Fails with [`RoverError::NotFound`] when the user is not linked.
    async fn get_roblox_from_discord(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<RobloxInfo, RoverError>;

    /// Discord members of a guild linked to a Roblox account.
    /// No linked members is an empty result, not an error.
    async fn get_discord_from_roblox(
        &self,
        guild_id: u64,
        roblox_id: u64,
    ) -> Result<DiscordInfo, RoverError>;
}

#[async_trait]
impl LookupApi for RoverClient {
    async fn get_roblox_from_discord(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<RobloxInfo, RoverError> {
        let url = guild_url(&self.base_url, guild_id, "discord-to-roblox", user_id);
        let resp = self.authed_get(&url).await?;
        parse_json_if_ok(resp).await
    }

    async fn get_discord_from_roblox(
        &self,
        guild_id: u64,
        roblox_id: u64,
    ) -> Result<DiscordInfo, RoverError> {
        let url = guild_url(&self.base_url, guild_id, "roblox-to-discord", roblox_id);
        let resp = self.authed_get(&url).await?;
        parse_json_if_ok(resp).await
    }
}
