use async_trait::async_trait;

use crate::{
    client::{parse_json_if_ok, RoverClient},
    error::RoverError,
    types::update::UpdateResult,
    util::guild_url,
};

#[async_trait]
pub trait UpdateApi {
    /// Ask RoVer to recompute and apply a member's roles and nickname.
    ///
    /// Needs RoVer Plus on the guild; without it RoVer refuses and this
    /// returns [`RoverError::Authentication`].
    async fn update_user(&self, guild_id: u64, user_id: u64) -> Result<UpdateResult, RoverError>;
}

#[async_trait]
impl UpdateApi for RoverClient {
    async fn update_user(&self, guild_id: u64, user_id: u64) -> Result<UpdateResult, RoverError> {
        let url = guild_url(&self.base_url, guild_id, "update", user_id);
        let resp = self.authed_post_empty(&url).await?;
        parse_json_if_ok(resp).await
    }
}
