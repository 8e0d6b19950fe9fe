use async_trait::async_trait;
use tracing::debug;

use crate::{
    client::{expect_success, RoverClient},
    error::RoverError,
    util::build_url,
};

#[async_trait]
pub trait ApiKeyApi {
    /// Revoke the API key this client holds.
    ///
    /// Once this succeeds every later call on the same client fails with
    /// [`RoverError::Authentication`].
    async fn delete_api_key(&self) -> Result<(), RoverError>;
}

#[async_trait]
impl ApiKeyApi for RoverClient {
    async fn delete_api_key(&self) -> Result<(), RoverError> {
        let url = build_url(&self.base_url, &["api-key"]);
        let resp = self.authed_delete(&url).await?;
        expect_success(resp).await?;

        self.revoke().await;
        debug!("RoVer API key revoked");
        Ok(())
    }
}
