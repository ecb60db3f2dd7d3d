use reqwest::Method;
use store::{Profile, ProfileUpdate};

use super::{eq_filter, returning, single};
use crate::client::RemoteClient;
use crate::error::ApiError;

impl RemoteClient {
    /// The profile row of `user_id`, `None` while the backend has not created it yet.
    pub async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        let mut url = eq_filter(self.rest_url("profiles"), "id", user_id);
        url.query_pairs_mut().append_pair("select", "*");
        let req = self.authorized(Method::GET, url).await;
        let rows: Vec<Profile> = self.send(req).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn update_profile(&self, user_id: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let url = eq_filter(self.rest_url("profiles"), "id", user_id);
        let req = returning(self.authorized(Method::PATCH, url).await).json(update);
        let rows: Vec<Profile> = self.send(req).await?;
        let profile = single(rows, "Profile")?;
        tracing::info!("Profile {} updated", profile.id);
        Ok(profile)
    }
}
