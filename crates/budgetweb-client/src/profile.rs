//! Token to user resolution

use budgetweb_core::{BearerToken, UserProfile};

use crate::{ApiClient, ClientResult};

#[derive(Clone, Debug)]
pub struct ProfileRepository {
    client: ApiClient,
}

impl ProfileRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/profile` for the token's owner
    pub async fn profile(&self, token: &BearerToken) -> ClientResult<UserProfile> {
        let url = self.client.url(&["profile"]);
        self.client.get_json(token, &url, "profile").await
    }
}
