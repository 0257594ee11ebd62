//! Cross-resource search

use budgetweb_core::{BearerToken, SearchResult};

use crate::{ApiClient, ClientResult};

#[derive(Clone, Debug)]
pub struct SearchRepository {
    client: ApiClient,
}

impl SearchRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/search?q=<query>`.
    ///
    /// Blank queries return the empty aggregate without contacting the backend.
    pub async fn search(&self, token: &BearerToken, query: &str) -> ClientResult<SearchResult> {
        if budgetweb_utils::is_blank(query) {
            return Ok(SearchResult::default());
        }

        let url = format!(
            "{}?q={}",
            self.client.url(&["search"]),
            urlencoding::encode(query)
        );
        let result: SearchResult = self.client.get_json(token, &url, "search").await?;
        if result.is_empty() {
            log::debug!(target: "budgetweb::client", "Search returned no matches");
        } else {
            log::debug!(target: "budgetweb::client", "Search matched {} records", result.total());
        }
        Ok(result)
    }
}
