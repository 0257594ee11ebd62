//! Read-only reports computed by the backend

use budgetweb_core::{BearerToken, CategoryExpense, MonthlySummary};

use crate::{ApiClient, ClientResult};

#[derive(Clone, Debug)]
pub struct AnalyticsRepository {
    client: ApiClient,
}

impl AnalyticsRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// GET `/analytics/category-expenses`
    pub async fn category_expenses(&self, token: &BearerToken) -> ClientResult<Vec<CategoryExpense>> {
        let url = self.client.url(&["analytics", "category-expenses"]);
        self.client
            .get_json(token, &url, "analytics/category-expenses")
            .await
    }

    /// GET `/analytics/monthly-summary`
    pub async fn monthly_summary(&self, token: &BearerToken) -> ClientResult<Vec<MonthlySummary>> {
        let url = self.client.url(&["analytics", "monthly-summary"]);
        self.client
            .get_json(token, &url, "analytics/monthly-summary")
            .await
    }
}
