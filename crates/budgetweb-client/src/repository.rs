//! Generic repository over one backend resource

use std::marker::PhantomData;

use budgetweb_core::{
    Account, BearerToken, Budget, Category, EntityId, NewAccount, NewBudget, NewCategory,
    NewTransaction, Transaction,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ApiClient, ClientResult};

/// A record type served by the backend under `/{PATH}`
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Path segment, e.g. `transaction`
    const PATH: &'static str;
    /// Body accepted by `POST /{PATH}`
    type Draft: Serialize + Send + Sync;
}

impl Resource for Transaction {
    const PATH: &'static str = "transaction";
    type Draft = NewTransaction;
}

impl Resource for Account {
    const PATH: &'static str = "account";
    type Draft = NewAccount;
}

impl Resource for Category {
    const PATH: &'static str = "category";
    type Draft = NewCategory;
}

impl Resource for Budget {
    const PATH: &'static str = "budget";
    type Draft = NewBudget;
}

/// List, fetch, create and delete records of one resource type
pub struct Repository<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for Repository<R> {
    fn clone(&self) -> Self {
        Self::new(self.client.clone())
    }
}

impl<R: Resource> Repository<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// GET `/{resource}`; the array comes back exactly as the backend sent it
    pub async fn find_all(&self, token: &BearerToken) -> ClientResult<Vec<R>> {
        let url = self.client.url(&[R::PATH]);
        self.client.get_json(token, &url, R::PATH).await
    }

    /// GET `/{resource}/{id}`
    pub async fn find(&self, token: &BearerToken, id: EntityId) -> ClientResult<R> {
        let id = id.to_string();
        let url = self.client.url(&[R::PATH, &id]);
        self.client
            .get_json(token, &url, &format!("{}/{}", R::PATH, id))
            .await
    }

    /// POST `/{resource}` with the draft as JSON
    pub async fn create(&self, token: &BearerToken, draft: &R::Draft) -> ClientResult<()> {
        let url = self.client.url(&[R::PATH]);
        self.client
            .send(token, Method::POST, &url, R::PATH, Some(draft))
            .await?;
        log::info!(target: "budgetweb::client", "Created {}", R::PATH);
        Ok(())
    }

    /// DELETE `/{resource}/{id}`
    pub async fn delete(&self, token: &BearerToken, id: EntityId) -> ClientResult<()> {
        let id = id.to_string();
        let url = self.client.url(&[R::PATH, &id]);
        self.client
            .send::<()>(token, Method::DELETE, &url, &format!("{}/{}", R::PATH, id), None)
            .await?;
        log::info!(target: "budgetweb::client", "Deleted {}/{}", R::PATH, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{spawn_backend, unreachable_base_url, Recorder};
    use crate::{ClientError, Fallback};
    use axum::extract::Path;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use budgetweb_core::{ErrorContext, TransactionType};
    use rust_decimal::Decimal;

    fn token() -> BearerToken {
        BearerToken::new("test-token").unwrap()
    }

    fn sample_transactions() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "name": "Coffee", "description": "", "amount": 3.5, "type": "bill",
             "account_id": 1, "category_id": 2},
            {"id": 2, "name": "Salary", "description": "May", "amount": 2500, "type": "income",
             "account_id": 1, "category_id": 5, "budget_id": 9},
            {"id": 3, "name": "Books", "description": "", "amount": 40, "type": "bill",
             "account_id": 2, "category_id": 7}
        ])
    }

    #[tokio::test]
    async fn test_find_all_passes_items_through() {
        let recorder = Recorder::default();
        let rec = recorder.clone();
        let router = Router::new().route(
            "/transaction",
            get(move |headers: HeaderMap| {
                let rec = rec.clone();
                async move {
                    rec.record(&headers, "/transaction");
                    Json(sample_transactions())
                }
            }),
        );
        let base = spawn_backend(router).await;
        let client = ApiClient::new(base).unwrap();

        let items = client.transactions().find_all(&token()).await.unwrap();

        let expected: Vec<Transaction> = serde_json::from_value(sample_transactions()).unwrap();
        assert_eq!(items, expected);
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].kind, TransactionType::Income);
        assert_eq!(items[1].budget_id, Some(9));
        assert_eq!(recorder.hits(), 1);
        assert_eq!(recorder.last_authorization().as_deref(), Some("Bearer test-token"));
    }

    #[tokio::test]
    async fn test_find_all_network_failure() {
        let client = ApiClient::new(unreachable_base_url().await).unwrap();

        let result = client.accounts().find_all(&token()).await;
        assert!(matches!(result, Err(ClientError::Network { .. })));

        let items = client
            .accounts()
            .find_all(&token())
            .await
            .or_empty(&ErrorContext::new("accounts.find_all"));
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_find_all_bad_body_is_decode_error() {
        let router = Router::new().route("/category", get(|| async { "<html>oops</html>" }));
        let client = ApiClient::new(spawn_backend(router).await).unwrap();

        let result = client.categories().find_all(&token()).await;
        assert!(matches!(result, Err(ClientError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_find_all_unauthorized() {
        let router = Router::new().route(
            "/budget",
            get(|| async { (StatusCode::UNAUTHORIZED, "expired") }),
        );
        let client = ApiClient::new(spawn_backend(router).await).unwrap();

        let result = client.budgets().find_all(&token()).await;
        assert!(matches!(result, Err(ClientError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let router = Router::new().route(
            "/budget/:id",
            get(|Path(id): Path<i64>| async move {
                if id == 4 {
                    Json(serde_json::json!({"id": 4, "category_id": 2, "amount": 300})).into_response()
                } else {
                    StatusCode::NOT_FOUND.into_response()
                }
            }),
        );
        let client = ApiClient::new(spawn_backend(router).await).unwrap();

        let budget = client.budgets().find(&token(), 4).await.unwrap();
        assert_eq!(budget.amount, Decimal::new(300, 0));

        let missing = client.budgets().find(&token(), 5).await;
        assert!(matches!(missing, Err(ClientError::NotFound { ref resource }) if resource == "budget/5"));
    }

    #[tokio::test]
    async fn test_create_posts_json_and_reports_failure() {
        let recorder = Recorder::default();
        let rec = recorder.clone();
        let router = Router::new().route(
            "/category",
            axum::routing::post(move |headers: HeaderMap, Json(body): Json<serde_json::Value>| {
                let rec = rec.clone();
                async move {
                    rec.record(&headers, "/category");
                    rec.store_body(body.clone());
                    if body["name"] == "" {
                        (StatusCode::UNPROCESSABLE_ENTITY, "name required").into_response()
                    } else {
                        (StatusCode::CREATED, Json(serde_json::json!({"id": 10}))).into_response()
                    }
                }
            }),
        );
        let client = ApiClient::new(spawn_backend(router).await).unwrap();
        let repo = client.categories();

        let draft = NewCategory {
            name: "Travel".to_string(),
            icon: "plane".to_string(),
            color: "#00aaff".to_string(),
        };
        repo.create(&token(), &draft).await.unwrap();
        assert_eq!(recorder.last_body().unwrap()["name"], "Travel");
        assert_eq!(recorder.last_authorization().as_deref(), Some("Bearer test-token"));

        let invalid = NewCategory {
            name: String::new(),
            ..draft
        };
        let result = repo.create(&token(), &invalid).await;
        assert!(matches!(result, Err(ClientError::Status { status: 422, ref body }) if body == "name required"));
    }

    #[tokio::test]
    async fn test_delete_hits_id_path() {
        let recorder = Recorder::default();
        let rec = recorder.clone();
        let router = Router::new().route(
            "/transaction/:id",
            axum::routing::delete(move |headers: HeaderMap, Path(id): Path<i64>| {
                let rec = rec.clone();
                async move {
                    rec.record(&headers, &format!("/transaction/{}", id));
                    StatusCode::NO_CONTENT
                }
            }),
        );
        let client = ApiClient::new(spawn_backend(router).await).unwrap();

        client.transactions().delete(&token(), 42).await.unwrap();
        assert_eq!(recorder.last_path().as_deref(), Some("/transaction/42"));

        let missing = client.accounts().delete(&token(), 1).await;
        assert!(matches!(missing, Err(ClientError::NotFound { .. })));
    }
}
