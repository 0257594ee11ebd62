//! CRUD endpoints shared by every backend resource
//!
//! One generic handler set is instantiated per resource type:
//! - GET    /api/{plural}        -> Repository::find_all
//! - POST   /api/{plural}        -> Repository::create
//! - GET    /api/{plural}/:id    -> Repository::find
//! - DELETE /api/{plural}/:id    -> Repository::delete

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use budgetweb_client::{Repository, Resource};
use budgetweb_core::{EntityId, Session};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

/// Mount list/create and find/delete routes for `R` under `base`
pub fn resource_routes<R>(base: &str) -> Router<AppState>
where
    R: Resource + Serialize,
    R::Draft: DeserializeOwned,
{
    Router::new()
        .route(base, get(list::<R>).post(create::<R>))
        .route(&format!("{}/:id", base), get(show::<R>).delete(remove::<R>))
}

pub async fn list<R>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<R>>>
where
    R: Resource + Serialize,
{
    let items = Repository::<R>::new(state.client.clone())
        .find_all(session.token())
        .await?;
    Ok(Json(items))
}

pub async fn show<R>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<Json<R>>
where
    R: Resource + Serialize,
{
    let item = Repository::<R>::new(state.client.clone())
        .find(session.token(), id)
        .await?;
    Ok(Json(item))
}

pub async fn create<R>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ApiJson(draft): ApiJson<R::Draft>,
) -> ApiResult<StatusCode>
where
    R: Resource,
    R::Draft: DeserializeOwned,
{
    Repository::<R>::new(state.client.clone())
        .create(session.token(), &draft)
        .await?;
    Ok(StatusCode::CREATED)
}

pub async fn remove<R>(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ApiPath(id): ApiPath<EntityId>,
) -> ApiResult<StatusCode>
where
    R: Resource,
{
    Repository::<R>::new(state.client.clone())
        .delete(session.token(), id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
