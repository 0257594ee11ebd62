//! Read-only endpoints: analytics reports, search and the current profile

use axum::extract::State;
use axum::{Extension, Json};
use budgetweb_core::{CategoryExpense, MonthlySummary, SearchResult, Session};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::extract::ApiQuery;
use crate::AppState;

pub async fn api_category_expenses(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<CategoryExpense>>> {
    let rows = state
        .client
        .analytics()
        .category_expenses(session.token())
        .await?;
    Ok(Json(rows))
}

pub async fn api_monthly_summary(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> ApiResult<Json<Vec<MonthlySummary>>> {
    let rows = state
        .client
        .analytics()
        .monthly_summary(session.token())
        .await?;
    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Blank or missing `q` answers with the empty aggregate without a backend call
pub async fn api_search(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> ApiResult<Json<SearchResult>> {
    let result = state
        .client
        .search()
        .search(session.token(), &params.q)
        .await?;
    Ok(Json(result))
}

/// The signed-in user as resolved by the guard
pub async fn api_profile(Extension(session): Extension<Session>) -> Json<Session> {
    Json(session)
}
