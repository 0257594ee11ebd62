//! Dashboard snapshot
//!
//! Accounts, transactions and both analytics reports are fetched
//! concurrently. A part that fails is logged and left empty. Recent cash flow
//! is the signed sum of the kept transactions, and the latest month's net
//! comes from the monthly summary. The whole load
//! is bounded by `backend.dashboard_timeout_secs`: when that expires the
//! snapshot is returned empty with `timed_out` set, and `loaded` is true
//! either way.

use std::time::Duration;

use axum::extract::State;
use axum::{Extension, Json};
use budgetweb_client::{ApiClient, Fallback};
use budgetweb_core::{Account, CategoryExpense, ErrorContext, MonthlySummary, Session, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::guard::RequestId;
use crate::AppState;

/// Transactions kept in the snapshot, newest first
const RECENT_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub loaded: bool,
    pub timed_out: bool,
    pub total_balance: Decimal,
    pub recent_net: Decimal,
    pub latest_month_net: Decimal,
    pub accounts: Vec<Account>,
    pub recent_transactions: Vec<Transaction>,
    pub category_expenses: Vec<CategoryExpense>,
    pub monthly_summary: Vec<MonthlySummary>,
}

pub async fn api_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    request_id: Option<Extension<RequestId>>,
) -> Json<DashboardSnapshot> {
    let request_id = request_id
        .map(|Extension(id)| id.0)
        .unwrap_or_else(budgetweb_utils::generate_id);
    let timeout = Duration::from_secs(state.config.backend.dashboard_timeout_secs);

    Json(load_dashboard(&state.client, &session, timeout, &request_id).await)
}

/// Load the dashboard, giving up after `timeout`
pub async fn load_dashboard(
    client: &ApiClient,
    session: &Session,
    timeout: Duration,
    request_id: &str,
) -> DashboardSnapshot {
    let context = |operation: &str| {
        ErrorContext::new(operation)
            .with_request_id(request_id)
            .with_user_id(session.user_id())
    };
    let token = session.token();

    let accounts_repo = client.accounts();
    let transactions_repo = client.transactions();
    let analytics = client.analytics();

    let load = async {
        tokio::join!(
            accounts_repo.find_all(token),
            transactions_repo.find_all(token),
            analytics.category_expenses(token),
            analytics.monthly_summary(token),
        )
    };

    match tokio::time::timeout(timeout, load).await {
        Ok((accounts, transactions, category_expenses, monthly_summary)) => {
            let accounts = accounts.or_empty(&context("dashboard.accounts"));
            let mut transactions = transactions.or_empty(&context("dashboard.transactions"));
            transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            transactions.truncate(RECENT_TRANSACTIONS);
            let monthly_summary = monthly_summary.or_empty(&context("dashboard.monthly_summary"));

            DashboardSnapshot {
                loaded: true,
                timed_out: false,
                total_balance: accounts.iter().map(Account::balance).sum(),
                recent_net: transactions.iter().map(Transaction::signed_amount).sum(),
                latest_month_net: monthly_summary
                    .iter()
                    .max_by(|a, b| a.month.cmp(&b.month))
                    .map(MonthlySummary::net)
                    .unwrap_or_default(),
                accounts,
                recent_transactions: transactions,
                category_expenses: category_expenses.or_empty(&context("dashboard.category_expenses")),
                monthly_summary,
            }
        }
        Err(_) => {
            log::warn!(
                target: "budgetweb::api",
                "[{}] Dashboard load exceeded {:?}, returning empty snapshot",
                request_id,
                timeout
            );
            DashboardSnapshot {
                loaded: true,
                timed_out: true,
                ..DashboardSnapshot::default()
            }
        }
    }
}
