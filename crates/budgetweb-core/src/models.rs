//! Records mirrored from the budget backend
//!
//! These are request-scoped copies. The backend owns every entity and
//! computes derived values such as `current_balance`; nothing here is
//! validated beyond its JSON shape. Unknown fields are ignored.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{EntityId, TransactionType, UserRole};

/// User identifier as returned by `/profile`.
///
/// Backends disagree on whether ids are numbers or strings, both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl UserId {
    /// An empty string id identifies nobody
    pub fn is_identifiable(&self) -> bool {
        match self {
            UserId::Number(_) => true,
            UserId::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Money movement on an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    /// Bill or income; the backend checks it against the amount sign
    #[serde(rename = "type", alias = "type_transaction")]
    pub kind: TransactionType,
    pub account_id: EntityId,
    pub category_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Amount with the sign implied by the transaction type
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Bill => -self.amount.abs(),
            TransactionType::Income => self.amount.abs(),
        }
    }
}

/// Payload for `POST /transaction`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type", alias = "type_transaction")]
    pub kind: TransactionType,
    pub account_id: EntityId,
    pub category_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<EntityId>,
}

/// Bank account owned by the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub bank: String,
    pub initial_balance: Decimal,
    /// Computed server-side, absent on freshly created accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Decimal>,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Current balance when known, otherwise the opening balance
    pub fn balance(&self) -> Decimal {
        self.current_balance.unwrap_or(self.initial_balance)
    }
}

/// Payload for `POST /account`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    pub name: String,
    pub bank: String,
    pub initial_balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

/// Payload for `POST /category`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Spending limit for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: EntityId,
    pub category_id: EntityId,
    pub amount: Decimal,
}

/// Payload for `POST /budget`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBudget {
    pub category_id: EntityId,
    pub amount: Decimal,
}

/// Matches for one query across every resource kind.
///
/// `Default` is the empty aggregate returned for blank queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub budgets: Vec<Budget>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
            && self.categories.is_empty()
            && self.accounts.is_empty()
            && self.budgets.is_empty()
    }

    /// Number of matches over all kinds
    pub fn total(&self) -> usize {
        self.transactions.len() + self.categories.len() + self.accounts.len() + self.budgets.len()
    }
}

/// Response of `GET /profile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
}

impl UserProfile {
    /// The id, when it identifies a user
    pub fn user_id(&self) -> Option<&UserId> {
        self.id.as_ref().filter(|id| id.is_identifiable())
    }
}

/// Row of `GET /analytics/category-expenses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default, alias = "name")]
    pub category_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(alias = "amount")]
    pub total: Decimal,
}

/// Row of `GET /analytics/monthly-summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Month label, `YYYY-MM`
    pub month: String,
    #[serde(default)]
    pub income: Decimal,
    #[serde(default, alias = "bills")]
    pub expenses: Decimal,
}

impl MonthlySummary {
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_from_backend_json() {
        let tx: Transaction = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Groceries",
            "description": "weekly",
            "amount": 54.25,
            "type": "bill",
            "account_id": 1,
            "category_id": 2,
            "created_at": "2024-05-01T10:00:00Z",
            "extra": "ignored"
        }))
        .unwrap();

        assert_eq!(tx.kind, TransactionType::Bill);
        assert_eq!(tx.amount, Decimal::new(5425, 2));
        assert_eq!(tx.signed_amount(), Decimal::new(-5425, 2));
        assert!(tx.budget_id.is_none());
        assert!(tx.created_at.is_some());
    }

    #[test]
    fn test_transaction_type_alias() {
        let tx: Transaction = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Salary",
            "amount": 1000,
            "type_transaction": "income",
            "account_id": 1,
            "category_id": 9
        }))
        .unwrap();
        assert_eq!(tx.kind, TransactionType::Income);
        assert_eq!(tx.description, "");
    }

    #[test]
    fn test_new_transaction_serializes_type_field() {
        let draft = NewTransaction {
            name: "Rent".to_string(),
            description: String::new(),
            amount: Decimal::new(800, 0),
            kind: TransactionType::Bill,
            account_id: 1,
            category_id: 4,
            budget_id: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["type"], "bill");
        assert!(json.get("budget_id").is_none());
    }

    #[test]
    fn test_account_balance_fallback() {
        let mut account: Account = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Checking",
            "bank": "First Bank",
            "initial_balance": 100.5,
            "user_id": "u-1"
        }))
        .unwrap();
        assert_eq!(account.balance(), Decimal::new(1005, 1));
        assert_eq!(account.user_id, UserId::Text("u-1".to_string()));

        account.current_balance = Some(Decimal::new(20, 0));
        assert_eq!(account.balance(), Decimal::new(20, 0));
    }

    #[test]
    fn test_empty_search_result_shape() {
        let empty = SearchResult::default();
        assert!(empty.is_empty());
        assert_eq!(
            serde_json::to_value(&empty).unwrap(),
            serde_json::json!({"transactions": [], "categories": [], "accounts": [], "budgets": []})
        );

        let partial: SearchResult =
            serde_json::from_value(serde_json::json!({"categories": [{"id": 1, "name": "Food"}]}))
                .unwrap();
        assert_eq!(partial.total(), 1);
    }

    #[test]
    fn test_profile_user_id() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({"id": 7, "name": "Ana"})).unwrap();
        assert_eq!(profile.user_id(), Some(&UserId::Number(7)));

        let profile: UserProfile = serde_json::from_value(serde_json::json!({"message": "Unauthorized"})).unwrap();
        assert!(profile.user_id().is_none());

        let profile: UserProfile = serde_json::from_value(serde_json::json!({"id": ""})).unwrap();
        assert!(profile.user_id().is_none());
    }

    #[test]
    fn test_monthly_summary_net() {
        let summary: MonthlySummary = serde_json::from_value(serde_json::json!({
            "month": "2024-04",
            "income": 3000,
            "bills": 1250.5
        }))
        .unwrap();
        assert_eq!(summary.net(), Decimal::new(17495, 1));
    }
}
