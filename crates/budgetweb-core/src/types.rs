//! Basic types for the budget domain

use serde::{Deserialize, Serialize};

/// Identifier assigned by the backend
pub type EntityId = i64;

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money leaving an account
    Bill,
    /// Money entering an account
    Income,
}

impl Default for TransactionType {
    fn default() -> Self {
        TransactionType::Bill
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bill" | "expense" => Ok(TransactionType::Bill),
            "income" => Ok(TransactionType::Income),
            _ => Err(format!("Invalid transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Bill => write!(f, "bill"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

/// Role reported by `/profile`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    /// Any role this client does not know about
    #[serde(other)]
    Other,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}
