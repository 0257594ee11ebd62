//! Domain records, session context and error types for budgetweb

pub mod error;
pub mod models;
pub mod session;
pub mod types;

pub use error::{log_error, CoreError, CoreResult, ErrorCode, ErrorContext, ErrorDetails, ErrorSeverity, Reportable};
pub use models::{
    Account, Budget, Category, CategoryExpense, MonthlySummary, NewAccount, NewBudget, NewCategory,
    NewTransaction, SearchResult, Transaction, UserId, UserProfile,
};
pub use session::{BearerToken, Session};
pub use types::{EntityId, TransactionType, UserRole};
