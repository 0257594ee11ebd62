//! Route modules for the gateway
//!
//! - resources: generic list/show/create/delete per backend resource
//! - insights: analytics, search and the current profile
//! - session: sign-in and sign-out, plus the login landing route
//! - dashboard: concurrent snapshot load with a timeout fallback

pub mod dashboard;
pub mod insights;
pub mod resources;
pub mod session;
