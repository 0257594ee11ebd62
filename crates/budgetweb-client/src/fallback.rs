//! Opt-in "empty on failure" handling for read paths
//!
//! Views that would rather show nothing than an error page call
//! [`Fallback::or_empty`]. The error is still logged with its context, so a
//! failed fetch is never silent, but the caller receives `T::default()`.

use budgetweb_core::{log_error, ErrorContext};

use crate::ClientError;

pub trait Fallback<T> {
    /// The value, or `T::default()` after logging the error
    fn or_empty(self, context: &ErrorContext) -> T;
}

impl<T: Default> Fallback<T> for Result<T, ClientError> {
    fn or_empty(self, context: &ErrorContext) -> T {
        match self {
            Ok(value) => value,
            Err(error) => {
                log_error(&error, context);
                T::default()
            }
        }
    }
}
