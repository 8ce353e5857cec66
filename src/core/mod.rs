//! Core error types and user-facing error rendering.

pub mod error;

pub use error::{ErrorContext, FetchError, user_friendly_error};
