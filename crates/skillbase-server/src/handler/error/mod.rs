//! Error types for HTTP handlers and their conversions.

mod credential_error;
mod http_error;
mod pg_error;

pub use http_error::{Error, ErrorKind, Result};
