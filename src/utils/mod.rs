//! Utility functions

pub mod crypto;
pub mod time;
pub mod validation;

pub use crypto::sha256_hex;
pub use time::{format_clock, now_utc};
pub use validation::{normalize_email, sanitize_string, validate_source_code};
