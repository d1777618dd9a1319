//! Request middleware.
//!
//! - [`api_key::require_api_key`] -- Rejects requests without the shared key.

pub mod api_key;
