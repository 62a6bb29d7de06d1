//! # Evergreen Wish
//!
//! Thin adapter around the wish-blessing LLM backend. The one promise this
//! crate makes: `WishClient::grant` always resolves with a `WishResponse`.
//! Missing credentials, transport failures and malformed responses all fold
//! into fixed fallback blessings; no error crosses the crate boundary.
//!
//! ## Table of Contents
//! 1. **client** - WishClient / WishConfig / WishResponse
//! 2. **prompt** - Request body construction and strict response parsing
//! 3. **error** - Internal error taxonomy

pub mod client;
pub mod error;
pub mod prompt;

pub use client::{WishClient, WishConfig, WishResponse};
pub use error::{Result, WishError};
