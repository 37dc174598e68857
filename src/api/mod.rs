//! HTTP API
//!
//! Typed wrappers over the cooperative REST API, plus the request
//! de-duplication cache shared by the dashboard pollers.

pub mod auth;
pub mod cache;
pub mod client;
pub mod contributions;
pub mod loans;
pub mod penalties;
pub mod reports;
pub mod users;
