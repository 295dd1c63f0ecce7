//! Proxy route handlers, one module per capability.
//!
//! Handlers own request validation and defaulting; upstream mechanics
//! live in `crate::upstream`, response shaping in `crate::normalize`.

pub mod chat;
pub mod completion;
pub mod documents;
pub mod evaluate;
pub mod health;
pub mod metrics;
pub mod query;
pub mod web_search;
