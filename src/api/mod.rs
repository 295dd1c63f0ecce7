//! Proxy & aggregation API layer.
//!
//! One handler per capability (chat, query, web-search, completion,
//! metrics, evaluation, ingestion). Handlers validate and default the
//! client request, delegate to exactly one upstream client under a
//! bounded deadline (two in the composed chat flow), and map every
//! outcome into a uniform JSON envelope.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use error::{ErrorEnvelope, ProxyError};
pub use router::proxy_router;
pub use types::ApiContext;
