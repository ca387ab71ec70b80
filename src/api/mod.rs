//! HTTP surface for the case pipeline.
//!
//! Routes live under `/api/`. The pipeline is blocking, so handlers hand
//! each call to the blocking thread pool.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::serve;
pub use types::ApiContext;
