//! HTTP REST API interfaces
//!
//! - `dto`: response envelope, request/response bodies, error mapping
//! - `handlers`: request handlers for all resources
//! - `router`: API router with Swagger documentation

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::{create_api_router, ApiDoc};
