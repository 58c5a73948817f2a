//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /cache?key=...` - Retrieve a value by key (plain text body)
//! - `POST /cache` - Store a key-value pair with an expiration in seconds
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
