// Rust guideline compliant 2026-08-22

//! HTTP surface of the service: request/response types, handlers, routing,
//! and the error-to-status translation. This layer is deliberately thin --
//! all decisions live in the core crates behind the port traits.

pub mod error;
pub mod handlers;
pub mod routes;
