//! # Service Boundary
//!
//! Everything that talks to the remote text-to-SQL service: wire types,
//! the `Text2SqlService` trait, its reqwest implementation, and the task
//! runner that turns a `core::action::Request` into a reply `Action`.

pub mod http;
pub mod service;
pub mod tasks;
pub mod types;

pub use http::HttpService;
pub use service::{SchemaUpload, ServiceError, Text2SqlService};
pub use types::{QueryResult, Timestamp};
