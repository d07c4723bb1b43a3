//! Service layer
//!
//! Talks to the REST backend through [`ApiClient`] and keeps the query store
//! in sync: reads go through [`ResourceQuery`], edits through the generic
//! [`CreateEntity`], [`UpdateEntity`] and [`DeleteEntity`] mutations.

mod client;
mod error;
mod mutations;
mod query;
pub mod resource;
mod service;
mod transport;

pub use client::{ApiClient, StaticToken, TokenSource};
pub use error::{ServiceError, ServiceResult};
pub use mutations::{CreateEntity, DeleteEntity, UpdateEntity};
pub use query::ResourceQuery;
pub use resource::Resource;
pub use service::ResourceService;
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};
