//! SkyPlan Core - shared types for the flight-planning client
//!
//! This crate provides the fundamental types that all other SkyPlan crates
//! depend on:
//!
//! - `CellValue` - a renderable table cell value with text/number coercion
//! - `ApiError` - the backend error taxonomy surfaced to users
//! - `QueryKey` - addresses entries in the query store
//! - `Notifier` - sink for transient user notifications
//! - Domain entities (`Flight`, `Passenger`, `Aerodrome`, ...) and their drafts

mod error;
mod models;
mod notify;
mod query_key;
mod types;

pub use error::*;
pub use models::*;
pub use notify::*;
pub use query_key::*;
pub use types::*;
