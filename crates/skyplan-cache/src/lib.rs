//! Query store and optimistic mutation runner
//!
//! The store holds server data as JSON under hierarchical [`QueryKey`]s. Every
//! create/update/delete goes through [`MutationRunner::run`], which applies the
//! change to the store before the request resolves and either reconciles it
//! with the server's answer or restores the previous state.
//!
//! [`QueryKey`]: skyplan_core::QueryKey

pub mod collection;
mod memory;
mod mutation;
mod runner;
mod store;

pub use memory::*;
pub use mutation::*;
pub use runner::*;
pub use store::*;
