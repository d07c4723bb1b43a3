//! SkyPlan command-line front end
//!
//! Loads a resource through the cache-first query layer, builds the page's
//! table configuration, runs it through the table engine and prints the
//! result as plain text.

pub mod app;
pub mod cli;
pub mod logging;
pub mod pages;
pub mod render;

pub use app::{App, ListOptions};
