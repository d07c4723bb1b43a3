//! SkyPlan Table - reusable data table engine
//!
//! Turns a full row collection plus a declarative [`TableConfig`] into the
//! currently visible page, and exposes the controls needed to change what is
//! visible. Rows flow through four pure stages in a fixed order:
//!
//! ```text
//! rows ─▶ filter ─▶ search ─▶ sort ─▶ paginate ─▶ TableView
//! ```
//!
//! The engine never renders anything itself. [`TableEngine::view`] returns a
//! [`TableView`] describing headers, cells, controls and row actions, which a
//! presentation layer draws however it likes.

mod config;
mod engine;
mod filters;
mod page;
mod pipeline;
mod row;
mod sort;
mod view;

pub use config::{
    FilterDefinition, FilterSpec, SearchSpec, SortColumn, TableConfig, TableConfigBuilder,
    TableConfigError, DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE,
};
pub use engine::{ActionOutcome, TableEngine, TableState};
pub use filters::{filter_reducer, FilterAction};
pub use page::{final_page, page_reducer, PageAction};
pub use pipeline::{paginate, visible_indices};
pub use row::{EditAction, RowCallback, RowPermissions, TableRow};
pub use sort::{SortDirection, SortState};
pub use view::{
    ActionTarget, FilterOptionView, FilterPanelView, FilterTagView, HeaderView, PageControl,
    PaginationView, RowActionKind, RowActionView, RowView, SearchBoxView, SortControlView,
    TableBody, TableView,
};
