//! Render-agnostic description of a table
//!
//! A presentation layer walks a [`TableView`] and draws it. Nothing here
//! carries styling.

use crate::sort::SortDirection;

#[derive(Debug, Clone, PartialEq)]
pub enum TableView {
    /// The input collection is empty: only the message is shown, no controls
    Empty { message: String },
    Table(TableBody),
}

impl TableView {
    pub fn body(&self) -> Option<&TableBody> {
        match self {
            TableView::Empty { .. } => None,
            TableView::Table(body) => Some(body),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBody {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub search: Option<SearchBoxView>,
    pub filters: Option<FilterPanelView>,
    pub sort_controls: Vec<SortControlView>,
    pub pagination: PaginationView,
    /// Filtering or search removed every row
    pub no_matches: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub key: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    /// Position of the row in the configured collection
    pub source_index: usize,
    pub id: Option<i64>,
    /// Display text per column, in column order
    pub cells: Vec<String>,
    pub actions: Vec<RowActionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowActionKind {
    View,
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Rendered as a link to the target
    Link(String),
    /// Rendered as a button invoking the row's callback
    Handler,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowActionView {
    pub kind: RowActionKind,
    pub target: ActionTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBoxView {
    pub placeholder: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptionView {
    pub index: usize,
    pub title: String,
    pub checked: bool,
}

/// An applied filter, removable on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTagView {
    pub index: usize,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPanelView {
    pub label: String,
    pub options: Vec<FilterOptionView>,
    pub tags: Vec<FilterTagView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortControlView {
    pub key: String,
    pub title: String,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    First,
    Previous,
    Next,
    Last,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub final_page: usize,
    /// Rows remaining after filter and search
    pub total_rows: usize,
    /// Available controls. First/Previous are omitted on the first page and
    /// Next/Last on the final page.
    pub controls: Vec<PageControl>,
}

impl PaginationView {
    pub(crate) fn new(current_page: usize, final_page: usize, total_rows: usize) -> Self {
        let mut controls = Vec::with_capacity(4);
        if current_page > 1 {
            controls.extend([PageControl::First, PageControl::Previous]);
        }
        if current_page < final_page {
            controls.extend([PageControl::Next, PageControl::Last]);
        }
        Self {
            current_page,
            final_page,
            total_rows,
            controls,
        }
    }

    /// "Page X / Y"
    pub fn label(&self) -> String {
        format!("Page {} / {}", self.current_page, self.final_page)
    }

    pub fn has_control(&self, control: PageControl) -> bool {
        self.controls.contains(&control)
    }
}
