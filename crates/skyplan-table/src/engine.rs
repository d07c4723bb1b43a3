//! Table engine: configuration plus interactive state

use crate::config::{FilterSpec, TableConfig, TableConfigError};
use crate::filters::{filter_reducer, FilterAction};
use crate::page::{final_page, page_reducer, PageAction};
use crate::pipeline::{paginate, visible_indices};
use crate::row::{EditAction, TableRow};
use crate::sort::SortState;
use crate::view::{
    ActionTarget, FilterOptionView, FilterPanelView, FilterTagView, HeaderView, PageControl,
    PaginationView, RowActionKind, RowActionView, RowView, SearchBoxView, SortControlView,
    TableBody, TableView,
};

/// Criteria the user has applied to a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Current page (1-indexed)
    pub page: usize,
    /// Indices of the applied filter definitions
    pub filters: Vec<usize>,
    pub search: String,
    pub sort: SortState,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 1,
            filters: Vec::new(),
            search: String::new(),
            sort: SortState::default(),
        }
    }
}

/// Result of invoking a row action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The caller should navigate to the target
    Navigate(String),
    /// The row's callback ran
    Invoked,
}

pub struct TableEngine {
    config: TableConfig,
    state: TableState,
}

impl TableEngine {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            state: TableState::default(),
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Replace the row collection, e.g. after the backing cache changed.
    /// Search, sort and filters are kept; the page is re-clamped.
    pub fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.config.set_rows(rows);
        self.clamp_page();
    }

    /// Replace the filter definitions. The selection indexed the old
    /// definitions, so it is cleared.
    pub fn set_filter_spec(&mut self, filters: Option<FilterSpec>) -> Result<(), TableConfigError> {
        self.config.set_filters(filters)?;
        self.reduce_filters(FilterAction::Clear);
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.state.search = term.into();
        self.reduce_page(PageAction::Reset);
    }

    pub fn clear_search(&mut self) {
        self.set_search(String::new());
    }

    /// Add the filter at `index` if it is not applied, remove it otherwise
    pub fn toggle_filter(&mut self, index: usize) {
        let action = if self.state.filters.contains(&index) {
            FilterAction::Remove(index)
        } else {
            FilterAction::Add(index)
        };
        self.reduce_filters(action);
    }

    /// Remove the applied filter at `index` (its tag was dismissed)
    pub fn remove_filter(&mut self, index: usize) {
        self.reduce_filters(FilterAction::Remove(index));
    }

    pub fn clear_filters(&mut self) {
        self.reduce_filters(FilterAction::Clear);
    }

    /// Click on the sort control for `key`. Keys that are not sortable are
    /// ignored.
    pub fn sort_by(&mut self, key: &str) {
        if !self.config.sort_columns().iter().any(|c| c.key == key) {
            tracing::debug!(key, "ignoring sort on non-sortable column");
            return;
        }
        self.state.sort.toggle(key);
    }

    pub fn apply_page_control(&mut self, control: PageControl) {
        let action = match control {
            PageControl::First => PageAction::Reset,
            PageControl::Previous => PageAction::Decrease,
            PageControl::Next => PageAction::Increase,
            PageControl::Last => PageAction::Set(self.final_page()),
        };
        self.reduce_page(action);
    }

    pub fn set_page(&mut self, page: usize) {
        self.reduce_page(PageAction::Set(page));
    }

    /// Last page for the rows currently passing filter and search
    pub fn final_page(&self) -> usize {
        final_page(self.matching_rows().len(), self.config.page_size())
    }

    /// Compute what is visible right now
    pub fn view(&mut self) -> TableView {
        if self.config.rows().is_empty() {
            return TableView::Empty {
                message: self.config.empty_message().to_string(),
            };
        }

        let indices = self.matching_rows();
        let last = final_page(indices.len(), self.config.page_size());
        self.state.page = self.state.page.clamp(1, last);

        let rows = paginate(&indices, self.state.page, self.config.page_size())
            .iter()
            .map(|&i| self.row_view(i))
            .collect();

        TableView::Table(TableBody {
            headers: self
                .config
                .headers()
                .map(|(key, title)| HeaderView {
                    key: key.to_string(),
                    title: title.to_string(),
                })
                .collect(),
            rows,
            search: self.config.search().map(|spec| SearchBoxView {
                placeholder: spec.placeholder.clone(),
                term: self.state.search.clone(),
            }),
            filters: self.filter_panel(),
            sort_controls: self
                .config
                .sort_columns()
                .iter()
                .map(|c| SortControlView {
                    key: c.key.clone(),
                    title: c.title.clone(),
                    direction: self.state.sort.direction_for(&c.key),
                })
                .collect(),
            pagination: PaginationView::new(self.state.page, last, indices.len()),
            no_matches: indices.is_empty(),
        })
    }

    /// Run the action of kind `kind` on the row at `source_index`.
    ///
    /// Returns `None` when the row does not render that action.
    pub fn invoke_action(&self, source_index: usize, kind: RowActionKind) -> Option<ActionOutcome> {
        let row = self.config.rows().get(source_index)?;
        let permissions = row.effective_permissions();
        match kind {
            RowActionKind::View if permissions.allows_view() => run_edit(row.edit.as_ref()?),
            RowActionKind::Edit if permissions.allows_edit() => run_edit(row.edit.as_ref()?),
            RowActionKind::Delete if permissions.allows_delete() => {
                let callback = row.delete.as_ref()?;
                callback();
                Some(ActionOutcome::Invoked)
            }
            _ => None,
        }
    }

    /// Like [`invoke_action`](Self::invoke_action), addressing the row by its id
    pub fn invoke_row_action(&self, id: i64, kind: RowActionKind) -> Option<ActionOutcome> {
        let index = self.config.rows().iter().position(|row| row.id == Some(id))?;
        self.invoke_action(index, kind)
    }

    fn matching_rows(&self) -> Vec<usize> {
        visible_indices(
            &self.config,
            &self.state.filters,
            &self.state.search,
            &self.state.sort,
        )
    }

    fn reduce_page(&mut self, action: PageAction) {
        self.state.page = page_reducer(self.state.page, action);
        self.clamp_page();
    }

    fn reduce_filters(&mut self, action: FilterAction) {
        self.state.filters = filter_reducer(std::mem::take(&mut self.state.filters), action);
        self.reduce_page(PageAction::Reset);
    }

    fn clamp_page(&mut self) {
        let last = self.final_page();
        self.state.page = self.state.page.clamp(1, last);
    }

    fn row_view(&self, source_index: usize) -> RowView {
        let row = &self.config.rows()[source_index];
        RowView {
            source_index,
            id: row.id,
            cells: self.config.columns().map(|key| row.get(key).to_text()).collect(),
            actions: row_actions(row),
        }
    }

    fn filter_panel(&self) -> Option<FilterPanelView> {
        let spec = self.config.filters()?;
        let applied = &self.state.filters;
        Some(FilterPanelView {
            label: spec.label.clone(),
            options: spec
                .definitions
                .iter()
                .enumerate()
                .map(|(index, def)| FilterOptionView {
                    index,
                    title: def.title.clone(),
                    checked: applied.contains(&index),
                })
                .collect(),
            tags: applied
                .iter()
                .filter_map(|&index| {
                    spec.definitions.get(index).map(|def| FilterTagView {
                        index,
                        title: def.title.clone(),
                    })
                })
                .collect(),
        })
    }
}

fn run_edit(action: &EditAction) -> Option<ActionOutcome> {
    match action {
        EditAction::Navigate(target) => Some(ActionOutcome::Navigate(target.clone())),
        EditAction::Callback(callback) => {
            callback();
            Some(ActionOutcome::Invoked)
        }
    }
}

fn row_actions(row: &TableRow) -> Vec<RowActionView> {
    let permissions = row.effective_permissions();
    let mut actions = Vec::new();

    if let Some(edit) = &row.edit {
        let target = match edit {
            EditAction::Navigate(target) => ActionTarget::Link(target.clone()),
            EditAction::Callback(_) => ActionTarget::Handler,
        };
        if permissions.allows_view() {
            actions.push(RowActionView {
                kind: RowActionKind::View,
                target: target.clone(),
            });
        }
        if permissions.allows_edit() {
            actions.push(RowActionView {
                kind: RowActionKind::Edit,
                target,
            });
        }
    }

    if row.delete.is_some() && permissions.allows_delete() {
        actions.push(RowActionView {
            kind: RowActionKind::Delete,
            target: ActionTarget::Handler,
        });
    }

    actions
}
