//! Declarative table configuration

use indexmap::IndexMap;
use skyplan_core::CellValue;
use thiserror::Error;

use crate::row::TableRow;

/// Rows per page when the caller does not choose one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Message shown when the table has no rows at all
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data to display.";

/// Configuration mistakes caught when a table is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableConfigError {
    #[error("Table has no columns")]
    NoColumns,

    #[error("Page size must be positive")]
    ZeroPageSize,

    #[error("Sort column '{0}' is not a table column")]
    UnknownSortColumn(String),

    #[error("Search column '{0}' is not a table column")]
    UnknownSearchColumn(String),

    #[error("Filter column '{0}' is not a table column")]
    UnknownFilterColumn(String),
}

/// A column the user can sort by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortColumn {
    pub key: String,
    pub title: String,
}

impl SortColumn {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
        }
    }
}

/// Free-text search over a subset of the columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub placeholder: String,
    pub keys: Vec<String>,
}

impl SearchSpec {
    pub fn new<I, K>(placeholder: impl Into<String>, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            placeholder: placeholder.into(),
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

/// One discrete filter: rows whose value at `key` equals `value`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDefinition {
    pub key: String,
    pub value: CellValue,
    pub title: String,
}

impl FilterDefinition {
    pub fn new(
        key: impl Into<String>,
        value: impl Into<CellValue>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            title: title.into(),
        }
    }

    /// Whether the definition accepts `value`, compared as display text
    pub fn matches(&self, value: &CellValue) -> bool {
        self.value.to_text() == value.to_text()
    }
}

/// The filter checklist: a label and the available definitions
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub label: String,
    pub definitions: Vec<FilterDefinition>,
}

impl FilterSpec {
    pub fn new(label: impl Into<String>, definitions: Vec<FilterDefinition>) -> Self {
        Self {
            label: label.into(),
            definitions,
        }
    }
}

/// Everything the engine needs to know about a table
#[derive(Debug, Clone)]
pub struct TableConfig {
    headers: IndexMap<String, String>,
    rows: Vec<TableRow>,
    sort_columns: Vec<SortColumn>,
    search: Option<SearchSpec>,
    filters: Option<FilterSpec>,
    page_size: usize,
    empty_message: String,
}

impl TableConfig {
    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    /// Column keys in display order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.headers.keys().map(String::as_str)
    }

    /// Column keys paired with their header text, in display order
    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.headers.contains_key(key)
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn sort_columns(&self) -> &[SortColumn] {
        &self.sort_columns
    }

    pub fn search(&self) -> Option<&SearchSpec> {
        self.search.as_ref()
    }

    pub fn filters(&self) -> Option<&FilterSpec> {
        self.filters.as_ref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<TableRow>) {
        self.rows = rows;
    }

    pub(crate) fn set_filters(
        &mut self,
        filters: Option<FilterSpec>,
    ) -> Result<(), TableConfigError> {
        if let Some(spec) = &filters {
            self.check_filter_keys(spec)?;
        }
        self.filters = filters;
        Ok(())
    }

    fn check_filter_keys(&self, spec: &FilterSpec) -> Result<(), TableConfigError> {
        match spec.definitions.iter().find(|d| !self.has_column(&d.key)) {
            Some(def) => Err(TableConfigError::UnknownFilterColumn(def.key.clone())),
            None => Ok(()),
        }
    }

    fn validate(&self) -> Result<(), TableConfigError> {
        if self.headers.is_empty() {
            return Err(TableConfigError::NoColumns);
        }
        if self.page_size == 0 {
            return Err(TableConfigError::ZeroPageSize);
        }
        if let Some(col) = self.sort_columns.iter().find(|c| !self.has_column(&c.key)) {
            return Err(TableConfigError::UnknownSortColumn(col.key.clone()));
        }
        if let Some(search) = &self.search {
            if let Some(key) = search.keys.iter().find(|k| !self.has_column(k)) {
                return Err(TableConfigError::UnknownSearchColumn(key.clone()));
            }
        }
        if let Some(filters) = &self.filters {
            self.check_filter_keys(filters)?;
        }
        Ok(())
    }
}

/// Builder for [`TableConfig`]
#[derive(Debug, Default)]
pub struct TableConfigBuilder {
    headers: IndexMap<String, String>,
    rows: Vec<TableRow>,
    sort_columns: Vec<SortColumn>,
    search: Option<SearchSpec>,
    filters: Option<FilterSpec>,
    page_size: Option<usize>,
    empty_message: Option<String>,
}

impl TableConfigBuilder {
    /// Add a column. Columns render in the order they are added.
    pub fn column(mut self, key: impl Into<String>, header: impl Into<String>) -> Self {
        self.headers.insert(key.into(), header.into());
        self
    }

    pub fn rows(mut self, rows: Vec<TableRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn sortable(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.sort_columns.push(SortColumn::new(key, title));
        self
    }

    pub fn search(mut self, search: SearchSpec) -> Self {
        self.search = Some(search);
        self
    }

    pub fn filters(mut self, filters: FilterSpec) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = Some(message.into());
        self
    }

    pub fn build(self) -> Result<TableConfig, TableConfigError> {
        let config = TableConfig {
            headers: self.headers,
            rows: self.rows,
            sort_columns: self.sort_columns,
            search: self.search,
            filters: self.filters,
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            empty_message: self
                .empty_message
                .unwrap_or_else(|| DEFAULT_EMPTY_MESSAGE.to_string()),
        };
        config.validate()?;
        Ok(config)
    }
}
