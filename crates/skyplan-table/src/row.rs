//! Table rows and their action controls

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use skyplan_core::CellValue;

/// Callback attached to a row action
pub type RowCallback = Arc<dyn Fn() + Send + Sync>;

static NULL_CELL: CellValue = CellValue::Null;

/// Closed set of labels selecting which action buttons a row renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowPermissions {
    View,
    Edit,
    Delete,
    ViewDelete,
    #[default]
    EditDelete,
}

impl RowPermissions {
    pub fn allows_view(&self) -> bool {
        matches!(self, Self::View | Self::ViewDelete)
    }

    pub fn allows_edit(&self) -> bool {
        matches!(self, Self::Edit | Self::EditDelete)
    }

    pub fn allows_delete(&self) -> bool {
        matches!(self, Self::Delete | Self::ViewDelete | Self::EditDelete)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::ViewDelete => "view-delete",
            Self::EditDelete => "edit-delete",
        }
    }
}

/// What happens when a row's edit (or view) button is used.
///
/// A row carries exactly one of the two: a navigation target rendered as a
/// link, or a callback rendered as a click handler.
#[derive(Clone)]
pub enum EditAction {
    Navigate(String),
    Callback(RowCallback),
}

impl std::fmt::Debug for EditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Navigate(target) => f.debug_tuple("Navigate").field(target).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

/// A row of the table: cell values keyed by column, plus optional controls
#[derive(Clone, Default)]
pub struct TableRow {
    pub id: Option<i64>,
    pub cells: IndexMap<String, CellValue>,
    pub edit: Option<EditAction>,
    pub delete: Option<RowCallback>,
    /// Absent means [`RowPermissions::EditDelete`]
    pub permissions: Option<RowPermissions>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Edit button renders as a link to `target`
    pub fn navigate_to(mut self, target: impl Into<String>) -> Self {
        self.edit = Some(EditAction::Navigate(target.into()));
        self
    }

    /// Edit button renders as a click handler
    pub fn on_edit(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.edit = Some(EditAction::Callback(Arc::new(callback)));
        self
    }

    pub fn on_delete(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.delete = Some(Arc::new(callback));
        self
    }

    pub fn with_permissions(mut self, permissions: RowPermissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Value at `key`; a missing key reads as null
    pub fn get(&self, key: &str) -> &CellValue {
        self.cells.get(key).unwrap_or(&NULL_CELL)
    }

    pub fn effective_permissions(&self) -> RowPermissions {
        self.permissions.unwrap_or_default()
    }
}

impl std::fmt::Debug for TableRow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableRow")
            .field("id", &self.id)
            .field("cells", &self.cells)
            .field("edit", &self.edit)
            .field("delete", &self.delete.as_ref().map(|_| ".."))
            .field("permissions", &self.permissions)
            .finish()
    }
}
