//! Single-column sort state

use std::cmp::Ordering;

use crate::row::TableRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// The active sort key, if any, and its direction
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    key: Option<String>,
    direction: SortDirection,
}

impl SortState {
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Direction shown on the control for `key`, if it is the active key
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        (self.key.as_deref() == Some(key)).then_some(self.direction)
    }

    /// Apply a click on the sort control for `key`.
    ///
    /// Clicking the active key reverses the direction; clicking another key
    /// makes it active, ascending.
    pub fn toggle(&mut self, key: &str) {
        if self.key.as_deref() == Some(key) {
            self.direction = self.direction.reversed();
        } else {
            self.key = Some(key.to_string());
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.direction = SortDirection::Ascending;
    }

    /// Compare two rows under the current sort. Equal when no key is active.
    pub fn compare_rows(&self, a: &TableRow, b: &TableRow) -> Ordering {
        let Some(key) = self.key.as_deref() else {
            return Ordering::Equal;
        };
        let ordering = a.get(key).compare(b.get(key));
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}
