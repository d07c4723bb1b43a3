//! Faceted filter selection
//!
//! The selection is an ordered list of indices into the filter definitions.
//! Selected definitions that share a key are OR'd together; groups with
//! different keys are AND'd.

use indexmap::IndexMap;

use crate::config::FilterDefinition;
use crate::row::TableRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    Add(usize),
    Remove(usize),
    Clear,
}

pub fn filter_reducer(mut selection: Vec<usize>, action: FilterAction) -> Vec<usize> {
    match action {
        FilterAction::Add(index) => selection.push(index),
        FilterAction::Remove(index) => selection.retain(|&i| i != index),
        FilterAction::Clear => selection.clear(),
    }
    selection
}

/// Selected definitions grouped by filter key, in first-selected order.
/// Indices outside the definition list are ignored.
pub(crate) fn group_by_key<'a>(
    definitions: &'a [FilterDefinition],
    selection: &[usize],
) -> IndexMap<&'a str, Vec<&'a FilterDefinition>> {
    let mut groups: IndexMap<&str, Vec<&FilterDefinition>> = IndexMap::new();
    for def in selection.iter().filter_map(|&i| definitions.get(i)) {
        groups.entry(def.key.as_str()).or_default().push(def);
    }
    groups
}

/// Check a row against grouped filters
pub(crate) fn row_matches(row: &TableRow, groups: &IndexMap<&str, Vec<&FilterDefinition>>) -> bool {
    groups
        .iter()
        .all(|(key, defs)| defs.iter().any(|def| def.matches(row.get(key))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reducer() {
        let selection = filter_reducer(Vec::new(), FilterAction::Add(2));
        let selection = filter_reducer(selection, FilterAction::Add(0));
        assert_eq!(selection, vec![2, 0]);

        let selection = filter_reducer(vec![1, 3, 1], FilterAction::Remove(1));
        assert_eq!(selection, vec![3]);

        assert!(filter_reducer(vec![1, 2], FilterAction::Clear).is_empty());
    }

    #[test]
    fn test_grouping_ignores_out_of_range() {
        let defs = vec![
            FilterDefinition::new("status", "A", "A"),
            FilterDefinition::new("status", "B", "B"),
            FilterDefinition::new("kind", "X", "X"),
        ];
        let groups = group_by_key(&defs, &[2, 0, 9, 1]);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["kind", "status"]);
        assert_eq!(groups["status"].len(), 2);
    }

    #[test]
    fn test_or_within_key_and_across_keys() {
        let defs = vec![
            FilterDefinition::new("status", "A", "A"),
            FilterDefinition::new("status", "B", "B"),
            FilterDefinition::new("kind", "X", "X"),
        ];
        let row_a_x = TableRow::new().cell("status", "A").cell("kind", "X");
        let row_b_y = TableRow::new().cell("status", "B").cell("kind", "Y");

        let either_status = group_by_key(&defs, &[0, 1]);
        assert!(row_matches(&row_a_x, &either_status));
        assert!(row_matches(&row_b_y, &either_status));

        let status_and_kind = group_by_key(&defs, &[0, 1, 2]);
        assert!(row_matches(&row_a_x, &status_and_kind));
        assert!(!row_matches(&row_b_y, &status_and_kind));
    }
}
