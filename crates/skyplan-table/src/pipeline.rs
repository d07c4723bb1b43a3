//! The row pipeline: filter → search → sort → paginate
//!
//! Each stage is pure and works on indices into the configured rows, so the
//! source rows are never cloned or reordered.

use crate::config::TableConfig;
use crate::filters::{group_by_key, row_matches};
use crate::row::TableRow;
use crate::sort::SortState;

/// Indices of the rows that survive filtering and search, in sorted order
pub fn visible_indices(
    config: &TableConfig,
    selection: &[usize],
    search_term: &str,
    sort: &SortState,
) -> Vec<usize> {
    let rows = config.rows();
    let mut indices: Vec<usize> = (0..rows.len()).collect();

    if let Some(spec) = config.filters() {
        let groups = group_by_key(&spec.definitions, selection);
        if !groups.is_empty() {
            indices.retain(|&i| row_matches(&rows[i], &groups));
            tracing::trace!(remaining = indices.len(), "filter stage");
        }
    }

    if let Some(search) = config.search() {
        if !search_term.is_empty() {
            let needle = search_term.to_lowercase();
            indices.retain(|&i| row_matches_search(&rows[i], &search.keys, &needle));
            tracing::trace!(remaining = indices.len(), term = %search_term, "search stage");
        }
    }

    if sort.key().is_some() {
        // Stable, so ties keep their filter/search order
        indices.sort_by(|&a, &b| sort.compare_rows(&rows[a], &rows[b]));
    }

    indices
}

fn row_matches_search(row: &TableRow, keys: &[String], needle: &str) -> bool {
    keys.iter()
        .any(|key| row.get(key).to_text().to_lowercase().contains(needle))
}

/// Slice out page `page` (1-indexed) of `items`
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FilterDefinition, FilterSpec, SearchSpec};

    fn config() -> TableConfig {
        let aerodrome = |code: &str, name: &str, elevation: i64| {
            TableRow::new()
                .cell("code", code)
                .cell("name", name)
                .cell("elevation", elevation)
        };
        let rows = vec![
            aerodrome("CYVR", "Vancouver Intl", 14),
            aerodrome("CZBB", "Boundary Bay", 6),
            aerodrome("CYYJ", "Victoria Intl", 63),
        ];
        TableConfig::builder()
            .column("code", "Code")
            .column("name", "Name")
            .column("elevation", "Elevation")
            .rows(rows)
            .search(SearchSpec::new("Search aerodromes...", ["code", "name"]))
            .filters(FilterSpec::new(
                "Code",
                vec![
                    FilterDefinition::new("code", "CYVR", "CYVR"),
                    FilterDefinition::new("code", "CYYJ", "CYYJ"),
                ],
            ))
            .build()
            .unwrap()
    }

    #[test]
    fn test_no_criteria_keeps_source_order() {
        let indices = visible_indices(&config(), &[], "", &SortState::default());
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let indices = visible_indices(&config(), &[], "intl", &SortState::default());
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_search_only_uses_search_keys() {
        // "63" only appears in the elevation column, which is not searched
        let indices = visible_indices(&config(), &[], "63", &SortState::default());
        assert!(indices.is_empty());
    }

    #[test]
    fn test_filter_then_sort() {
        let mut sort = SortState::default();
        sort.toggle("elevation");
        sort.toggle("elevation");
        let indices = visible_indices(&config(), &[0, 1], "", &sort);
        assert_eq!(indices, vec![2, 0]);
    }

    #[test]
    fn test_paginate_bounds() {
        let items: Vec<usize> = (0..12).collect();
        assert_eq!(paginate(&items, 1, 5), &[0, 1, 2, 3, 4]);
        assert_eq!(paginate(&items, 3, 5), &[10, 11]);
        assert!(paginate(&items, 4, 5).is_empty());
        assert!(paginate::<usize>(&[], 1, 5).is_empty());
    }
}
