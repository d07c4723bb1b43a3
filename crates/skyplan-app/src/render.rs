//! Plain-text rendering of a table view

use std::fmt::Write;

use comfy_table::{presets, ContentArrangement, Table};

use skyplan_table::{
    FilterPanelView, PageControl, PaginationView, RowActionKind, RowView, SortDirection,
    TableBody, TableView,
};

const NO_MATCHES: &str = "No matching rows.";

pub fn render(view: &TableView) -> String {
    match view {
        TableView::Empty { message } => format!("{}\n", message),
        TableView::Table(body) => render_body(body),
    }
}

fn render_body(body: &TableBody) -> String {
    let mut out = String::new();

    if let Some(search) = &body.search {
        if search.term.is_empty() {
            let _ = writeln!(out, "Search: ({})", search.placeholder);
        } else {
            let _ = writeln!(out, "Search: \"{}\"", search.term);
        }
    }
    if let Some(filters) = &body.filters {
        render_filters(&mut out, filters);
    }
    if !body.sort_controls.is_empty() {
        let controls: Vec<String> = body
            .sort_controls
            .iter()
            .map(|c| match c.direction {
                Some(SortDirection::Ascending) => format!("{} ^", c.title),
                Some(SortDirection::Descending) => format!("{} v", c.title),
                None => c.title.clone(),
            })
            .collect();
        let _ = writeln!(out, "Sort: {}", controls.join(" | "));
    }
    out.push('\n');

    if body.no_matches {
        let _ = writeln!(out, "{}", NO_MATCHES);
    } else {
        render_grid(&mut out, body);
    }

    out.push('\n');
    render_pagination(&mut out, &body.pagination);
    out
}

fn render_filters(out: &mut String, filters: &FilterPanelView) {
    let options: Vec<String> = filters
        .options
        .iter()
        .map(|o| format!("[{}] {}", if o.checked { "x" } else { " " }, o.title))
        .collect();
    let _ = writeln!(out, "{}: {}", filters.label, options.join("  "));

    if !filters.tags.is_empty() {
        let tags: Vec<&str> = filters.tags.iter().map(|t| t.title.as_str()).collect();
        let _ = writeln!(out, "Applied: {}", tags.join(", "));
    }
}

fn action_label(row: &RowView) -> String {
    row.actions
        .iter()
        .map(|a| match a.kind {
            RowActionKind::View => "view",
            RowActionKind::Edit => "edit",
            RowActionKind::Delete => "delete",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_grid(out: &mut String, body: &TableBody) {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_MARKDOWN)
        .set_content_arrangement(ContentArrangement::Disabled);

    let mut header: Vec<&str> = body.headers.iter().map(|h| h.title.as_str()).collect();
    header.push("Actions");
    table.set_header(header);

    for row in &body.rows {
        let mut cells = row.cells.clone();
        cells.push(action_label(row));
        table.add_row(cells);
    }

    let _ = writeln!(out, "{}", table);
}

fn render_pagination(out: &mut String, pagination: &PaginationView) {
    let controls: Vec<&str> = pagination
        .controls
        .iter()
        .map(|c| match c {
            PageControl::First => "[first]",
            PageControl::Previous => "[prev]",
            PageControl::Next => "[next]",
            PageControl::Last => "[last]",
        })
        .collect();
    let _ = write!(
        out,
        "{} ({} rows)",
        pagination.label(),
        pagination.total_rows
    );
    if !controls.is_empty() {
        let _ = write!(out, "  {}", controls.join(" "));
    }
    out.push('\n');
}
