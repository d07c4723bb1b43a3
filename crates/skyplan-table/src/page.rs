//! Page state reducer
//!
//! Pages are 1-indexed. The reducer does no range checking; the engine
//! clamps the result against [`final_page`] after every reduction.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Increase,
    Decrease,
    Reset,
    Set(usize),
}

pub fn page_reducer(page: usize, action: PageAction) -> usize {
    match action {
        PageAction::Increase => page.saturating_add(1),
        // Saturates so the state stays a positive page number
        PageAction::Decrease => page.saturating_sub(1).max(1),
        PageAction::Reset => 1,
        PageAction::Set(page) => page,
    }
}

/// Number of the last page for `total_rows` rows. An empty result still has
/// one (empty) page.
pub fn final_page(total_rows: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    let pages = total_rows.saturating_add(page_size - 1) / page_size;
    pages.max(1)
}
