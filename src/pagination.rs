use serde::Serialize;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// View model for a paginated listing: the current page of items plus the
/// page numbers to render as controls, one per page from 1 to the total.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<usize>,
    pub page: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        Self {
            items,
            pages: (1..=total_pages).collect(),
            page: current_page,
        }
    }
}
