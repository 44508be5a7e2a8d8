/// Page size used by every dashboard list.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// 1-based pager over a filtered collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    pub page: usize,
    pub page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// `ceil(total / page_size)`.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Keep the current page in range after the collection changed. Deleting
    /// the sole item on the last page steps the view back one page; an empty
    /// collection pins the view to page 1.
    pub fn clamp(&mut self, total: usize) {
        let pages = self.page_count(total).max(1);
        if self.page > pages {
            self.page = pages;
        }
        if self.page == 0 {
            self.page = 1;
        }
    }

    /// Items visible on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page.saturating_sub(1)) * self.page_size;
        if start >= items.len() {
            return &[];
        }
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }
}
