/// Page position of a server-paginated list.
///
/// `page` is 1-based as shown to users; [`Pagination::api_page`] converts it
/// to the 0-based index the backend expects. The page is never clamped
/// against `total_pages`: the next response corrects the page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size,
            total_pages: 1,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn handle_page_change(&mut self, new_page: u32) {
        self.page = new_page;
    }

    /// Changing the page size always returns to the first page.
    pub fn handle_page_size_change(&mut self, new_size: u32) {
        self.page_size = new_size;
        self.page = 1;
    }

    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    pub fn set_total_pages(&mut self, total_pages: u32) {
        self.total_pages = total_pages;
    }

    /// 0-based page index for outbound requests.
    pub fn api_page(&self) -> u32 {
        self.page.saturating_sub(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
