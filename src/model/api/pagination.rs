use rocket::FromForm;

use crate::error::{Error, Result};

/// Page size used when only a page number is requested.
const DEFAULT_PAGE_SIZE: u32 = 50;

/// Optional pagination query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromForm)]
pub struct PaginationRequest {
    page_num: Option<u32>,
    page_size: Option<u32>,
}

impl PaginationRequest {
    pub fn new(page_num: Option<u32>, page_size: Option<u32>) -> Self {
        Self {
            page_num,
            page_size,
        }
    }

    /// Resolve the requested page, or `None` if no pagination was asked for.
    pub fn page(&self, max_page_size: u32) -> Result<Option<Page>> {
        if self.page_num.is_none() && self.page_size.is_none() {
            return Ok(None);
        }

        let num = self.page_num.unwrap_or(1);
        if num == 0 {
            return Err(Error::validation("page_num starts at 1"));
        }
        let size = self
            .page_size
            .unwrap_or_else(|| DEFAULT_PAGE_SIZE.min(max_page_size));
        if size == 0 || size > max_page_size {
            return Err(Error::validation(format!(
                "page_size must be between 1 and {max_page_size}"
            )));
        }

        Ok(Some(Page { num, size }))
    }
}

/// A resolved, valid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    num: u32,
    size: u32,
}

impl Page {
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Number of records before this page.
    pub fn skip(&self) -> u64 {
        u64::from(self.num - 1) * u64::from(self.size)
    }
}
