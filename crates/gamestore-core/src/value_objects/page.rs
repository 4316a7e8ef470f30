//! Page arithmetic for catalog listings

/// Page of a listing, 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 0,
        }
    }
}

/// Resolved window into a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u32,
    pub total_pages: u32,
    pub limit: i64,
    pub offset: i64,
}

impl PageWindow {
    /// Clamp `page` into `[1, total_pages]` for `total` rows split by `per_page`
    ///
    /// Returns `None` when there is nothing to list.
    pub fn resolve(total: i64, per_page: u32, page: u32) -> Option<Self> {
        let per_page = per_page.max(1);
        let total = u64::try_from(total).unwrap_or(0);
        if total == 0 {
            return None;
        }
        let total_pages = u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX);
        let page = page.clamp(1, total_pages);
        Some(Self {
            page,
            total_pages,
            limit: i64::from(per_page),
            offset: i64::from(page - 1) * i64::from(per_page),
        })
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}
