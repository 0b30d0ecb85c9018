use std::num::NonZeroU64;

/// Articles per home-feed page.
pub const HOME_FEED_PAGE_SIZE: NonZeroU64 = NonZeroU64::new(3).unwrap();

/// Where one page sits inside the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub current_page: u64,
}

/// Read a page number from user input. Absent, non-numeric and zero values
/// all mean page 1.
pub fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// Compute offset, limit and page count.
///
/// The requested page is not clamped to `total_pages`: asking past the end
/// yields an offset past the end, i.e. an empty page.
pub fn paginate(total_count: u64, page_size: NonZeroU64, requested_page: u64) -> Page {
    let size = page_size.get();
    let current_page = requested_page.max(1);

    Page {
        offset: size.saturating_mul(current_page - 1),
        limit: size,
        total_pages: total_count.div_ceil(size),
        current_page,
    }
}
