//! Pagination contract shared by every list view.

use serde::{Deserialize, Serialize};

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Up to this many pages every page number is shown.
pub const MAX_UNCOLLAPSED_PAGES: u32 = 7;

/// One page of a server-side collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Page-local items in server order.
    pub items: Vec<T>,
    /// Count across all pages.
    pub total: u64,
    /// 1-indexed.
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            total: self.total,
            page: self.page.max(1),
            per_page: self.per_page.max(1),
            total_pages: self.total_pages,
        }
    }
}

/// Pagination metadata of the page a view currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl PageMeta {
    /// Metadata before anything has been loaded.
    pub fn empty(per_page: u32) -> Self {
        Self {
            total: 0,
            page: 1,
            per_page,
            total_pages: 0,
        }
    }

    /// `ceil(total / per_page)`, as the service computes it.
    pub fn pages_for(total: u64, per_page: u32) -> u32 {
        if per_page == 0 {
            return 0;
        }
        total.div_ceil(u64::from(per_page)) as u32
    }

    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-indexed positions of the first and last item on this page, for the
    /// "Showing X - Y of Z" line. `(0, 0)` when there is nothing.
    pub fn item_range(&self) -> (u64, u64) {
        if self.total == 0 {
            return (0, 0);
        }
        let per_page = u64::from(self.per_page.max(1));
        let page = u64::from(self.page.max(1));
        let first = (page - 1) * per_page + 1;
        let last = (page * per_page).min(self.total);
        (first.min(self.total), last)
    }
}

pub fn is_page_size_option(size: u32) -> bool {
    PAGE_SIZE_OPTIONS.contains(&size)
}

/// Entry of the page-jump control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    Page(u32),
    Ellipsis,
}

impl PageItem {
    /// Numeric form used by the page controls: the page number, or `-1` for
    /// the ellipsis placeholder.
    pub fn number(&self) -> i64 {
        match self {
            PageItem::Page(page) => i64::from(*page),
            PageItem::Ellipsis => -1,
        }
    }
}

/// Page-jump targets for `current` out of `total` pages.
///
/// Seven pages or fewer are all listed. Beyond that the first and last page
/// are always present and a five-wide window sticks to whichever end
/// `current` is near; in the middle it is centred on `current` with an
/// ellipsis on both sides.
pub fn visible_pages(current: u32, total: u32) -> Vec<PageItem> {
    if total <= MAX_UNCOLLAPSED_PAGES {
        return (1..=total).map(PageItem::Page).collect();
    }

    let mut pages = Vec::with_capacity(7);
    if current <= 4 {
        pages.extend((1..=5).map(PageItem::Page));
        pages.push(PageItem::Ellipsis);
        pages.push(PageItem::Page(total));
    } else if current >= total - 3 {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Ellipsis);
        pages.extend((total - 4..=total).map(PageItem::Page));
    } else {
        pages.push(PageItem::Page(1));
        pages.push(PageItem::Ellipsis);
        pages.extend((current - 1..=current + 1).map(PageItem::Page));
        pages.push(PageItem::Ellipsis);
        pages.push(PageItem::Page(total));
    }
    pages
}

/// [`visible_pages`] in numeric form, `-1` marking ellipses.
pub fn visible_page_numbers(current: u32, total: u32) -> Vec<i64> {
    visible_pages(current, total)
        .iter()
        .map(PageItem::number)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_ranges_list_every_page() {
        for total in 0..=MAX_UNCOLLAPSED_PAGES {
            for current in 1..=total.max(1) {
                let expected: Vec<i64> = (1..=i64::from(total)).collect();
                assert_eq!(visible_page_numbers(current, total), expected);
            }
        }
    }

    #[test]
    fn window_sticks_to_the_start_up_to_page_four() {
        assert_eq!(visible_page_numbers(1, 10), vec![1, 2, 3, 4, 5, -1, 10]);
        assert_eq!(visible_page_numbers(4, 10), vec![1, 2, 3, 4, 5, -1, 10]);
        assert_eq!(visible_page_numbers(5, 10), vec![1, -1, 4, 5, 6, -1, 10]);
    }

    #[test]
    fn window_sticks_to_the_end_from_total_minus_three() {
        assert_eq!(visible_page_numbers(10, 10), vec![1, -1, 6, 7, 8, 9, 10]);
        assert_eq!(visible_page_numbers(7, 10), vec![1, -1, 6, 7, 8, 9, 10]);
        assert_eq!(visible_page_numbers(6, 10), vec![1, -1, 5, 6, 7, -1, 10]);
    }

    #[test]
    fn eight_pages_switch_between_the_two_ends() {
        assert_eq!(visible_page_numbers(4, 8), vec![1, 2, 3, 4, 5, -1, 8]);
        assert_eq!(visible_page_numbers(5, 8), vec![1, -1, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn middle_window_is_centred_with_two_ellipses() {
        let pages = visible_pages(50, 100);
        assert_eq!(
            pages,
            vec![
                PageItem::Page(1),
                PageItem::Ellipsis,
                PageItem::Page(49),
                PageItem::Page(50),
                PageItem::Page(51),
                PageItem::Ellipsis,
                PageItem::Page(100),
            ]
        );
    }

    #[test]
    fn response_metadata_drives_the_controls() {
        let response: PaginatedResponse<u8> = PaginatedResponse {
            items: vec![0; 10],
            total: 23,
            page: 1,
            per_page: 10,
            total_pages: 3,
        };
        let meta = response.meta();
        assert_eq!(PageMeta::pages_for(23, 10), 3);
        assert_eq!(visible_page_numbers(meta.page, meta.total_pages), vec![1, 2, 3]);
        assert_eq!(meta.item_range(), (1, 10));
        assert!(meta.has_next());
        assert!(!meta.has_previous());
    }

    #[test]
    fn item_range_clamps_to_total() {
        let meta = PageMeta {
            total: 23,
            page: 3,
            per_page: 10,
            total_pages: 3,
        };
        assert_eq!(meta.item_range(), (21, 23));
        assert_eq!(PageMeta::empty(10).item_range(), (0, 0));
    }

    #[test]
    fn only_listed_page_sizes_are_accepted() {
        assert!(PAGE_SIZE_OPTIONS.iter().all(|size| is_page_size_option(*size)));
        assert!(!is_page_size_option(15));
        assert!(!is_page_size_option(0));
    }

    #[test]
    fn decodes_the_service_envelope() {
        let json = r#"{"items":[1,2],"total":12,"page":2,"per_page":10,"total_pages":2}"#;
        let page: PaginatedResponse<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert!(page.meta().contains_page(2));
        assert!(!page.meta().contains_page(3));
    }
}
