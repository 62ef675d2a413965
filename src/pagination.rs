//! Abbreviated page lists for table pagers.
//!
//! A pager always shows the first and last page plus a window around the
//! current one; anything skipped collapses into a single ellipsis:
//!
//! ```text
//! [1] ... [4] [5] [6] [7] ... [10]
//! ```

use std::iter;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_LEFT_CURRENT, DEFAULT_RIGHT_CURRENT, ELLIPSIS, FIRST_PAGE, prelude::*};

/// One entry of a rendered pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum PageItem {
    /// A clickable page number
    #[display(fmt = "{_0}")]
    Page(u32),
    /// A run of skipped pages
    #[display(fmt = "...")]
    Ellipsis,
}

impl PageItem {
    /// Returns the page number, or `None` for an ellipsis
    pub const fn page(&self) -> Option<u32> {
        match self {
            Self::Page(page) => Some(*page),
            Self::Ellipsis => None,
        }
    }
}

/// Pages are serialized as numbers and ellipses as the string `"..."`.
impl Serialize for PageItem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Page(page) => serializer.serialize_u32(*page),
            Self::Ellipsis => serializer.serialize_str(ELLIPSIS),
        }
    }
}

impl<'de> Deserialize<'de> for PageItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Page(u32),
            Marker(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Page(page) => Ok(Self::Page(page)),
            Raw::Marker(marker) if marker == ELLIPSIS => Ok(Self::Ellipsis),
            Raw::Marker(other) => Err(serde::de::Error::custom(format!(
                "expected a page number or {ELLIPSIS:?}, found {other:?}"
            ))),
        }
    }
}

/// Builds the page list for `current` out of `total` pages.
///
/// Pages `1` and `total` are always present. Between them, every page in
/// `[max(2, current - left_current), min(total - 1, current + right_current)]`
/// is listed, and a single [`PageItem::Ellipsis`] marks each gap. `current` is
/// not clamped; callers pass an in-range page.
pub fn generate(current: u32, total: u32, left_current: u32, right_current: u32) -> Vec<PageItem> {
    if total <= FIRST_PAGE {
        return vec![PageItem::Page(FIRST_PAGE)];
    }

    let start = current.saturating_sub(left_current).max(FIRST_PAGE + 1);
    let end = current.saturating_add(right_current).min(total - 1);
    tracing::trace!(current, total, start, end, "pager window");

    let pages = iter::once(FIRST_PAGE).chain(start..=end).chain(iter::once(total));

    let mut items = Vec::new();
    let mut previous: Option<u32> = None;
    for page in pages {
        if let Some(prev) = previous {
            debug_assert!(page > prev, "pager pages must ascend");
            if page > prev + 1 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.push(PageItem::Page(page));
        previous = Some(page);
    }
    items
}

/// How many pages to show around the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageWindow {
    pub left_current:  u32,
    pub right_current: u32,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            left_current:  DEFAULT_LEFT_CURRENT,
            right_current: DEFAULT_RIGHT_CURRENT,
        }
    }
}

impl PageWindow {
    pub const fn new(left_current: u32, right_current: u32) -> Self {
        Self {
            left_current,
            right_current,
        }
    }

    /// Runs [`generate`] with this window's widths.
    pub fn generate(&self, current: u32, total: u32) -> Vec<PageItem> {
        generate(current, total, self.left_current, self.right_current)
    }
}

/// Error type for pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("Page numbers start at 1")]
    ZeroPage,

    #[error("Page size must be at least 1")]
    ZeroPerPage,
}

/// Position within a paginated result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pagination {
    page:     u32,
    per_page: u32,
    total:    u64,
}

impl Pagination {
    /// # Errors
    /// Returns `PaginationError` if `page` or `per_page` is 0.
    pub const fn new(page: u32, per_page: u32, total: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::ZeroPage);
        }
        if per_page == 0 {
            return Err(PaginationError::ZeroPerPage);
        }
        Ok(Self { page, per_page, total })
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages; 0 when there are no records.
    pub fn pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub const fn has_prev(&self) -> bool {
        self.page > FIRST_PAGE
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages()
    }

    pub const fn prev_num(&self) -> Option<u32> {
        if self.has_prev() { Some(self.page - 1) } else { None }
    }

    pub fn next_num(&self) -> Option<u32> {
        if self.has_next() { Some(self.page + 1) } else { None }
    }

    /// 1-based indices of the first and last record on this page, for a
    /// "Showing X - Y of Z" caption. `None` when the page holds no records.
    pub fn showing(&self) -> Option<(u64, u64)> {
        let first = u64::from(self.page - 1) * u64::from(self.per_page) + 1;
        if first > self.total {
            return None;
        }
        let last = (u64::from(self.page) * u64::from(self.per_page)).min(self.total);
        Some((first, last))
    }

    /// Page list for this position, with the page clamped into range.
    pub fn window(&self, window: &PageWindow) -> Vec<PageItem> {
        let total = self.pages().max(FIRST_PAGE);
        window.generate(self.page.min(total), total)
    }
}
