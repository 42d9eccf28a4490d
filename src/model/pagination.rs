/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 17/10/26
******************************************************************************/

//! Range pagination headers

use crate::constants::{RANGE_HEADER, RANGE_UNIT_HEADER};
use crate::model::headers::Headers;

/// Item range `from..=to` selected by a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRange {
    /// First item index, zero based
    pub from: u64,
    /// Last item index, inclusive
    pub to: u64,
}

impl ItemRange {
    /// Range covered by `page` (one based, `0` is read as `1`) of `page_size` items
    ///
    /// Returns `None` when `page_size` is zero.
    #[must_use]
    pub fn for_page(page: u32, page_size: u32) -> Option<Self> {
        if page_size == 0 {
            return None;
        }
        let page = u64::from(page.max(1));
        let size = u64::from(page_size);
        let from = (page - 1) * size;
        Some(Self {
            from,
            to: from + size - 1,
        })
    }
}

impl std::fmt::Display for ItemRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

/// `Range-unit`/`Range` headers for a page, empty when `page_size` is zero
#[must_use]
pub fn pagination_headers(page: u32, page_size: u32) -> Headers {
    match ItemRange::for_page(page, page_size) {
        Some(range) => Headers::new()
            .with(RANGE_UNIT_HEADER, "items")
            .with(RANGE_HEADER, range.to_string()),
        None => Headers::new(),
    }
}
