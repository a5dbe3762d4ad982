//! Offset-based pagination for the notes listing
//!
//! A page is resolved in three separate queries:
//! 1. count every row
//! 2. find the id of the first row of the requested page by offset
//! 3. fetch `page_size` rows with `id >= boundary`, ascending
//!
//! The queries do not share a transaction. A concurrent insert or delete
//! between them can leave `total_count`/`total_pages` stale relative to the
//! returned rows, or move the boundary. Results are best-effort consistent.

use serde::Serialize;
use crate::{Error, Result};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// The three reads the engine needs from a table ordered by ascending id
pub trait PageSource {
    type Item;

    fn count(&self) -> Result<i64>;

    /// Id of the row at `offset` in ascending id order, if any
    fn id_at_offset(&self, offset: i64) -> Result<Option<i64>>;

    /// Up to `limit` rows with `id >= lower_bound`, ascending
    fn fetch_from(&self, lower_bound: i64, limit: i64) -> Result<Vec<Self::Item>>;
}

/// Page metadata, consistent with `total_count` at the moment it was counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_pages: i64,
    /// The page actually served, after clamping
    pub current_page: i64,
    pub page_size: i64,
    pub total_count: i64,
    /// Inclusive lower id bound of the page; 0 means "from the start"
    pub last_id: i64,
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// `ceil(total_count / page_size)`, 0 for an empty table
pub fn total_pages(total_count: i64, page_size: i64) -> i64 {
    if total_count <= 0 {
        0
    } else {
        (total_count - 1) / page_size + 1
    }
}

/// Clamp a requested page into `1..=total_pages`.
///
/// With `total_pages == 0` this yields 0.
pub fn clamp_page(page: i64, total_pages: i64) -> i64 {
    page.max(1).min(total_pages)
}

/// Resolve one page of `source`.
///
/// `page` may be any integer and is clamped. `page_size` must be positive.
pub fn list_page<S: PageSource>(source: &S, page: i64, page_size: i64) -> Result<Page<S::Item>> {
    if page_size <= 0 {
        return Err(Error::Validation(format!(
            "pageSize must be a positive integer, got {}",
            page_size
        )));
    }

    let total_count = source.count()?;
    let total_pages = total_pages(total_count, page_size);
    let current_page = clamp_page(page, total_pages);

    if total_count == 0 {
        return Ok(Page {
            items: Vec::new(),
            meta: PageMeta {
                total_pages,
                current_page,
                page_size,
                total_count,
                last_id: 0,
            },
        });
    }

    let last_id = if current_page == 1 {
        0
    } else {
        let offset = (current_page - 1) * page_size;
        source.id_at_offset(offset)?.ok_or_else(|| {
            Error::NotFound(format!("no row at offset {} (table changed while paging)", offset))
        })?
    };

    let items = source.fetch_from(last_id, page_size)?;
    tracing::debug!(
        page = current_page,
        page_size,
        total_count,
        last_id,
        returned = items.len(),
        "Resolved page"
    );

    Ok(Page {
        items,
        meta: PageMeta {
            total_pages,
            current_page,
            page_size,
            total_count,
            last_id,
        },
    })
}
