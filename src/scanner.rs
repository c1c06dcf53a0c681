use std::collections::VecDeque;

use crate::notion::{NotionApi, NotionResult, Page};
use crate::title::is_untitled;

/// Where the next search request should start.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    Start,
    Next(String),
    Exhausted,
}

/// Lazy stream of untitled pages over paginated workspace search.
///
/// Pages are fetched one search page at a time. Once the last page has been
/// drained the stream stays finished; it cannot be restarted.
pub struct UntitledPages<'a, N: NotionApi + ?Sized> {
    notion: &'a N,
    cursor: Cursor,
    buffer: VecDeque<Page>,
    pages_seen: usize,
}

impl<'a, N: NotionApi + ?Sized> UntitledPages<'a, N> {
    pub fn new(notion: &'a N) -> Self {
        Self {
            notion,
            cursor: Cursor::Start,
            buffer: VecDeque::new(),
            pages_seen: 0,
        }
    }

    /// Next untitled page, or `None` once search is exhausted.
    pub async fn next_page(&mut self) -> NotionResult<Option<Page>> {
        loop {
            if let Some(page) = self.buffer.pop_front() {
                return Ok(Some(page));
            }

            let start = match &self.cursor {
                Cursor::Exhausted => return Ok(None),
                Cursor::Start => None,
                Cursor::Next(cursor) => Some(cursor.as_str()),
            };

            let response = self.notion.search_pages(start).await?;
            self.pages_seen += response.results.len();

            self.cursor = match response.next_cursor {
                Some(next) if !next.is_empty() => Cursor::Next(next),
                _ => Cursor::Exhausted,
            };

            self.buffer
                .extend(response.results.into_iter().filter(is_untitled));
        }
    }

    /// Pages returned by search so far, titled or not.
    pub fn pages_seen(&self) -> usize {
        self.pages_seen
    }
}
