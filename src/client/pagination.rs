//! Offset pagination for console list endpoints
//!
//! The console pages large collections with `?limit=N&offset=M`. A page
//! body is a JSON array; a `null` body or an empty array signals
//! exhaustion. Anything else (non-JSON body, non-2xx) is an error, never
//! end-of-stream, so a server hiccup cannot silently truncate a report.

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Outcome of one successful paged fetch.
///
/// Transient failures surface as `Err(ApiError)` from the fetch itself,
/// keeping the three cases (more data / exhausted / error) distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum PageOutcome<T> {
    /// The page held records; the stream may continue.
    More(Vec<T>),
    /// The server signalled end-of-stream (`null` or empty array).
    Exhausted,
}

impl<T> PageOutcome<T> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PageOutcome::Exhausted)
    }
}

/// Offset/limit cursor for one paged request.
///
/// The offset always advances by the full page size, regardless of how
/// many records the prior page actually returned; termination is driven
/// solely by the next page being exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub offset: usize,
    pub limit: usize,
}

impl PageQuery {
    /// Cursor for the first page.
    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Cursor for the page after this one.
    pub fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }

    /// Render as `limit=N&offset=M` for appending to an endpoint query.
    pub fn to_query(self) -> String {
        format!("limit={}&offset={}", self.limit, self.offset)
    }
}

/// Decode one page body according to the end-of-stream convention.
///
/// `null`, whitespace-only, and `[]` bodies are [`PageOutcome::Exhausted`];
/// a non-empty JSON array is [`PageOutcome::More`]; any other body is
/// [`ApiError::Decode`], which callers treat as retryable.
pub fn decode_page<T: DeserializeOwned>(body: &str) -> Result<PageOutcome<T>, ApiError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(PageOutcome::Exhausted);
    }

    let records: Vec<T> = serde_json::from_str(trimmed)
        .map_err(|e| ApiError::Decode(format!("expected JSON array page: {e}")))?;

    if records.is_empty() {
        Ok(PageOutcome::Exhausted)
    } else {
        Ok(PageOutcome::More(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    #[test]
    fn test_page_query_advances_by_limit() {
        let q = PageQuery::first(50);
        assert_eq!(q.offset, 0);
        let q = q.next();
        assert_eq!(q.offset, 50);
        let q = q.next();
        assert_eq!(q.offset, 100);
        assert_eq!(q.to_query(), "limit=50&offset=100");
    }

    #[test]
    fn test_decode_array_page() {
        let outcome: PageOutcome<Item> = decode_page(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(
            outcome,
            PageOutcome::More(vec![Item { id: 1 }, Item { id: 2 }])
        );
    }

    #[test]
    fn test_decode_null_is_exhausted() {
        let outcome: PageOutcome<Item> = decode_page("null").unwrap();
        assert!(outcome.is_exhausted());
    }

    #[test]
    fn test_decode_empty_body_is_exhausted() {
        let outcome: PageOutcome<Item> = decode_page("  \n").unwrap();
        assert!(outcome.is_exhausted());
    }

    #[test]
    fn test_decode_empty_array_is_exhausted() {
        let outcome: PageOutcome<Item> = decode_page("[]").unwrap();
        assert!(outcome.is_exhausted());
    }

    #[test]
    fn test_decode_garbage_is_error_not_exhaustion() {
        let err = decode_page::<Item>("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(err.is_retryable());
        match err {
            ApiError::Decode(_) => (),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }
}
