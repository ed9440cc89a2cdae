// src/api/pagination.rs
//! Page-token continuation for listing endpoints.

use super::responses::Page;
use crate::constants::MAX_PAGES_PER_LISTING;
use crate::error::AppError;

/// Fetches every page of a listing, threading `page_token` forward.
///
/// `fetch_fn` receives the token of the page to fetch (`None` for the
/// first). Fetching stops when a page has no continuation token or after
/// `max_pages` pages.
pub async fn fetch_all_pages<T, F, Fut>(
    mut fetch_fn: F,
    max_pages: Option<u32>,
) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<Page<T>, AppError>>,
{
    let max_pages = max_pages.unwrap_or(MAX_PAGES_PER_LISTING);
    let mut all_items = Vec::new();
    let mut page_token = None;
    let mut pages_fetched = 0u32;

    loop {
        if pages_fetched >= max_pages {
            log::warn!("Stopped listing after {} pages", max_pages);
            break;
        }

        let page = fetch_fn(page_token.take()).await?;
        pages_fetched += 1;

        let next = page.next_token().map(str::to_string);
        all_items.extend(page.items);

        match next {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    log::debug!(
        "Listed {} items in {} page(s)",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn page(items: Vec<u32>, next: Option<&str>) -> Page<u32> {
        Page {
            items,
            has_more: next.is_some(),
            page_token: next.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn threads_tokens_through_pages() {
        let seen = Mutex::new(Vec::new());
        let items = fetch_all_pages(
            |token| {
                seen.lock().unwrap().push(token.clone());
                async move {
                    Ok(match token.as_deref() {
                        None => page(vec![1, 2], Some("p2")),
                        Some("p2") => page(vec![3], Some("p3")),
                        _ => page(vec![4], None),
                    })
                }
            },
            None,
        )
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn respects_page_limit() {
        let items = fetch_all_pages(
            |_| async { Ok(page(vec![1], Some("again"))) },
            Some(3),
        )
        .await
        .unwrap();
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn propagates_errors() {
        let result: Result<Vec<u32>, _> = fetch_all_pages(
            |_| async { Err(AppError::MalformedResponse("boom".to_string())) },
            None,
        )
        .await;
        assert!(result.is_err());
    }
}
