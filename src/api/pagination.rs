// src/api/pagination.rs
//! Cursor pagination without BoxFuture.

use crate::error::AppError;
use crate::model::ResultPage;

/// Follows a cursor-paginated listing until the API reports no more pages.
///
/// Pages are requested one at a time, each awaited before the next, and
/// items are returned in listing order. Any failed page fails the whole
/// listing; items from earlier pages are discarded with it.
pub async fn collect_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<ResultPage<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(cursor).await?;
        pages_fetched += 1;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.items);

        if !has_more {
            break;
        }
        if cursor.is_none() {
            log::warn!(
                "Listing reported more results without a cursor after {} page(s); stopping",
                pages_fetched
            );
            break;
        }
    }

    log::debug!(
        "Collected {} items across {} page(s)",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotionClientError;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_follows_cursor_until_exhausted() {
        let requested = RefCell::new(Vec::new());
        let items = collect_all_pages(|cursor: Option<String>| {
            requested.borrow_mut().push(cursor.clone());
            async move {
                Ok(match cursor.as_deref() {
                    None => ResultPage::continued(vec![1, 2], "c1"),
                    Some("c1") => ResultPage::continued(vec![3], "c2"),
                    _ => ResultPage::last(vec![4, 5]),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            requested.into_inner(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_cursor_ends_listing() {
        let items = collect_all_pages(|_cursor| async {
            Ok(ResultPage {
                items: vec!["only"],
                has_more: true,
                next_cursor: None,
            })
        })
        .await
        .unwrap();
        assert_eq!(items, vec!["only"]);
    }

    #[tokio::test]
    async fn test_failure_on_later_page_fails_listing() {
        let result = collect_all_pages(|cursor: Option<String>| async move {
            match cursor {
                None => Ok(ResultPage::continued(vec![1], "next")),
                Some(_) => Err(AppError::NotionClient(NotionClientError::NotionApi {
                    status: 500,
                    code: "internal_server_error".to_string(),
                    message: "boom".to_string(),
                    request_id: None,
                })),
            }
        })
        .await;
        assert!(result.is_err());
    }
}
