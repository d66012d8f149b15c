//! Fetch every page of a collection

use futures::stream::{self, StreamExt};
use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::api;
use crate::error::{Result, ScalrError};
use crate::scalr::{List, RequestBody, ScalrClient};

impl ScalrClient {
    /// Fetch all pages of a collection.
    ///
    /// The first page is read on its own to learn the page count; the
    /// remaining pages are fetched concurrently and stitched back together in
    /// page order. `filters` are sent with every page; any page selection
    /// among them is ignored.
    pub async fn fetch_all_pages<T>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        filters: &[(String, String)],
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let first: List<T> = self.fetch_page(ctx, path, filters, 1).await?;
        let total_pages = first.pagination.total_pages;
        let mut all_items = first.items;

        debug!(
            "Page 1/{}, total items: {}",
            total_pages, first.pagination.total_count
        );

        if total_pages <= 1 {
            return Ok(all_items);
        }

        debug!(
            "Fetching {} remaining pages of {} (max {} concurrent)",
            total_pages - 1,
            path,
            api::MAX_CONCURRENT_PAGE_REQUESTS
        );

        let page_futures = (2..=total_pages).map(|page| async move {
            let list: List<T> = self.fetch_page(ctx, path, filters, page).await?;
            Ok::<_, ScalrError>((page, list.items))
        });

        let results: Vec<Result<(u32, Vec<T>)>> = stream::iter(page_futures)
            .buffer_unordered(api::MAX_CONCURRENT_PAGE_REQUESTS)
            .collect()
            .await;

        let mut pages = results.into_iter().collect::<Result<Vec<_>>>()?;
        pages.sort_by_key(|(page, _)| *page);
        for (_, items) in pages {
            all_items.extend(items);
        }

        debug!("Fetched {} total items from {}", all_items.len(), path);
        Ok(all_items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        ctx: &CancellationToken,
        path: &str,
        filters: &[(String, String)],
        page: u32,
    ) -> Result<List<T>> {
        let mut pairs = vec![
            ("page[number]".to_string(), page.to_string()),
            ("page[size]".to_string(), api::DEFAULT_PAGE_SIZE.to_string()),
        ];
        pairs.extend(
            filters
                .iter()
                .filter(|(key, _)| !key.starts_with("page["))
                .cloned(),
        );
        self.call(ctx, Method::GET, path, RequestBody::Query(pairs))
            .await
    }
}
