//! Paging through a CMCI result cache
//!
//! A summary-only GET with NODISCARD asks CMCI to hold the result set in a
//! cache and return its token and record count. Pages are then fetched by
//! index. Every page keeps the cache alive except the last, which releases
//! it; [`ResultCachePager::discard`] releases an abandoned cache.

use crate::resource::{get_cache, get_resource};
use crate::types::{CacheParms, ResourceParms};
use cmci_client::{
    CmciError, CmciResponse, CmciRestClient, CmciResult, QueryFlags, RequestOptions,
};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ResultCachePager<'a> {
    client: &'a CmciRestClient,
    cache_token: String,
    record_count: u64,
    page_size: u64,
    /// 1-based index of the next record to fetch
    next_index: u64,
    /// Applied to every page and to the discard
    options: RequestOptions,
    released: bool,
}

impl<'a> ResultCachePager<'a> {
    /// Create the result cache for `parms`; `None` when there are no records
    pub async fn open(
        client: &'a CmciRestClient,
        parms: &ResourceParms,
        page_size: u32,
    ) -> CmciResult<Option<ResultCachePager<'a>>> {
        let options = parms.options.unwrap_or(client.default_options());
        let summary_parms = ResourceParms {
            query_flags: QueryFlags {
                summonly: true,
                nodiscard: true,
                ..parms.query_flags
            },
            options: Some(options.fail_on_no_data(false)),
            ..parms.clone()
        };

        let response = get_resource(client, &summary_parms).await?;
        let summary = response.result_summary().unwrap_or_default();
        if summary.is_no_data() {
            debug!("No records found, no result cache to page through");
            return Ok(None);
        }

        let record_count = summary
            .checked_record_count()
            .ok_or_else(|| CmciError::RequestFailed {
                details: response.to_pretty_string(),
            })?;
        if record_count == 0 {
            if let Some(cache_token) = summary.cachetoken.as_deref() {
                release(client, cache_token, options.fail_on_no_data(false)).await?;
            }
            debug!("Result set is empty, no result cache to page through");
            return Ok(None);
        }

        let cache_token = summary.cachetoken.clone().ok_or_else(|| CmciError::RequestFailed {
            details: response.to_pretty_string(),
        })?;
        info!(
            "Opened result cache {} holding {} records",
            cache_token, record_count
        );

        Ok(Some(Self {
            client,
            cache_token,
            record_count,
            page_size: u64::from(page_size.max(1)),
            next_index: 1,
            options,
            released: false,
        }))
    }

    pub fn cache_token(&self) -> &str {
        &self.cache_token
    }

    pub fn record_count(&self) -> u64 {
        self.record_count
    }

    pub fn is_exhausted(&self) -> bool {
        self.released || self.next_index > self.record_count
    }

    /// Fetch the next page; the last page releases the cache
    pub async fn next_page(&mut self) -> CmciResult<Option<CmciResponse>> {
        if self.is_exhausted() {
            return Ok(None);
        }

        // next_index is in 1..=record_count here
        let remaining = self.record_count - (self.next_index - 1);
        let count = remaining.min(self.page_size);
        let last = count == remaining;

        let parms = CacheParms {
            cache_token: Some(self.cache_token.clone()),
            start_index: Some(self.next_index),
            count: Some(count),
            nodiscard: Some(!last),
            summonly: false,
            options: Some(self.options),
        };
        debug!(
            "Fetching records {}..{} of result cache {}",
            self.next_index,
            self.next_index + (count - 1),
            self.cache_token
        );

        let response = get_cache(self.client, &parms).await?;
        self.next_index = self.next_index.saturating_add(count);
        if last {
            self.released = true;
        }
        Ok(Some(response))
    }

    /// Release the cache without reading the remaining pages
    pub async fn discard(mut self) -> CmciResult<()> {
        if self.released {
            return Ok(());
        }

        release(self.client, &self.cache_token, self.options).await?;
        self.released = true;
        debug!("Discarded result cache {}", self.cache_token);
        Ok(())
    }

    /// Drain every remaining page, collecting the records under `tag`
    pub async fn collect_records(mut self, tag: &str) -> CmciResult<Vec<Value>> {
        let mut records = Vec::new();
        while let Some(page) = self.next_page().await? {
            records.extend(page.records(tag).into_iter().cloned());
        }
        Ok(records)
    }
}

async fn release(
    client: &CmciRestClient,
    cache_token: &str,
    options: RequestOptions,
) -> CmciResult<CmciResponse> {
    let parms = CacheParms {
        cache_token: Some(cache_token.to_string()),
        nodiscard: Some(false),
        summonly: true,
        options: Some(options),
        ..Default::default()
    };
    get_cache(client, &parms).await
}
