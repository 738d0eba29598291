use std::time::Duration;

use feed_core::{FeedQuery, Page, PageRequest};
use feed_logging::feed_debug;
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, SourceError};

#[derive(Debug, Clone)]
pub struct SourceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Anything that can produce a page of repositories for a request.
#[async_trait::async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, SourceError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    code: String,
}

/// Builds `{base}/repositories/{trending|search|search/advanced}?...` for a
/// request. Unset filters are omitted; dates go out as `YYYY-MM-DD`.
pub fn endpoint_url(base_url: &str, request: &PageRequest) -> Result<Url, SourceError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| SourceError::new(FailureKind::InvalidUrl, err.to_string()))?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| SourceError::new(FailureKind::InvalidUrl, "base url cannot be a base"))?;
        segments.pop_if_empty().push("repositories");
        match request.query {
            FeedQuery::Trending { .. } => segments.push("trending"),
            FeedQuery::Search { .. } => segments.push("search"),
            FeedQuery::AdvancedSearch { .. } => segments.extend(["search", "advanced"]),
        };
    }
    {
        let mut pairs = url.query_pairs_mut();
        let mut optional = |name: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.append_pair(name, &value);
            }
        };
        match &request.query {
            FeedQuery::Trending {
                language,
                min_stars,
                max_stars,
                date_from,
                date_to,
            } => {
                optional("language", language.clone());
                optional("min_stars", min_stars.map(|n| n.to_string()));
                optional("max_stars", max_stars.map(|n| n.to_string()));
                optional("date_from", date_from.map(|d| d.format("%Y-%m-%d").to_string()));
                optional("date_to", date_to.map(|d| d.format("%Y-%m-%d").to_string()));
            }
            FeedQuery::Search { q } => optional("q", Some(q.clone())),
            FeedQuery::AdvancedSearch {
                q,
                language,
                min_stars,
            } => {
                optional("q", Some(q.clone()));
                optional("language", language.clone());
                optional("min_stars", min_stars.map(|n| n.to_string()));
            }
        }
        optional("limit", Some(request.limit.to_string()));
        optional("offset", Some(request.offset.to_string()));
    }
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestSource {
    settings: SourceSettings,
    client: reqwest::Client,
}

impl ReqwestSource {
    pub fn new(settings: SourceSettings) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| SourceError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }
}

#[async_trait::async_trait]
impl RepositorySource for ReqwestSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, SourceError> {
        let url = endpoint_url(&self.settings.base_url, request)?;
        feed_debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(match serde_json::from_slice::<ApiErrorBody>(&body) {
                Ok(api) => SourceError::new(FailureKind::Api { code: api.code }, api.error),
                Err(_) => SourceError::new(
                    FailureKind::HttpStatus(status.as_u16()),
                    status.to_string(),
                ),
            });
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(SourceError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(SourceError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice::<Page>(&bytes)
            .map_err(|err| SourceError::new(FailureKind::Decode, err.to_string()))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    if err.is_timeout() {
        return SourceError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return SourceError::new(FailureKind::Decode, err.to_string());
    }
    SourceError::new(FailureKind::Network, err.to_string())
}
