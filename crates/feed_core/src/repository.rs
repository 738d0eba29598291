use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A trending repository as served by the backend. Never mutated by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub stars: i64,
    pub forks: i64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    pub url: String,
    pub trending_date: NaiveDate,
}

/// One page of results from `/repositories/trending` or `/repositories/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub repositories: Vec<Repository>,
    pub total: usize,
    pub limit: i64,
    pub offset: i64,
    pub has_more: bool,
}

/// Which backend listing feeds the slides. Unset filters are left off the
/// query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedQuery {
    Trending {
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        min_stars: Option<i32>,
        #[serde(default)]
        max_stars: Option<i32>,
        #[serde(default)]
        date_from: Option<NaiveDate>,
        #[serde(default)]
        date_to: Option<NaiveDate>,
    },
    Search {
        q: String,
    },
    AdvancedSearch {
        q: String,
        #[serde(default)]
        language: Option<String>,
        #[serde(default)]
        min_stars: Option<i32>,
    },
}

impl FeedQuery {
    /// Trending listing with only the language filter.
    pub fn trending(language: Option<String>) -> Self {
        FeedQuery::Trending {
            language,
            min_stars: None,
            max_stars: None,
            date_from: None,
            date_to: None,
        }
    }
}

impl Default for FeedQuery {
    fn default() -> Self {
        FeedQuery::trending(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RequestId(pub u64);

/// Whether a fetch replaces the list or extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Initial,
    More,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub id: RequestId,
    pub kind: FetchKind,
    pub query: FeedQuery,
    pub offset: usize,
    pub limit: usize,
    /// Set for user-initiated reloads; caches must go to the network.
    pub fresh: bool,
}
