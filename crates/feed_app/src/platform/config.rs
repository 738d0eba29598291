use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use feed_core::{DataOptions, ExtensionMode, FeedProps, FeedQuery};
use feed_engine::SourceSettings;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

/// Settings read from `feed.ron`. Missing fields fall back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    pub api_base_url: String,
    pub extension_mode: ExtensionMode,
    pub page_size: usize,
    pub preload_threshold: usize,
    pub enable_preloading: bool,
    pub cache_enabled: bool,
    pub cache_dir: PathBuf,
    pub cache_ttl_secs: u64,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub frame_interval_ms: u64,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub verbose: bool,
}

impl Default for FeedSettings {
    fn default() -> Self {
        let data = DataOptions::default();
        Self {
            api_base_url: SourceSettings::default().base_url,
            extension_mode: ExtensionMode::Web,
            page_size: data.page_size,
            preload_threshold: data.preload_threshold,
            enable_preloading: data.enable_preloading,
            cache_enabled: true,
            cache_dir: PathBuf::from("./.feed_cache"),
            cache_ttl_secs: 60 * 60,
            viewport_width: 1280,
            viewport_height: 800,
            frame_interval_ms: 16,
            log_destination: LogDestination::File,
            log_file: PathBuf::from("./feed.log"),
            verbose: false,
        }
    }
}

impl FeedSettings {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            base_url: self.api_base_url.clone(),
            ..SourceSettings::default()
        }
    }
}

/// Loads settings; a missing file yields defaults.
pub fn load_settings(path: &Path) -> anyhow::Result<FeedSettings> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(FeedSettings::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading settings from {}", path.display()))
        }
    };
    ron::from_str(&content).with_context(|| format!("parsing settings in {}", path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderKind {
    Text,
    Markup,
}

#[derive(Debug, Parser)]
#[command(name = "trending-feed", about = "Story-style feed of trending repositories")]
pub struct Cli {
    /// RON settings file.
    #[arg(long, default_value = "feed.ron")]
    pub config: PathBuf,
    /// Surface to emulate: popup, newtab or web.
    #[arg(long)]
    pub mode: Option<ExtensionMode>,
    /// Search instead of browsing trending repositories. Combined with
    /// --language or --min-stars it uses the advanced search route.
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long)]
    pub min_stars: Option<i32>,
    #[arg(long, conflicts_with = "search")]
    pub max_stars: Option<i32>,
    /// Earliest trending date, YYYY-MM-DD.
    #[arg(long, conflicts_with = "search")]
    pub since: Option<NaiveDate>,
    /// Latest trending date, YYYY-MM-DD.
    #[arg(long, conflicts_with = "search")]
    pub until: Option<NaiveDate>,
    /// API base url, e.g. http://localhost:8000/api
    #[arg(long)]
    pub api: Option<String>,
    #[arg(long, value_enum, default_value_t = RenderKind::Text)]
    pub render: RenderKind,
    /// Always hit the network.
    #[arg(long)]
    pub no_cache: bool,
}

impl Cli {
    /// Flags win over the settings file.
    pub fn apply(&self, settings: &mut FeedSettings) {
        if let Some(mode) = self.mode {
            settings.extension_mode = mode;
        }
        if let Some(api) = &self.api {
            settings.api_base_url = api.clone();
        }
        if self.no_cache {
            settings.cache_enabled = false;
        }
    }

    pub fn query(&self) -> FeedQuery {
        match &self.search {
            Some(q) if self.language.is_none() && self.min_stars.is_none() => {
                FeedQuery::Search { q: q.clone() }
            }
            Some(q) => FeedQuery::AdvancedSearch {
                q: q.clone(),
                language: self.language.clone(),
                min_stars: self.min_stars,
            },
            None => FeedQuery::Trending {
                language: self.language.clone(),
                min_stars: self.min_stars,
                max_stars: self.max_stars,
                date_from: self.since,
                date_to: self.until,
            },
        }
    }
}

pub fn feed_props(settings: &FeedSettings, query: FeedQuery) -> FeedProps {
    FeedProps {
        extension_mode: settings.extension_mode,
        data_options: DataOptions {
            query,
            page_size: settings.page_size,
            preload_threshold: settings.preload_threshold,
            enable_preloading: settings.enable_preloading,
        },
    }
}
