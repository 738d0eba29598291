use serde::{Deserialize, Serialize};

use crate::FeedQuery;

/// Height of the browser-action popup surface, in pixels.
pub const POPUP_HEIGHT: u32 = 600;

/// The surface the feed is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionMode {
    Popup,
    #[serde(rename = "newtab")]
    NewTab,
    #[default]
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Compact,
    Comfortable,
}

impl ExtensionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionMode::Popup => "popup",
            ExtensionMode::NewTab => "newtab",
            ExtensionMode::Web => "web",
        }
    }

    /// Popup pins the viewport height; the other surfaces follow the window.
    pub fn fixed_height(self) -> Option<u32> {
        match self {
            ExtensionMode::Popup => Some(POPUP_HEIGHT),
            ExtensionMode::NewTab | ExtensionMode::Web => None,
        }
    }

    pub fn density(self) -> Density {
        match self {
            ExtensionMode::Popup => Density::Compact,
            ExtensionMode::NewTab | ExtensionMode::Web => Density::Comfortable,
        }
    }
}

impl std::str::FromStr for ExtensionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popup" => Ok(ExtensionMode::Popup),
            "newtab" | "new-tab" => Ok(ExtensionMode::NewTab),
            "web" => Ok(ExtensionMode::Web),
            other => Err(format!("unknown extension mode '{other}'")),
        }
    }
}

/// Pass-through data configuration. `preload_threshold` and
/// `enable_preloading` drive the infinite-scroll trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataOptions {
    pub query: FeedQuery,
    pub page_size: usize,
    pub preload_threshold: usize,
    pub enable_preloading: bool,
}

impl Default for DataOptions {
    fn default() -> Self {
        Self {
            query: FeedQuery::default(),
            page_size: 20,
            preload_threshold: 3,
            enable_preloading: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedProps {
    pub extension_mode: ExtensionMode,
    pub data_options: DataOptions,
}
