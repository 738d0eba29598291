use std::fmt;

use crate::{Density, ExtensionMode, FeedState, Msg, Repository, ScrollDirection, Viewport};

/// Slides this far from the current one get their full content.
pub const MOUNT_RADIUS: usize = 2;
/// Slides this far from the current one accept input and are exposed to
/// assistive technology.
pub const VISIBLE_RADIUS: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedViewModel {
    pub extension_mode: ExtensionMode,
    pub density: Density,
    pub viewport: Viewport,
    pub current_index: usize,
    pub is_transitioning: bool,
    pub scroll_direction: Option<ScrollDirection>,
    pub slides: Vec<SlideView>,
    pub initial_loading: bool,
    pub loading_more: bool,
    pub position: Option<PositionIndicator>,
    pub end_of_results: bool,
    pub error: Option<ErrorView>,
    pub empty: Option<EmptyView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideMount {
    /// Empty box at the right offset; keeps geometry without render cost.
    Placeholder,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView {
    pub index: usize,
    pub offset_px: i64,
    pub mount: SlideMount,
    pub active: bool,
    pub visible: bool,
    pub card: Option<RepositoryCard>,
}

impl SlideView {
    pub fn transform(&self) -> String {
        format!("translateY({}px)", self.offset_px)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryCard {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub aria_label: String,
    pub url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: String,
    pub forks: String,
    pub trending_date: String,
    pub ai_summary: Option<String>,
    pub summary_expanded: bool,
}

impl RepositoryCard {
    fn new(repository: &Repository, summary_expanded: bool) -> Self {
        Self {
            id: repository.id,
            name: repository.name.clone(),
            author: repository.author.clone(),
            aria_label: format!("Repository {} by {}", repository.name, repository.author),
            url: repository.url.clone(),
            description: repository.description.clone(),
            language: repository.language.clone(),
            stars: format_count(repository.stars),
            forks: format_count(repository.forks),
            trending_date: repository.trending_date.format("%Y-%m-%d").to_string(),
            ai_summary: repository.ai_summary.clone(),
            summary_expanded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionIndicator {
    pub current: usize,
    pub total: usize,
    pub has_more: bool,
}

impl fmt::Display for PositionIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.current, self.total)?;
        if self.has_more {
            write!(f, "+")?;
        }
        Ok(())
    }
}

/// User-triggerable actions exposed by overlay panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedAction {
    Refresh,
    Retry,
}

impl FeedAction {
    pub fn msg(self) -> Msg {
        match self {
            FeedAction::Refresh => Msg::Refresh,
            FeedAction::Retry => Msg::Retry,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FeedAction::Refresh => "Refresh",
            FeedAction::Retry => "Try again",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FeedAction::Refresh => "refresh",
            FeedAction::Retry => "retry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisplay {
    /// Replaces the slide stack; nothing loaded yet.
    Panel,
    /// Sits on top of already loaded slides.
    Banner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorView {
    pub message: String,
    pub display: ErrorDisplay,
    pub action: FeedAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyView {
    pub title: &'static str,
    pub action: FeedAction,
}

impl FeedViewModel {
    pub(crate) fn build(state: &FeedState) -> Self {
        let repositories = state.repositories();
        let current = state.current_index();
        let viewport = state.viewport();
        let has_data = !repositories.is_empty();

        let slides = repositories
            .iter()
            .enumerate()
            .map(|(index, repository)| {
                let distance = index.abs_diff(current);
                let mount = if distance <= MOUNT_RADIUS {
                    SlideMount::Full
                } else {
                    SlideMount::Placeholder
                };
                let card = (mount == SlideMount::Full).then(|| {
                    RepositoryCard::new(repository, state.is_summary_expanded(repository.id))
                });
                SlideView {
                    index,
                    offset_px: (index as i64 - current as i64) * i64::from(viewport.height),
                    mount,
                    active: index == current,
                    visible: distance <= VISIBLE_RADIUS,
                    card,
                }
            })
            .collect();

        let initial_loading = state.is_loading() && !has_data;
        let loading_more = state.is_loading_more() && !initial_loading;
        let on_last = has_data && current + 1 == repositories.len();

        let error = state.error().map(|message| {
            if has_data {
                ErrorView {
                    message: message.to_string(),
                    display: ErrorDisplay::Banner,
                    action: FeedAction::Retry,
                }
            } else {
                ErrorView {
                    message: message.to_string(),
                    display: ErrorDisplay::Panel,
                    action: FeedAction::Refresh,
                }
            }
        });

        let empty = (!state.is_loading() && state.error().is_none() && !has_data).then_some(
            EmptyView {
                title: "No repositories found",
                action: FeedAction::Refresh,
            },
        );

        Self {
            extension_mode: state.extension_mode(),
            density: state.extension_mode().density(),
            viewport,
            current_index: current,
            is_transitioning: state.is_transitioning(),
            scroll_direction: state.scroll_direction(),
            slides,
            initial_loading,
            loading_more,
            position: has_data.then(|| PositionIndicator {
                current: current + 1,
                total: state.total_count(),
                has_more: state.has_more(),
            }),
            end_of_results: !state.has_more() && !state.is_loading_more() && on_last,
            error,
            empty,
        }
    }

    pub fn active_slide(&self) -> Option<&SlideView> {
        self.slides.iter().find(|slide| slide.active)
    }

    pub fn mounted_slides(&self) -> impl Iterator<Item = &SlideView> {
        self.slides
            .iter()
            .filter(|slide| slide.mount == SlideMount::Full)
    }
}

/// Compact star/fork counts: `999`, `1.2k`, `3.4M`.
pub fn format_count(value: i64) -> String {
    let magnitude = value.unsigned_abs();
    let sign = if value < 0 { "-" } else { "" };
    // 999_950 would print as "1000.0k"; promote it.
    let (scaled, suffix) = if magnitude >= 999_950 {
        (magnitude as f64 / 1_000_000.0, "M")
    } else if magnitude >= 1_000 {
        (magnitude as f64 / 1_000.0, "k")
    } else {
        return value.to_string();
    };
    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{sign}{text}{suffix}")
}
