use std::collections::BTreeSet;

use feed_logging::{feed_debug, feed_info};

use crate::view_model::FeedViewModel;
use crate::{
    DataOptions, Density, Effect, ExtensionMode, FeedProps, FetchKind, InfiniteScrollTrigger,
    NavAction, Page, PageRequest, Repository, RequestId, SwipeTracker, TimerKind, TriggerInput,
    Viewport, ViewportTracker, WheelAccumulator, RESIZE_DEBOUNCE, TRANSITION_DURATION,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Created,
    Mounted,
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    id: RequestId,
    kind: FetchKind,
}

/// Everything the feed knows: remote pagination mirrors plus local navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    extension_mode: ExtensionMode,
    options: DataOptions,
    lifecycle: Lifecycle,

    repositories: Vec<Repository>,
    seen_ids: BTreeSet<i64>,
    is_loading: bool,
    is_loading_more: bool,
    has_more: bool,
    error: Option<String>,
    total_count: usize,
    in_flight: Option<InFlight>,
    failed_kind: Option<FetchKind>,
    next_request_id: u64,

    current_index: usize,
    previous_index: Option<usize>,
    is_transitioning: bool,
    scroll_direction: Option<ScrollDirection>,
    pending_index: Option<usize>,
    transition_token: u64,

    trigger: InfiniteScrollTrigger,
    viewport: ViewportTracker,
    swipe: SwipeTracker,
    wheel: WheelAccumulator,
    /// Ids whose summary differs from the density's default.
    toggled_summaries: BTreeSet<i64>,
    dirty: bool,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new(FeedProps::default())
    }
}

impl FeedState {
    pub fn new(props: FeedProps) -> Self {
        let FeedProps {
            extension_mode,
            data_options,
        } = props;
        Self {
            extension_mode,
            trigger: InfiniteScrollTrigger::new(
                data_options.preload_threshold,
                data_options.enable_preloading,
            ),
            viewport: ViewportTracker::new(extension_mode.fixed_height()),
            options: data_options,
            lifecycle: Lifecycle::Created,
            repositories: Vec::new(),
            seen_ids: BTreeSet::new(),
            is_loading: false,
            is_loading_more: false,
            has_more: true,
            error: None,
            total_count: 0,
            in_flight: None,
            failed_kind: None,
            next_request_id: 0,
            current_index: 0,
            previous_index: None,
            is_transitioning: false,
            scroll_direction: None,
            pending_index: None,
            transition_token: 0,
            swipe: SwipeTracker::default(),
            wheel: WheelAccumulator::default(),
            toggled_summaries: BTreeSet::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> FeedViewModel {
        FeedViewModel::build(self)
    }

    pub fn extension_mode(&self) -> ExtensionMode {
        self.extension_mode
    }

    pub fn options(&self) -> &DataOptions {
        &self.options
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_repository(&self) -> Option<&Repository> {
        self.repositories.get(self.current_index)
    }

    pub fn previous_index(&self) -> Option<usize> {
        self.previous_index
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport.viewport()
    }

    pub fn trigger(&self) -> &InfiniteScrollTrigger {
        &self.trigger
    }

    pub fn is_summary_expanded(&self, repository_id: i64) -> bool {
        let open_by_default = self.extension_mode.density() == Density::Comfortable;
        open_by_default != self.toggled_summaries.contains(&repository_id)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mount(&mut self, width: u32, height: u32) -> Vec<Effect> {
        if self.lifecycle != Lifecycle::Created {
            return Vec::new();
        }
        self.lifecycle = Lifecycle::Mounted;
        let viewport = self.viewport.mount(width, height);
        feed_info!(
            "Feed mounted mode={} viewport={}x{}",
            self.extension_mode.as_str(),
            viewport.width,
            viewport.height
        );
        self.mark_dirty();
        vec![
            Effect::AttachResizeListener,
            self.begin_fetch(FetchKind::Initial, false),
        ]
    }

    pub(crate) fn unmount(&mut self) -> Vec<Effect> {
        self.lifecycle = Lifecycle::Unmounted;
        self.viewport.teardown();
        self.pending_index = None;
        self.in_flight = None;
        self.transition_token += 1;
        feed_info!("Feed unmounted");
        vec![
            Effect::CancelFrame,
            Effect::CancelTimer {
                timer: TimerKind::TransitionSettle,
            },
            Effect::CancelTimer {
                timer: TimerKind::ResizeDebounce,
            },
            Effect::DetachResizeListener,
        ]
    }

    pub(crate) fn observe_resize(&mut self, width: u32, height: u32) -> Vec<Effect> {
        match self.viewport.observe(width, height) {
            Some(token) => vec![
                Effect::CancelTimer {
                    timer: TimerKind::ResizeDebounce,
                },
                Effect::ScheduleTimer {
                    timer: TimerKind::ResizeDebounce,
                    token,
                    delay: RESIZE_DEBOUNCE,
                },
            ],
            None => Vec::new(),
        }
    }

    pub(crate) fn commit_resize(&mut self, token: u64) {
        if let Some(viewport) = self.viewport.elapsed(token) {
            feed_debug!("Viewport committed {}x{}", viewport.width, viewport.height);
            self.mark_dirty();
        }
    }

    /// Phase 1 of a transition: flag it and wait for the next frame.
    pub(crate) fn navigate_to(&mut self, index: usize) -> Vec<Effect> {
        if index >= self.repositories.len() {
            feed_debug!(
                "Ignoring navigation to {} (len {})",
                index,
                self.repositories.len()
            );
            return Vec::new();
        }
        if self.is_transitioning {
            feed_debug!("Ignoring navigation to {} during transition", index);
            return Vec::new();
        }

        self.scroll_direction = Some(if index > self.current_index {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        });
        self.previous_index = Some(self.current_index);
        self.is_transitioning = true;
        self.pending_index = Some(index);
        self.transition_token += 1;
        self.mark_dirty();
        vec![Effect::RequestFrame {
            token: self.transition_token,
        }]
    }

    pub(crate) fn navigate(&mut self, action: NavAction) -> Vec<Effect> {
        let len = self.repositories.len();
        let target = match action {
            NavAction::Next if self.current_index + 1 < len => self.current_index + 1,
            NavAction::Previous if self.current_index > 0 => self.current_index - 1,
            NavAction::First if len > 0 => 0,
            NavAction::Last if len > 0 => len - 1,
            _ => return Vec::new(),
        };
        self.navigate_to(target)
    }

    /// Phase 2: commit the index, start the settle timer, consult the trigger.
    pub(crate) fn frame_ready(&mut self, token: u64) -> Vec<Effect> {
        if token != self.transition_token {
            return Vec::new();
        }
        let Some(index) = self.pending_index.take() else {
            return Vec::new();
        };

        self.current_index = index;
        self.mark_dirty();
        feed_debug!(
            "Committed index {} (from {:?})",
            index,
            self.previous_index
        );

        let mut effects = vec![Effect::ScheduleTimer {
            timer: TimerKind::TransitionSettle,
            token,
            delay: TRANSITION_DURATION,
        }];
        effects.extend(self.check_infinite_scroll());
        effects
    }

    /// Phase 3: the transition window is over.
    pub(crate) fn settle(&mut self, token: u64) {
        if token != self.transition_token || self.pending_index.is_some() {
            return;
        }
        if self.is_transitioning {
            self.is_transitioning = false;
            self.scroll_direction = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn swipe_started(&mut self, y: i32) {
        self.swipe.start(y);
    }

    pub(crate) fn swipe_ended(&mut self, y: i32) -> Vec<Effect> {
        match self.swipe.end(y) {
            Some(action) => self.navigate(action),
            None => Vec::new(),
        }
    }

    pub(crate) fn wheel(&mut self, delta_y: i32) -> Vec<Effect> {
        match self.wheel.push(delta_y) {
            Some(action) => self.navigate(action),
            None => Vec::new(),
        }
    }

    pub(crate) fn toggle_summary(&mut self, repository_id: i64) {
        if !self.seen_ids.contains(&repository_id) {
            return;
        }
        if !self.toggled_summaries.remove(&repository_id) {
            self.toggled_summaries.insert(repository_id);
        }
        self.mark_dirty();
    }

    pub(crate) fn load_more(&mut self) -> Vec<Effect> {
        if self.in_flight.is_some() || !self.has_more {
            return Vec::new();
        }
        let kind = if self.repositories.is_empty() {
            FetchKind::Initial
        } else {
            FetchKind::More
        };
        self.error = None;
        self.failed_kind = None;
        vec![self.begin_fetch(kind, false)]
    }

    pub(crate) fn refresh(&mut self) -> Vec<Effect> {
        feed_info!("Refreshing feed");
        self.repositories.clear();
        self.seen_ids.clear();
        self.toggled_summaries.clear();
        self.current_index = 0;
        self.previous_index = None;
        self.total_count = 0;
        self.has_more = true;
        self.error = None;
        self.failed_kind = None;
        self.is_loading_more = false;
        self.in_flight = None;
        self.trigger.reset();
        self.wheel.reset();

        let transition_was_live = self.is_transitioning;
        self.is_transitioning = false;
        self.scroll_direction = None;
        self.pending_index = None;
        self.transition_token += 1;

        let mut effects = Vec::new();
        if transition_was_live {
            effects.push(Effect::CancelFrame);
            effects.push(Effect::CancelTimer {
                timer: TimerKind::TransitionSettle,
            });
        }
        effects.push(self.begin_fetch(FetchKind::Initial, true));
        effects
    }

    pub(crate) fn retry(&mut self) -> Vec<Effect> {
        if self.error.is_none() {
            return Vec::new();
        }
        match self.failed_kind {
            Some(FetchKind::More) => {
                self.error = None;
                self.failed_kind = None;
                vec![self.begin_fetch(FetchKind::More, true)]
            }
            Some(FetchKind::Initial) | None => self.refresh(),
        }
    }

    pub(crate) fn page_loaded(&mut self, request_id: RequestId, page: Page) {
        let Some(in_flight) = self.take_in_flight(request_id) else {
            return;
        };

        let received = page.repositories.len();
        let mut duplicates = 0usize;
        for repository in page.repositories {
            if self.seen_ids.insert(repository.id) {
                self.repositories.push(repository);
            } else {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            feed_debug!("Skipped {} duplicate repositories in page", duplicates);
        }

        self.has_more = page.has_more;
        self.total_count = self.repositories.len();
        self.error = None;
        self.failed_kind = None;
        self.finish_fetch(in_flight.kind);
        feed_info!(
            "Page loaded kind={:?} received={} total={} has_more={}",
            in_flight.kind,
            received,
            self.total_count,
            self.has_more
        );
    }

    pub(crate) fn page_failed(&mut self, request_id: RequestId, message: String) {
        let Some(in_flight) = self.take_in_flight(request_id) else {
            return;
        };
        feed_info!("Page failed kind={:?}: {}", in_flight.kind, message);
        self.error = Some(message);
        self.failed_kind = Some(in_flight.kind);
        self.finish_fetch(in_flight.kind);
    }

    fn take_in_flight(&mut self, request_id: RequestId) -> Option<InFlight> {
        match self.in_flight {
            Some(in_flight) if in_flight.id == request_id => {
                self.in_flight = None;
                Some(in_flight)
            }
            _ => {
                feed_debug!("Dropping response for superseded request {:?}", request_id);
                None
            }
        }
    }

    fn begin_fetch(&mut self, kind: FetchKind, fresh: bool) -> Effect {
        self.next_request_id += 1;
        let id = RequestId(self.next_request_id);
        let offset = match kind {
            FetchKind::Initial => 0,
            FetchKind::More => self.repositories.len(),
        };
        match kind {
            FetchKind::Initial => self.is_loading = true,
            FetchKind::More => self.is_loading_more = true,
        }
        self.in_flight = Some(InFlight { id, kind });
        self.trigger.observe_loading(true);
        self.mark_dirty();

        Effect::FetchPage(PageRequest {
            id,
            kind,
            query: self.options.query.clone(),
            offset,
            limit: self.options.page_size,
            fresh,
        })
    }

    fn finish_fetch(&mut self, kind: FetchKind) {
        match kind {
            FetchKind::Initial => self.is_loading = false,
            FetchKind::More => self.is_loading_more = false,
        }
        self.trigger
            .observe_loading(self.is_loading || self.is_loading_more);
        self.mark_dirty();
    }

    fn check_infinite_scroll(&mut self) -> Option<Effect> {
        let input = TriggerInput {
            current_index: self.current_index,
            total_items: self.repositories.len(),
            has_more: self.has_more,
            is_loading: self.is_loading || self.is_loading_more || self.error.is_some(),
        };
        if !self.trigger.should_load(input) {
            return None;
        }
        feed_debug!(
            "Infinite scroll fired at {} of {}",
            self.current_index,
            self.repositories.len()
        );
        Some(self.begin_fetch(FetchKind::More, false))
    }
}
