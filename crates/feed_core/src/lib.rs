//! Feed core: pure state machine, windowing and view-model helpers.
//!
//! Nothing in this crate performs I/O or owns a timer. Hosts feed [`Msg`]s in
//! and execute the returned [`Effect`]s.
mod effect;
mod input;
pub mod markup;
mod msg;
mod options;
mod repository;
mod scroll_trigger;
mod state;
mod store;
mod update;
mod view_model;
mod viewport;

pub use effect::{Effect, TimerKind, TRANSITION_DURATION};
pub use input::{FeedKey, NavAction, SwipeTracker, WheelAccumulator, GESTURE_THRESHOLD_PX};
pub use msg::Msg;
pub use options::{DataOptions, Density, ExtensionMode, FeedProps, POPUP_HEIGHT};
pub use repository::{FeedQuery, FetchKind, Page, PageRequest, Repository, RequestId};
pub use scroll_trigger::{InfiniteScrollTrigger, TriggerInput};
pub use state::{FeedState, Lifecycle, ScrollDirection};
pub use store::FeedStore;
pub use update::update;
pub use view_model::{
    format_count, EmptyView, ErrorDisplay, ErrorView, FeedAction, FeedViewModel,
    PositionIndicator, RepositoryCard, SlideMount, SlideView, MOUNT_RADIUS, VISIBLE_RADIUS,
};
pub use viewport::{Viewport, ViewportTracker, RESIZE_DEBOUNCE};
