use crate::{FeedKey, Page, RequestId, TimerKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The feed surface appeared with the given window size.
    Mounted { width: u32, height: u32 },
    /// The feed surface went away; nothing may change afterwards.
    Unmounted,
    /// Raw window resize notification (debounced by the store).
    WindowResized { width: u32, height: u32 },
    NavigateTo(usize),
    NavigateNext,
    NavigatePrevious,
    KeyPressed(FeedKey),
    TouchStarted { y: i32 },
    TouchEnded { y: i32 },
    Wheel { delta_y: i32 },
    /// Host reached the frame boundary requested by `Effect::RequestFrame`.
    FrameReady { token: u64 },
    /// Timer requested by `Effect::ScheduleTimer` expired.
    TimerElapsed { timer: TimerKind, token: u64 },
    LoadMore,
    Refresh,
    Retry,
    PageLoaded { request_id: RequestId, page: Page },
    PageFailed { request_id: RequestId, message: String },
    /// User expanded or collapsed the AI summary of a slide.
    ToggleSummary { repository_id: i64 },
}
