use std::time::Duration;

use crate::PageRequest;

/// How long a slide transition is assumed to be in flight.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Clears the transition flag once the slide animation has finished.
    TransitionSettle,
    /// Commits the last observed window size.
    ResizeDebounce,
}

/// Work the host must perform on behalf of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::FrameReady { token }` on the next frame.
    RequestFrame { token: u64 },
    CancelFrame,
    /// Deliver `Msg::TimerElapsed { timer, token }` after `delay`, replacing
    /// any pending timer of the same kind.
    ScheduleTimer {
        timer: TimerKind,
        token: u64,
        delay: Duration,
    },
    CancelTimer { timer: TimerKind },
    FetchPage(PageRequest),
    AttachResizeListener,
    DetachResizeListener,
}
