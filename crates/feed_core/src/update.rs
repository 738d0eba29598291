use crate::{Effect, FeedState, Lifecycle, Msg, TimerKind};

/// Pure update function: applies a message to state and returns any effects.
///
/// Before `Msg::Mounted` and after `Msg::Unmounted` every other message is
/// dropped, which is what keeps late timers and responses from touching a
/// torn-down feed.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    match (state.lifecycle(), &msg) {
        (Lifecycle::Created, Msg::Mounted { .. }) | (Lifecycle::Mounted, _) => {}
        _ => return (state, Vec::new()),
    }

    let effects = match msg {
        Msg::Mounted { width, height } => state.mount(width, height),
        Msg::Unmounted => state.unmount(),
        Msg::WindowResized { width, height } => state.observe_resize(width, height),
        Msg::NavigateTo(index) => state.navigate_to(index),
        Msg::NavigateNext => state.navigate(crate::NavAction::Next),
        Msg::NavigatePrevious => state.navigate(crate::NavAction::Previous),
        Msg::KeyPressed(key) => match key.action() {
            Some(action) => state.navigate(action),
            None => Vec::new(),
        },
        Msg::TouchStarted { y } => {
            state.swipe_started(y);
            Vec::new()
        }
        Msg::TouchEnded { y } => state.swipe_ended(y),
        Msg::Wheel { delta_y } => state.wheel(delta_y),
        Msg::FrameReady { token } => state.frame_ready(token),
        Msg::TimerElapsed { timer, token } => {
            match timer {
                TimerKind::TransitionSettle => state.settle(token),
                TimerKind::ResizeDebounce => state.commit_resize(token),
            }
            Vec::new()
        }
        Msg::LoadMore => state.load_more(),
        Msg::Refresh => state.refresh(),
        Msg::Retry => state.retry(),
        Msg::PageLoaded { request_id, page } => {
            state.page_loaded(request_id, page);
            Vec::new()
        }
        Msg::PageFailed {
            request_id,
            message,
        } => {
            state.page_failed(request_id, message);
            Vec::new()
        }
        Msg::ToggleSummary { repository_id } => {
            state.toggle_summary(repository_id);
            Vec::new()
        }
    };

    (state, effects)
}
