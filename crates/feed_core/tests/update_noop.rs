use feed_core::{update, FeedState, Msg, TimerKind};

#[test]
fn mounted_feed_ignores_unknown_tokens() {
    let (mut state, _) = update(
        FeedState::default(),
        Msg::Mounted {
            width: 800,
            height: 600,
        },
    );
    state.consume_dirty();

    for msg in [
        Msg::FrameReady { token: 42 },
        Msg::TimerElapsed {
            timer: TimerKind::TransitionSettle,
            token: 42,
        },
        Msg::TimerElapsed {
            timer: TimerKind::ResizeDebounce,
            token: 42,
        },
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}

#[test]
fn messages_before_mount_are_dropped() {
    let state = FeedState::default();
    for msg in [Msg::NavigateNext, Msg::Refresh, Msg::LoadMore, Msg::NavigateTo(0)] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}
