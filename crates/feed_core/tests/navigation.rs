mod common;

use common::{frame_token, init_logging, mounted_with, navigate_fully, page, timer_token};
use feed_core::{
    update, Effect, FeedProps, FeedStore, Msg, ScrollDirection, TimerKind, TRANSITION_DURATION,
};

#[test]
fn navigate_commits_index_after_frame_and_settles() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..10, true));

    let (state, effects) = update(state, Msg::NavigateTo(3));
    assert!(state.is_transitioning());
    assert_eq!(state.scroll_direction(), Some(ScrollDirection::Down));
    // Index only moves on the next frame.
    assert_eq!(state.current_index(), 0);
    let token = frame_token(&effects).expect("frame requested");

    let (state, effects) = update(state, Msg::FrameReady { token });
    assert_eq!(state.current_index(), 3);
    assert_eq!(state.previous_index(), Some(0));
    assert!(state.is_transitioning());
    assert!(effects.contains(&Effect::ScheduleTimer {
        timer: TimerKind::TransitionSettle,
        token,
        delay: TRANSITION_DURATION,
    }));

    let (state, _) = update(
        state,
        Msg::TimerElapsed {
            timer: TimerKind::TransitionSettle,
            token,
        },
    );
    assert!(!state.is_transitioning());
    assert_eq!(state.scroll_direction(), None);
    assert_eq!(state.current_index(), 3);
}

#[test]
fn every_valid_index_is_reachable() {
    init_logging();
    let mut state = mounted_with(FeedProps::default(), 800, page(0..6, false));
    for target in [5, 0, 2, 4, 1] {
        let (next, _) = navigate_fully(state, Msg::NavigateTo(target));
        assert_eq!(next.current_index(), target);
        state = next;
    }
}

#[test]
fn out_of_bounds_navigation_is_ignored() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..3, false));

    let (next, effects) = update(state.clone(), Msg::NavigateTo(3));
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (next, effects) = update(state.clone(), Msg::NavigateTo(usize::MAX));
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn second_navigation_during_transition_is_dropped() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..10, true));
    let (mut state, effects) = update(state, Msg::NavigateTo(1));
    let token = frame_token(&effects).unwrap();
    state.consume_dirty();

    let (mut next, effects) = update(state.clone(), Msg::NavigateTo(5));
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, state);

    // Still dropped after the frame commits, until the settle timer fires.
    let (state, _) = update(next, Msg::FrameReady { token });
    let (state, effects) = update(state, Msg::NavigateNext);
    assert!(effects.is_empty());
    assert_eq!(state.current_index(), 1);
}

#[test]
fn next_and_previous_stop_at_bounds() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..2, false));

    let (state, effects) = update(state, Msg::NavigatePrevious);
    assert!(effects.is_empty());
    assert_eq!(state.current_index(), 0);

    let (state, _) = navigate_fully(state, Msg::NavigateNext);
    assert_eq!(state.current_index(), 1);

    let (state, effects) = update(state, Msg::NavigateNext);
    assert!(effects.is_empty());
    assert_eq!(state.current_index(), 1);

    let (state, _) = update(state, Msg::NavigatePrevious);
    assert_eq!(state.scroll_direction(), Some(ScrollDirection::Up));
}

#[test]
fn stale_frame_and_timer_tokens_are_ignored() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..5, true));
    let (state, effects) = update(state, Msg::NavigateTo(2));
    let token = frame_token(&effects).unwrap();

    let (state, effects) = update(state, Msg::FrameReady { token: token + 7 });
    assert!(effects.is_empty());
    assert_eq!(state.current_index(), 0);

    let (state, _) = update(state, Msg::FrameReady { token });
    let (state, _) = update(
        state,
        Msg::TimerElapsed {
            timer: TimerKind::TransitionSettle,
            token: token - 1,
        },
    );
    assert!(state.is_transitioning());
}

#[test]
fn keyboard_and_gestures_map_to_navigation() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..10, true));

    let (state, _) = navigate_fully(state, Msg::KeyPressed(feed_core::FeedKey::ArrowDown));
    assert_eq!(state.current_index(), 1);

    let (state, _) = navigate_fully(state, Msg::KeyPressed(feed_core::FeedKey::End));
    assert_eq!(state.current_index(), 9);

    let (state, _) = navigate_fully(state, Msg::KeyPressed(feed_core::FeedKey::Home));
    assert_eq!(state.current_index(), 0);

    let (state, effects) = update(state, Msg::KeyPressed(feed_core::FeedKey::Char('x')));
    assert!(effects.is_empty());

    // Finger travels upwards by 120px: next slide.
    let (state, _) = update(state, Msg::TouchStarted { y: 500 });
    let (state, _) = navigate_fully(state, Msg::TouchEnded { y: 380 });
    assert_eq!(state.current_index(), 1);

    // A short tap does nothing.
    let (state, _) = update(state, Msg::TouchStarted { y: 500 });
    let (state, effects) = update(state, Msg::TouchEnded { y: 480 });
    assert!(effects.is_empty());

    // Wheel deltas accumulate until the gesture threshold.
    let (state, effects) = update(state, Msg::Wheel { delta_y: 30 });
    assert!(effects.is_empty());
    let (state, _) = navigate_fully(state, Msg::Wheel { delta_y: 30 });
    assert_eq!(state.current_index(), 2);
}

#[test]
fn extreme_gesture_values_saturate() {
    init_logging();
    let state = mounted_with(FeedProps::default(), 800, page(0..10, true));

    let (state, _) = update(state, Msg::Wheel { delta_y: i32::MIN });
    assert_eq!(state.current_index(), 0);
    let (state, _) = navigate_fully(state, Msg::Wheel { delta_y: i32::MAX });
    assert_eq!(state.current_index(), 1);

    let (state, _) = update(state, Msg::TouchStarted { y: i32::MAX });
    let (state, _) = navigate_fully(state, Msg::TouchEnded { y: i32::MIN });
    assert_eq!(state.current_index(), 2);

    let (state, _) = update(state, Msg::TouchStarted { y: i32::MIN });
    let (state, _) = navigate_fully(state, Msg::TouchEnded { y: i32::MAX });
    assert_eq!(state.current_index(), 1);
}

#[test]
fn store_actions_delegate_to_update() {
    init_logging();
    let mut store = FeedStore::new(FeedProps::default());
    let effects = store.dispatch(Msg::Mounted {
        width: 400,
        height: 700,
    });
    let request = common::fetches(&effects).remove(0);
    store.dispatch(Msg::PageLoaded {
        request_id: request.id,
        page: page(0..4, false),
    });

    let effects = store.navigate_next();
    let token = frame_token(&effects).unwrap();
    let effects = store.dispatch(Msg::FrameReady { token });
    assert_eq!(store.state().current_index(), 1);
    let settle = timer_token(&effects, TimerKind::TransitionSettle).unwrap();
    store.dispatch(Msg::TimerElapsed {
        timer: TimerKind::TransitionSettle,
        token: settle,
    });

    assert!(store.navigate_to_index(9).is_empty());
    assert!(!store.navigate_previous().is_empty());
    assert!(store.consume_dirty());
}
