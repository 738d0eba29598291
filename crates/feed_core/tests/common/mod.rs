// Shared fixtures; not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Once;

use chrono::NaiveDate;
use feed_core::{
    update, Effect, FeedProps, FeedState, Msg, Page, PageRequest, Repository, TimerKind,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

pub fn repo(id: i64) -> Repository {
    Repository {
        id,
        name: format!("repo-{id}"),
        author: format!("author-{id}"),
        stars: 1_000 + id,
        forks: 10 + id,
        language: Some("Rust".to_string()),
        description: Some(format!("Repository number {id}")),
        ai_summary: None,
        url: format!("https://github.com/author-{id}/repo-{id}"),
        trending_date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
    }
}

pub fn page(ids: std::ops::Range<i64>, has_more: bool) -> Page {
    let repositories: Vec<Repository> = ids.map(repo).collect();
    Page {
        total: repositories.len(),
        limit: 20,
        offset: 0,
        has_more,
        repositories,
    }
}

pub fn fetches(effects: &[Effect]) -> Vec<PageRequest> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchPage(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

pub fn frame_token(effects: &[Effect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        Effect::RequestFrame { token } => Some(*token),
        _ => None,
    })
}

pub fn timer_token(effects: &[Effect], kind: TimerKind) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        Effect::ScheduleTimer { timer, token, .. } if *timer == kind => Some(*token),
        _ => None,
    })
}

/// Mounts a feed and answers the initial fetch with `page`.
pub fn mounted_with(props: FeedProps, height: u32, page: Page) -> FeedState {
    let (state, effects) = update(
        FeedState::new(props),
        Msg::Mounted {
            width: 1280,
            height,
        },
    );
    let request = fetches(&effects).remove(0);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: request.id,
            page,
        },
    );
    state
}

/// Runs all three transition phases and returns the effects of the frame phase.
pub fn navigate_fully(state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let (state, effects) = update(state, msg);
    let Some(token) = frame_token(&effects) else {
        return (state, effects);
    };
    let (state, frame_effects) = update(state, Msg::FrameReady { token });
    let settle = timer_token(&frame_effects, TimerKind::TransitionSettle)
        .expect("settle timer scheduled");
    let (state, _) = update(
        state,
        Msg::TimerElapsed {
            timer: TimerKind::TransitionSettle,
            token: settle,
        },
    );
    (state, frame_effects)
}
