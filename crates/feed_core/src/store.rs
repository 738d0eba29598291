use crate::{update, Effect, FeedProps, FeedState, FeedViewModel, Msg};

/// Owner of the feed state.
///
/// Components receive `&FeedState` or a [`FeedViewModel`]; only the store
/// mutates. Every action returns the effects the host has to run.
#[derive(Debug, Clone, Default)]
pub struct FeedStore {
    state: FeedState,
}

impl FeedStore {
    pub fn new(props: FeedProps) -> Self {
        Self {
            state: FeedState::new(props),
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn view(&self) -> FeedViewModel {
        self.state.view()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    pub fn navigate_to_index(&mut self, index: usize) -> Vec<Effect> {
        self.dispatch(Msg::NavigateTo(index))
    }

    pub fn navigate_next(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::NavigateNext)
    }

    pub fn navigate_previous(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::NavigatePrevious)
    }

    pub fn load_more(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::LoadMore)
    }

    pub fn refresh(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::Refresh)
    }

    pub fn retry(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::Retry)
    }
}
