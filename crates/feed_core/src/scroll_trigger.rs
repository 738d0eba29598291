/// Snapshot of the feed position handed to the trigger on every navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerInput {
    pub current_index: usize,
    pub total_items: usize,
    pub has_more: bool,
    pub is_loading: bool,
}

/// Decides when the next page should be requested.
///
/// Fires at most once per approach to the end of the list: once a load has been
/// requested, nothing else fires until the host reports that loading finished
/// (successfully or not) via [`InfiniteScrollTrigger::observe_loading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfiniteScrollTrigger {
    threshold: usize,
    enabled: bool,
    pending: bool,
    last_triggered_index: Option<usize>,
    was_loading: bool,
}

impl InfiniteScrollTrigger {
    pub fn new(threshold: usize, enabled: bool) -> Self {
        Self {
            threshold,
            enabled,
            pending: false,
            last_triggered_index: None,
            was_loading: false,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_triggered_index(&self) -> Option<usize> {
        self.last_triggered_index
    }

    /// Reconfigures the trigger. Markers survive.
    pub fn set_options(&mut self, threshold: usize, enabled: bool) {
        self.threshold = threshold;
        self.enabled = enabled;
    }

    /// Returns true when the caller should invoke its load-more action now.
    pub fn should_load(&mut self, input: TriggerInput) -> bool {
        if !self.enabled || !input.has_more || input.is_loading || self.pending {
            return false;
        }
        if input.total_items == 0 || input.current_index >= input.total_items {
            return false;
        }
        let remaining = input.total_items - input.current_index - 1;
        if remaining > self.threshold {
            return false;
        }
        if self.last_triggered_index == Some(input.current_index) {
            return false;
        }

        self.pending = true;
        self.last_triggered_index = Some(input.current_index);
        true
    }

    /// Feeds the host's loading flag. A true -> false edge clears the markers.
    pub fn observe_loading(&mut self, is_loading: bool) {
        if self.was_loading && !is_loading {
            self.pending = false;
            self.last_triggered_index = None;
        }
        self.was_loading = is_loading;
    }

    /// Forgets everything; used when the list is replaced.
    pub fn reset(&mut self) {
        self.pending = false;
        self.last_triggered_index = None;
        self.was_loading = false;
    }
}
