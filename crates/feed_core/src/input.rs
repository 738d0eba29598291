/// Minimum travel, in pixels, for a swipe or accumulated wheel delta.
pub const GESTURE_THRESHOLD_PX: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKey {
    ArrowDown,
    ArrowUp,
    PageDown,
    PageUp,
    Space,
    Home,
    End,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Next,
    Previous,
    First,
    Last,
}

impl FeedKey {
    pub fn action(self) -> Option<NavAction> {
        match self {
            FeedKey::ArrowDown | FeedKey::PageDown | FeedKey::Space | FeedKey::Char('j') => {
                Some(NavAction::Next)
            }
            FeedKey::ArrowUp | FeedKey::PageUp | FeedKey::Char('k') => Some(NavAction::Previous),
            FeedKey::Home => Some(NavAction::First),
            FeedKey::End => Some(NavAction::Last),
            FeedKey::Char(_) => None,
        }
    }
}

/// Turns a touch start/end pair into a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwipeTracker {
    start_y: Option<i32>,
}

impl SwipeTracker {
    pub fn start(&mut self, y: i32) {
        self.start_y = Some(y);
    }

    /// Finger moving up reveals the next slide.
    pub fn end(&mut self, y: i32) -> Option<NavAction> {
        let start = self.start_y.take()?;
        let delta = start.saturating_sub(y);
        if delta.unsigned_abs() < GESTURE_THRESHOLD_PX.unsigned_abs() {
            None
        } else if delta > 0 {
            Some(NavAction::Next)
        } else {
            Some(NavAction::Previous)
        }
    }
}

/// Collapses trackpad wheel noise into discrete navigations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelAccumulator {
    sum: i32,
}

impl WheelAccumulator {
    pub fn push(&mut self, delta_y: i32) -> Option<NavAction> {
        // Direction flip starts a new gesture.
        if self.sum != 0 && self.sum.signum() != delta_y.signum() {
            self.sum = 0;
        }
        self.sum = self.sum.saturating_add(delta_y);
        if self.sum.unsigned_abs() < GESTURE_THRESHOLD_PX.unsigned_abs() {
            return None;
        }
        let action = if self.sum > 0 {
            NavAction::Next
        } else {
            NavAction::Previous
        };
        self.sum = 0;
        Some(action)
    }

    pub fn reset(&mut self) {
        self.sum = 0;
    }
}
