use std::time::Duration;

/// Delay applied to resize notifications before the viewport is committed.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Debounced window-size tracking.
///
/// Every [`observe`](Self::observe) supersedes the previous pending size and
/// hands back a fresh token; only the timer carrying the latest token commits.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewportTracker {
    committed: Viewport,
    pending: Option<Viewport>,
    token: u64,
    fixed_height: Option<u32>,
    active: bool,
}

impl ViewportTracker {
    pub fn new(fixed_height: Option<u32>) -> Self {
        Self {
            fixed_height,
            ..Self::default()
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.committed
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Immediate read on mount so the first render is sized correctly.
    pub fn mount(&mut self, width: u32, height: u32) -> Viewport {
        self.active = true;
        self.pending = None;
        self.committed = self.pin(Viewport::new(width, height));
        self.committed
    }

    /// Records a resize and returns the token of the debounce timer to schedule.
    pub fn observe(&mut self, width: u32, height: u32) -> Option<u64> {
        if !self.active {
            return None;
        }
        self.pending = Some(Viewport::new(width, height));
        self.token += 1;
        Some(self.token)
    }

    /// Debounce timer fired. Returns the newly committed viewport, if any.
    pub fn elapsed(&mut self, token: u64) -> Option<Viewport> {
        if !self.active || token != self.token {
            return None;
        }
        let pending = self.pending.take()?;
        let next = self.pin(pending);
        if next == self.committed {
            return None;
        }
        self.committed = next;
        Some(next)
    }

    pub fn teardown(&mut self) {
        self.active = false;
        self.pending = None;
        self.token += 1;
    }

    fn pin(&self, viewport: Viewport) -> Viewport {
        match self.fixed_height {
            Some(height) => Viewport::new(viewport.width, height),
            None => viewport,
        }
    }
}
