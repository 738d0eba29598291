use std::collections::HashMap;
use std::time::Instant;

use feed_core::{Effect, Msg, TimerKind};
use feed_engine::EngineHandle;
use feed_logging::{feed_debug, feed_info};

/// One-shot timers keyed by kind; scheduling a kind again replaces it.
#[derive(Debug, Default)]
pub struct Timers {
    entries: HashMap<TimerKind, (u64, Instant)>,
}

impl Timers {
    pub fn schedule(&mut self, timer: TimerKind, token: u64, deadline: Instant) {
        self.entries.insert(timer, (token, deadline));
    }

    pub fn cancel(&mut self, timer: TimerKind) {
        self.entries.remove(&timer);
    }

    #[cfg(test)]
    fn is_scheduled(&self, timer: TimerKind) -> bool {
        self.entries.contains_key(&timer)
    }

    /// Removes and returns every timer whose deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> Vec<Msg> {
        let due: Vec<TimerKind> = self
            .entries
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(timer, _)| *timer)
            .collect();
        let mut msgs: Vec<(Instant, Msg)> = due
            .into_iter()
            .filter_map(|timer| {
                self.entries
                    .remove(&timer)
                    .map(|(token, deadline)| (deadline, Msg::TimerElapsed { timer, token }))
            })
            .collect();
        msgs.sort_by_key(|(deadline, _)| *deadline);
        msgs.into_iter().map(|(_, msg)| msg).collect()
    }
}

/// Executes store effects against the frame clock, the timers and the engine.
pub struct EffectRunner {
    engine: EngineHandle,
    timers: Timers,
    pending_frame: Option<u64>,
    resize_listener: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            timers: Timers::default(),
            pending_frame: None,
            resize_listener: false,
        }
    }

    pub fn is_listening_for_resize(&self) -> bool {
        self.resize_listener
    }

    pub fn run(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                Effect::RequestFrame { token } => {
                    self.pending_frame = Some(token);
                }
                Effect::CancelFrame => {
                    self.pending_frame = None;
                }
                Effect::ScheduleTimer {
                    timer,
                    token,
                    delay,
                } => {
                    self.timers.schedule(timer, token, now + delay);
                }
                Effect::CancelTimer { timer } => {
                    self.timers.cancel(timer);
                }
                Effect::FetchPage(request) => {
                    feed_info!(
                        "FetchPage id={:?} kind={:?} offset={} limit={}",
                        request.id,
                        request.kind,
                        request.offset,
                        request.limit
                    );
                    self.engine.fetch(request);
                }
                Effect::AttachResizeListener => {
                    self.resize_listener = true;
                }
                Effect::DetachResizeListener => {
                    self.resize_listener = false;
                }
            }
        }
    }

    /// Messages that became due at the start of a frame: the requested frame
    /// callback first, then expired timers, then engine completions.
    pub fn poll(&mut self, now: Instant) -> Vec<Msg> {
        let mut msgs = Vec::new();
        if let Some(token) = self.pending_frame.take() {
            msgs.push(Msg::FrameReady { token });
        }
        msgs.extend(self.timers.take_due(now));
        while let Some(event) = self.engine.try_recv() {
            let msg = event.into_msg();
            feed_debug!("Engine event {:?}", msg_label(&msg));
            msgs.push(msg);
        }
        msgs
    }
}

fn msg_label(msg: &Msg) -> &'static str {
    match msg {
        Msg::PageLoaded { .. } => "page-loaded",
        Msg::PageFailed { .. } => "page-failed",
        _ => "other",
    }
}
