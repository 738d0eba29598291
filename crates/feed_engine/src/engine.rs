use std::sync::{mpsc, Arc};
use std::thread;

use feed_core::PageRequest;
use feed_logging::{feed_debug, feed_error};

use crate::{EngineEvent, FailureKind, RepositorySource, SourceError};

enum EngineCommand {
    Fetch(PageRequest),
    Shutdown,
}

/// Runs page fetches on a background tokio runtime and hands completions back
/// over a channel the UI thread polls.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn RepositorySource>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    feed_error!("Failed to start fetch runtime: {}", err);
                    fail_all(cmd_rx, event_tx, err.to_string());
                    return;
                }
            };

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Fetch(request) => {
                        let source = source.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = source.fetch_page(&request).await;
                            feed_debug!(
                                "Fetch {:?} offset={} finished ok={}",
                                request.id,
                                request.offset,
                                result.is_ok()
                            );
                            let _ = event_tx.send(EngineEvent::PageCompleted {
                                request_id: request.id,
                                result,
                            });
                        });
                    }
                    EngineCommand::Shutdown => break,
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch(&self, request: PageRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Fetch(request));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: String,
) {
    while let Ok(EngineCommand::Fetch(request)) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::PageCompleted {
            request_id: request.id,
            result: Err(SourceError::new(FailureKind::Network, reason.clone())),
        });
    }
}
