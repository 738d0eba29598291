use std::sync::Arc;
use std::time::Duration;

use feed_core::{FeedQuery, FetchKind, Msg, Page, PageRequest, RequestId};
use feed_engine::{EngineEvent, EngineHandle, FailureKind, RepositorySource, SourceError};

struct ScriptedSource;

#[async_trait::async_trait]
impl RepositorySource for ScriptedSource {
    async fn fetch_page(&self, request: &PageRequest) -> Result<Page, SourceError> {
        if request.offset > 0 {
            return Err(SourceError {
                kind: FailureKind::Timeout,
                message: "slow".to_string(),
            });
        }
        Ok(Page {
            repositories: Vec::new(),
            total: 0,
            limit: request.limit as i64,
            offset: 0,
            has_more: false,
        })
    }
}

fn request(id: u64, offset: usize) -> PageRequest {
    PageRequest {
        id: RequestId(id),
        kind: FetchKind::Initial,
        query: FeedQuery::default(),
        offset,
        limit: 20,
        fresh: false,
    }
}

fn next_msg(engine: &EngineHandle) -> Msg {
    engine
        .recv_timeout(Duration::from_secs(5))
        .map(EngineEvent::into_msg)
        .expect("engine answered")
}

#[test]
fn engine_reports_success_and_failure_as_messages() {
    let engine = EngineHandle::new(Arc::new(ScriptedSource));

    engine.fetch(request(1, 0));
    match next_msg(&engine) {
        Msg::PageLoaded { request_id, page } => {
            assert_eq!(request_id, RequestId(1));
            assert!(!page.has_more);
        }
        other => panic!("unexpected {other:?}"),
    }

    engine.fetch(request(2, 20));
    assert_eq!(
        next_msg(&engine),
        Msg::PageFailed {
            request_id: RequestId(2),
            message: "Failed to fetch repositories".to_string(),
        }
    );
    assert!(engine.try_recv().is_none());
}
