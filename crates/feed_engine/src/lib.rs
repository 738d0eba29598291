//! Feed engine: repository API client, page cache and background fetch worker.
mod cache;
mod engine;
mod persist;
mod source;
mod types;

pub use cache::{cache_key, CacheEntry, CachedSource, PageCache, DEFAULT_CACHE_TTL};
pub use engine::EngineHandle;
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use source::{endpoint_url, RepositorySource, ReqwestSource, SourceSettings};
pub use types::{EngineEvent, FailureKind, SourceError};
