pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::error::{ConfigError, InvariantError, TraceError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{ArcMetricsSnapshot, LruMetricsSnapshot};
pub use crate::policy::arc::{ArcCache, Residency};
pub use crate::policy::lru::LruCache;
pub use crate::stats::Stats;
pub use crate::trace::{ReplayReport, replay};
pub use crate::traits::{PageCache, ReadOnlyPageCache};
