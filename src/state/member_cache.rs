// Moka cache for group member info

use crate::api::GroupMemberApi;
use crate::config::Config;
use crate::core::models::{MemberInfo, MemberKey};
use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// How long a member lookup result is reused
pub const DEFAULT_MEMBER_TTL: Duration = Duration::from_secs(2 * 60);

pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Cached value: `None` records a failed lookup for the TTL window
pub type CachedMember = Option<Arc<MemberInfo>>;

/// Time-bounded cache in front of the remote member-info call
///
/// Entries are keyed by `(self_id, group_id, user_id)` and live for a fixed
/// TTL. Lookups are single-flight per key: while one caller is loading,
/// concurrent callers for the same key wait for that result instead of
/// issuing their own remote call. A loader that is dropped before it
/// finishes writes nothing, so the next caller loads again.
#[derive(Clone)]
pub struct MemberInfoCache {
    cache: Cache<MemberKey, CachedMember>,
}

impl MemberInfoCache {
    /// Create a new MemberInfoCache
    ///
    /// # Parameters
    /// * `ttl` - Time-to-live for every entry, failed lookups included
    /// * `max_capacity` - Maximum number of members to keep
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::from_secs(config.member_cache_ttl_secs),
            config.member_cache_max_capacity,
        )
    }

    /// Return the cached value for `key`, running `loader` on a miss
    ///
    /// Only one loader runs per key at a time; its output is stored for the
    /// cache TTL and handed to every caller that was waiting on it.
    pub async fn get_or_populate<F>(&self, key: MemberKey, loader: F) -> CachedMember
    where
        F: Future<Output = CachedMember>,
    {
        self.cache.get_with(key, loader).await
    }

    /// Look up a group member, hitting the platform only on a miss
    ///
    /// The remote call always bypasses the platform's own cache. Any failure
    /// is logged and cached as `None`; callers never see it.
    pub async fn fetch<A>(&self, api: &A, self_id: i64, group_id: i64, user_id: i64) -> CachedMember
    where
        A: GroupMemberApi + ?Sized,
    {
        let key = MemberKey {
            self_id,
            group_id,
            user_id,
        };

        self.get_or_populate(key, async move {
            debug!(member = %key, "Member info cache miss");
            match api.get_group_member_info(self_id, group_id, user_id, true).await {
                Ok(info) => Some(Arc::new(info)),
                Err(e) if e.is_remote_failure() => {
                    warn!(member = %key, error = %e, "Member info lookup failed, caching as absent");
                    None
                }
                Err(e) => {
                    error!(member = %key, error = %e, "Unexpected member info error, caching as absent");
                    None
                }
            }
        })
        .await
    }

    /// Cached value for `key` without loading it
    pub async fn peek(&self, key: &MemberKey) -> Option<CachedMember> {
        self.cache.get(key).await
    }

    /// Drop one entry so the next lookup goes to the platform
    pub async fn invalidate(&self, key: &MemberKey) {
        self.cache.invalidate(key).await;
    }

    /// Approximate number of live entries
    ///
    /// Moka applies writes lazily; pending maintenance is flushed first so
    /// the count reflects recent inserts.
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for MemberInfoCache {
    fn default() -> Self {
        Self::new(DEFAULT_MEMBER_TTL, DEFAULT_MAX_CAPACITY)
    }
}
