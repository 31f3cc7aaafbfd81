// Policy evaluation - normalize, snapshot, decide

use crate::api::{EventNormalizer, GroupMemberApi, PassthroughNormalizer};
use crate::config::Config;
use crate::engine::policy::RoleCheckPolicy;
use crate::engine::roles::SenderRoles;
use crate::state::member_cache::MemberInfoCache;
use tracing::debug;

/// Permission evaluator - the entry point used by the hosting dispatcher
///
/// Holds the member cache shared by every evaluation and the normalizer
/// for the host's raw event type. Cloning shares the same cache.
#[derive(Clone)]
pub struct PermissionEvaluator<N = PassthroughNormalizer> {
    cache: MemberInfoCache,
    normalizer: N,
}

impl PermissionEvaluator<PassthroughNormalizer> {
    /// Evaluator over pre-normalized events with a cache built from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(MemberInfoCache::from_config(config), PassthroughNormalizer)
    }
}

impl<N: EventNormalizer> PermissionEvaluator<N> {
    pub fn new(cache: MemberInfoCache, normalizer: N) -> Self {
        Self { cache, normalizer }
    }

    pub fn cache(&self) -> &MemberInfoCache {
        &self.cache
    }

    /// Normalize `raw_event` and build its sender snapshot
    pub async fn snapshot<A>(&self, api: &A, raw_event: &N::RawEvent) -> SenderRoles
    where
        A: GroupMemberApi + ?Sized,
    {
        let event = self.normalizer.normalize(raw_event);
        SenderRoles::create(api, &self.cache, event).await
    }

    /// Check whether the sender of `raw_event` satisfies `policy`
    ///
    /// Steps run strictly in order: normalize, build the snapshot (the only
    /// place a member lookup can suspend), apply the policy and await it if
    /// it is pending. A member lookup failure only shows up as absent roles;
    /// a policy error is returned unchanged.
    pub async fn test<A, P>(&self, api: &A, policy: &P, raw_event: &N::RawEvent) -> Result<bool, P::Error>
    where
        A: GroupMemberApi + ?Sized,
        P: RoleCheckPolicy + ?Sized,
    {
        let roles = self.snapshot(api, raw_event).await;
        let outcome = policy.check(&roles);
        let pending = outcome.is_pending();
        let allowed = outcome.resolve().await?;

        debug!(
            message_type = %roles.event().message_type,
            group_id = ?roles.event().group_id,
            user_id = roles.event().user_id,
            pending,
            allowed,
            "Role check policy evaluated"
        );

        Ok(allowed)
    }
}
