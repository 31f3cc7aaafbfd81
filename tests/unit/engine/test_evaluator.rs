// Unit tests for the permission evaluator

use crate::common::{group_event, private_event, MockMemberApi};
use sentinel_permission::api::EventNormalizer;
use sentinel_permission::core::models::{MemberRole, MessageType, MinimalEvent};
use sentinel_permission::engine::evaluator::PermissionEvaluator;
use sentinel_permission::engine::policy::{async_policy, sync_policy, PolicyOutcome, RoleCheckPolicy};
use sentinel_permission::engine::roles::SenderRoles;
use sentinel_permission::state::member_cache::MemberInfoCache;
use sentinel_permission::{Config, PassthroughNormalizer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, PartialEq)]
struct PolicyFailure(&'static str);

/// Normalizer over a tiny raw event shape, counting how often it runs
struct CountingNormalizer {
    calls: Arc<AtomicUsize>,
}

struct RawGroupMessage {
    bot: i64,
    group: i64,
    author: i64,
}

impl EventNormalizer for CountingNormalizer {
    type RawEvent = RawGroupMessage;

    fn normalize(&self, raw: &RawGroupMessage) -> MinimalEvent {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MinimalEvent {
            message_type: MessageType::Group,
            sub_type: "normal".to_string(),
            group_id: Some(raw.group),
            user_id: raw.author,
            sender_id: raw.author,
            self_id: raw.bot,
        }
    }
}

/// Test immediate policy decision
#[tokio::test]
async fn test_immediate_policy() {
    let api = MockMemberApi::default().with_member(1, 100, 7, MemberRole::Admin);
    let evaluator = PermissionEvaluator::from_config(&Config::default());
    let policy = sync_policy(|roles| roles.is_groupchat() && roles.is_admin());

    assert_eq!(evaluator.test(&api, &policy, &group_event(100, 7)).await, Ok(true));
    assert_eq!(evaluator.test(&api, &policy, &group_event(100, 8)).await, Ok(false));
}

/// Test suspending policy is awaited before deciding
#[tokio::test]
async fn test_pending_policy() {
    let api = MockMemberApi::default().with_member(1, 100, 7, MemberRole::Owner);
    let evaluator = PermissionEvaluator::new(MemberInfoCache::default(), PassthroughNormalizer);
    let policy = async_policy(|roles: SenderRoles| async move {
        tokio::task::yield_now().await;
        Ok::<_, PolicyFailure>(roles.is_owner())
    });

    assert_eq!(evaluator.test(&api, &policy, &group_event(100, 7)).await, Ok(true));
}

/// Test a policy error is returned unchanged
#[tokio::test]
async fn test_policy_error_propagates() {
    let api = MockMemberApi::default();
    let evaluator = PermissionEvaluator::new(MemberInfoCache::default(), PassthroughNormalizer);

    let immediate = |_: &SenderRoles| PolicyOutcome::Immediate(Err(PolicyFailure("quota lookup failed")));
    let pending = async_policy(|_: SenderRoles| async { Err::<bool, _>(PolicyFailure("timeout")) });

    assert_eq!(
        evaluator.test(&api, &immediate, &private_event("friend", 7)).await,
        Err(PolicyFailure("quota lookup failed"))
    );
    assert_eq!(
        evaluator.test(&api, &pending, &private_event("friend", 7)).await,
        Err(PolicyFailure("timeout"))
    );
}

/// Test remote failure does not surface through the evaluator
#[tokio::test]
async fn test_remote_failure_does_not_propagate() {
    let api = MockMemberApi::failing();
    let evaluator = PermissionEvaluator::new(MemberInfoCache::default(), PassthroughNormalizer);
    let policy = sync_policy(|roles| roles.is_admin() || roles.is_owner());

    assert_eq!(evaluator.test(&api, &policy, &group_event(100, 7)).await, Ok(false));
}

/// Test custom normalizer runs once per evaluation and feeds the cache key
#[tokio::test]
async fn test_custom_normalizer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let api = MockMemberApi::default().with_member(5, 300, 42, MemberRole::Admin);
    let evaluator = PermissionEvaluator::new(
        MemberInfoCache::default(),
        CountingNormalizer {
            calls: Arc::clone(&calls),
        },
    );
    let policy = sync_policy(|roles| roles.is_admin() && roles.from_group(300));
    let raw = RawGroupMessage {
        bot: 5,
        group: 300,
        author: 42,
    };

    assert_eq!(evaluator.test(&api, &policy, &raw).await, Ok(true));
    assert_eq!(evaluator.test(&api, &policy, &raw).await, Ok(true));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(api.calls(), 1);
}

/// Test policies usable as trait objects
#[tokio::test]
async fn test_dyn_policy() {
    let api = MockMemberApi::default();
    let evaluator = PermissionEvaluator::new(MemberInfoCache::default(), PassthroughNormalizer);
    let policies: Vec<Box<dyn RoleCheckPolicy<Error = std::convert::Infallible>>> = vec![
        Box::new(sync_policy(|roles| roles.is_private_friend())),
        Box::new(sync_policy(|roles| roles.is_private_group())),
    ];

    let event = private_event("friend", 7);
    let mut decisions = vec![];
    for policy in &policies {
        decisions.push(evaluator.test(&api, policy.as_ref(), &event).await.unwrap());
    }

    assert_eq!(decisions, vec![true, false]);
}
