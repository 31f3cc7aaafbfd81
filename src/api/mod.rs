// Capabilities injected by the hosting bot framework

use crate::core::errors::PermissionError;
use crate::core::models::{MemberInfo, MinimalEvent};

/// Trait for the platform's group member lookup
///
/// Implemented by whatever bot/platform client the host uses. Failures
/// should be reported as [`PermissionError::RemoteCallFailed`] or
/// [`PermissionError::Transport`]; the member cache absorbs both.
#[async_trait::async_trait]
pub trait GroupMemberApi: Send + Sync {
    async fn get_group_member_info(
        &self,
        self_id: i64,
        group_id: i64,
        user_id: i64,
        no_cache: bool,
    ) -> Result<MemberInfo, PermissionError>;
}

/// Trait for reducing a raw platform event to a [`MinimalEvent`]
///
/// Normalization is assumed total; malformed events are the caller's bug.
pub trait EventNormalizer: Send + Sync {
    type RawEvent: ?Sized;

    fn normalize(&self, raw: &Self::RawEvent) -> MinimalEvent;
}

/// Normalizer for hosts that already hold a [`MinimalEvent`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughNormalizer;

impl EventNormalizer for PassthroughNormalizer {
    type RawEvent = MinimalEvent;

    fn normalize(&self, raw: &MinimalEvent) -> MinimalEvent {
        raw.clone()
    }
}
