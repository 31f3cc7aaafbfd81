// Sender roles snapshot - read-only view of who sent an event

use crate::api::GroupMemberApi;
use crate::core::models::{MemberInfo, MemberRole, MessageType, MinimalEvent};
use crate::state::member_cache::MemberInfoCache;
use std::sync::Arc;

/// Immutable snapshot of a message sender's context and group role
///
/// Built once per evaluation by [`SenderRoles::create`]. Every predicate is
/// a pure read of the stored event and member info; none of them performs
/// I/O. Member info is only ever present for group events, and its absence
/// makes every role predicate false.
#[derive(Debug, Clone)]
pub struct SenderRoles {
    event: MinimalEvent,
    member: Option<Arc<MemberInfo>>,
}

impl SenderRoles {
    /// Build a snapshot for `event`
    ///
    /// Group events consult the member cache (which may suspend on a remote
    /// call); every other chat type skips it. Lookup failures surface here
    /// only as missing member info.
    pub async fn create<A>(api: &A, cache: &MemberInfoCache, event: MinimalEvent) -> Self
    where
        A: GroupMemberApi + ?Sized,
    {
        let member = match event.member_key() {
            Some(key) => {
                cache
                    .fetch(api, key.self_id, key.group_id, key.user_id)
                    .await
            }
            None => None,
        };

        Self { event, member }
    }

    /// Snapshot over already-known data, without any lookup
    ///
    /// Member info passed for a non-group event is discarded.
    pub fn from_parts(event: MinimalEvent, member: Option<Arc<MemberInfo>>) -> Self {
        let member = match event.message_type {
            MessageType::Group => member,
            _ => None,
        };
        Self { event, member }
    }

    pub fn event(&self) -> &MinimalEvent {
        &self.event
    }

    pub fn member_info(&self) -> Option<&MemberInfo> {
        self.member.as_deref()
    }

    pub fn is_groupchat(&self) -> bool {
        self.event.message_type == MessageType::Group
    }

    pub fn is_privatechat(&self) -> bool {
        self.event.message_type == MessageType::Private
    }

    pub fn is_discusschat(&self) -> bool {
        self.event.message_type == MessageType::Discuss
    }

    pub fn is_anonymous(&self) -> bool {
        self.event.sub_type == "anonymous"
    }

    /// Private message from a friend
    pub fn is_private_friend(&self) -> bool {
        self.is_privatechat() && self.event.sub_type == "friend"
    }

    /// Private message started from a group (temporary session)
    pub fn is_private_group(&self) -> bool {
        self.is_privatechat() && self.event.sub_type == "group"
    }

    /// Group admin; owners are not admins
    pub fn is_admin(&self) -> bool {
        self.has_role(MemberRole::Admin)
    }

    pub fn is_owner(&self) -> bool {
        self.has_role(MemberRole::Owner)
    }

    pub fn from_group(&self, group_id: i64) -> bool {
        self.event.group_id == Some(group_id)
    }

    pub fn sent_by(&self, sender_id: i64) -> bool {
        self.event.sender_id == sender_id
    }

    fn has_role(&self, role: MemberRole) -> bool {
        self.member.as_ref().is_some_and(|m| m.role == role)
    }
}
