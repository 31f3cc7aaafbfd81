// Data models for sender context and group membership

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::errors::PermissionError;

/// Chat scope a message arrived in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Group,
    Private,
    Discuss,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Group => "group",
            MessageType::Private => "private",
            MessageType::Discuss => "discuss",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group" => Ok(MessageType::Group),
            "private" => Ok(MessageType::Private),
            "discuss" => Ok(MessageType::Discuss),
            other => Err(PermissionError::ConfigurationError(format!(
                "Unknown message type '{}'",
                other
            ))),
        }
    }
}

/// Smallest normalized record of an incoming message
///
/// Produced by an [`EventNormalizer`](crate::api::EventNormalizer) and
/// consumed once to build a [`SenderRoles`](crate::engine::roles::SenderRoles).
/// `sender_id` is kept apart from `user_id` because the two can differ,
/// e.g. for anonymous group senders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimalEvent {
    pub message_type: MessageType,
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub group_id: Option<i64>,
    pub user_id: i64,
    pub sender_id: i64,
    pub self_id: i64,
}

impl MinimalEvent {
    /// Cache key for this event's member lookup
    ///
    /// Only group events carrying a group id have one.
    pub fn member_key(&self) -> Option<MemberKey> {
        match (self.message_type, self.group_id) {
            (MessageType::Group, Some(group_id)) => Some(MemberKey {
                self_id: self.self_id,
                group_id,
                user_id: self.user_id,
            }),
            _ => None,
        }
    }
}

/// Role of a user inside a group
///
/// Anything the platform reports besides `admin` or `owner`, including a
/// missing role, is treated as `member`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
    Owner,
}

impl From<Option<String>> for MemberRole {
    fn from(role: Option<String>) -> Self {
        match role.as_deref() {
            Some("admin") => MemberRole::Admin,
            Some("owner") => MemberRole::Owner,
            _ => MemberRole::Member,
        }
    }
}

/// Platform-reported membership data for one user in one group
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberInfo {
    #[serde(default)]
    pub role: MemberRole,
    /// Remaining platform fields, carried along but never interpreted
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MemberInfo {
    pub fn with_role(role: MemberRole) -> Self {
        Self {
            role,
            extra: serde_json::Map::new(),
        }
    }
}

/// Member cache key: which bot asked, about which user, in which group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey {
    pub self_id: i64,
    pub group_id: i64,
    pub user_id: i64,
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.self_id, self.group_id, self.user_id)
    }
}
