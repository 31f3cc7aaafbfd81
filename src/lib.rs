// Library root for Sentinel Permission

pub mod api;
pub mod config;
pub mod core;
pub mod engine;
pub mod logging;
pub mod state;

pub use crate::api::{EventNormalizer, GroupMemberApi, PassthroughNormalizer};
pub use crate::config::Config;
pub use crate::core::errors::PermissionError;
pub use crate::core::models::{MemberInfo, MemberKey, MemberRole, MessageType, MinimalEvent};
pub use crate::engine::evaluator::PermissionEvaluator;
pub use crate::engine::policy::{async_policy, sync_policy, PolicyOutcome, RoleCheckPolicy};
pub use crate::engine::roles::SenderRoles;
pub use crate::state::member_cache::MemberInfoCache;
