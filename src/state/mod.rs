// Shared in-memory state

pub mod member_cache;
