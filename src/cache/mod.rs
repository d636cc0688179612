//! Caching subsystem.
//!
//! [`ResponseCache`] is an opt-in LRU + TTL cache of oracle answers, used
//! through [`CachingClassifyProvider`](crate::providers::CachingClassifyProvider).

pub mod response;

pub use response::{CacheConfig, ResponseCache};
