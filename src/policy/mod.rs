//! Replacement policies.
//!
//! - [`lru`]: a fixed page count with least-recently-used eviction.
//! - [`arc`]: Adaptive Replacement Cache composed of four LRU lists.

pub mod arc;
pub mod lru;
