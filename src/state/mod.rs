//! State module for tracking crawl progress
//!
//! This module holds the mutable state shared by the branches of one crawl.
//!
//! # Components
//!
//! - `VisitedSet`: lock-guarded set of URLs already dispatched to the fetcher
//! - `HostState`: per-host request timing used for rate limiting

mod host_state;
mod visited;

// Re-export main types
pub use host_state::HostState;
pub use visited::VisitedSet;
