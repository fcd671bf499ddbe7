//! Feedback module for persisting reader relevance judgements
//!
//! This module handles:
//! - The append-only `FeedbackStore` interface used by the presentation layer
//! - A JSON-file implementation of that interface

mod json;
mod traits;

pub use json::JsonFeedbackStore;
pub use traits::{FeedbackRecord, FeedbackResult, FeedbackStore, Relevance};
