//! Common types and traits for all domain entities

pub mod entity_id;
pub mod serde_utils;

// Re-exports
pub use entity_id::{ClientId, CommentId, EntityId, OrderId, PayoutRequestId, PostId};
pub use serde_utils::null_as_default;
