//! Two-party chat: message model and the polling synchronizer.

pub mod model;
pub mod synchronizer;

pub use model::ChatMessage;
pub use synchronizer::ChatSynchronizer;
