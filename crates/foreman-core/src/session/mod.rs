//! Session domain module.
//!
//! This module contains the session domain model and the observable store
//! that holds the single live session.
//!
//! # Module Structure
//!
//! - `mode`: Workflow phase type (`Mode`)
//! - `message`: Chat transcript types (`MessageRole`, `ChatMessage`)
//! - `model`: Session aggregate (`Project`, `Session`)
//! - `store`: Observable session store (`SessionStore`)

mod message;
mod mode;
mod model;
mod store;

// Re-export public API
pub use message::{ChatMessage, MessageRole};
pub use mode::Mode;
pub use model::{Project, Session};
pub use store::SessionStore;
