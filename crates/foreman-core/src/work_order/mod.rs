//! Work-order domain module.
//!
//! A work order is the structured checklist of planning templates the
//! backend tracks for the active project. The raw payload the backend
//! reports is normalized into the UI-ready shape by the projector.

mod model;
mod projector;

// Re-export public API
pub use model::{TemplateProgress, TemplateStatus, WorkOrder};
pub use projector::project_work_order;
