//! Work-order domain model.

use serde::{Deserialize, Serialize};

/// Completion state of a single planning template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    /// No required field has been filled in yet.
    Pending,
    /// Some required fields are filled, some are still missing.
    Partial,
    /// Every required field is filled.
    Complete,
}

/// Normalized completion state of one planning template.
///
/// `completed_fields` is always recomputed from the raw payload as the set
/// difference `required_fields - missing_fields`, preserving the order of
/// `required_fields`. It is never mutated independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateProgress {
    /// Template name as the backend reports it.
    pub name: String,
    /// All fields the template requires.
    pub required_fields: Vec<String>,
    /// Required fields already captured.
    pub completed_fields: Vec<String>,
    /// Required fields still missing.
    pub missing_fields: Vec<String>,
    /// Derived three-valued status.
    pub status: TemplateStatus,
}

/// The normalized work order for the active project.
///
/// Replaced wholesale on every status refresh and on every chat turn that
/// reports a work-order status; cleared on reset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Per-template completion progress.
    pub templates: Vec<TemplateProgress>,
}

impl WorkOrder {
    /// Whether every template is complete.
    pub fn is_complete(&self) -> bool {
        self.templates
            .iter()
            .all(|t| t.status == TemplateStatus::Complete)
    }
}
