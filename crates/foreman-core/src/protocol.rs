//! Wire payload types for the assistant backend.
//!
//! These are the shapes the controller reads from the four backend
//! operations (status, start, chat, reset). Fields the backend may omit
//! carry `#[serde(default)]` so a sparse payload still deserializes; a
//! payload that fails to deserialize is treated as a transport failure.

use crate::kb::KbStats;
use crate::session::Mode;
use serde::{Deserialize, Serialize};

/// Raw per-template progress as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePayload {
    /// Template name.
    pub name: String,
    /// All fields the template requires.
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// Required fields the backend still considers missing.
    #[serde(default)]
    pub missing_fields: Vec<String>,
    /// The backend's own status tag (`"not_started"`, `"complete"`, or
    /// anything else). Informational only; the projector derives status
    /// from the field partition.
    #[serde(default)]
    pub status: Option<String>,
}

/// Raw work-order snapshot as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkOrderPayload {
    /// Title of the project the work order belongs to.
    #[serde(default)]
    pub project_title: Option<String>,
    /// Protagonist of that project.
    #[serde(default)]
    pub protagonist_name: Option<String>,
    /// Workflow phase the backend is in.
    #[serde(default)]
    pub mode: Option<Mode>,
    /// Raw template progress entries.
    #[serde(default)]
    pub templates: Vec<TemplatePayload>,
}

/// Response of the `status` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Whether a project is active on the backend.
    pub active: bool,
    /// Current workflow phase; authoritative over the copy inside
    /// `work_order` when both are present.
    #[serde(default)]
    pub mode: Option<Mode>,
    /// Current work-order snapshot, when one exists.
    #[serde(default)]
    pub work_order: Option<WorkOrderPayload>,
    /// Knowledge-base counters, when the backend has any.
    #[serde(default)]
    pub kb_stats: Option<KbStats>,
}

/// Request of the `start` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRequest {
    /// Title for the new project.
    pub project_title: String,
    /// Protagonist for the new project.
    pub protagonist_name: String,
}

/// Response of the `start` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartPayload {
    /// Workflow phase the backend opened the project in.
    pub mode: Mode,
    /// Title as the backend recorded it.
    pub project_title: String,
    /// Protagonist as the backend recorded it.
    pub protagonist_name: String,
}

/// Request of the `chat` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message text.
    pub message: String,
}

/// Response of the `chat` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPayload {
    /// The assistant's reply text.
    pub response: String,
    /// Updated work order, when the turn changed it.
    #[serde(default)]
    pub work_order_status: Option<WorkOrderPayload>,
    /// Names of server-side actions the turn triggered (KB writes etc.).
    #[serde(default)]
    pub actions_executed: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_payload_full() {
        let json = r#"{
            "active": true,
            "mode": "DIRECTOR",
            "work_order": {
                "project_title": "Big Brain",
                "protagonist_name": "Mickey Bardot",
                "mode": "DIRECTOR",
                "templates": [
                    {
                        "name": "premise",
                        "required_fields": ["logline", "stakes"],
                        "missing_fields": ["stakes"],
                        "status": "in_progress"
                    }
                ]
            },
            "kb_stats": {
                "total_entries": 7,
                "by_category": {"character": 3, "constraint": 2, "world": 2}
            }
        }"#;
        let payload: StatusPayload = serde_json::from_str(json).unwrap();
        assert!(payload.active);
        assert_eq!(payload.mode, Some(Mode::Director));
        let wo = payload.work_order.unwrap();
        assert_eq!(wo.project_title.as_deref(), Some("Big Brain"));
        assert_eq!(wo.templates.len(), 1);
        assert_eq!(payload.kb_stats.unwrap().total_entries, 7);
    }

    #[test]
    fn test_status_payload_inactive_sparse() {
        let payload: StatusPayload = serde_json::from_str(r#"{"active": false}"#).unwrap();
        assert!(!payload.active);
        assert!(payload.mode.is_none());
        assert!(payload.work_order.is_none());
        assert!(payload.kb_stats.is_none());
    }

    #[test]
    fn test_chat_payload_without_side_effects() {
        let payload: ChatPayload = serde_json::from_str(r#"{"response": "Noted."}"#).unwrap();
        assert_eq!(payload.response, "Noted.");
        assert!(payload.work_order_status.is_none());
        assert!(payload.actions_executed.is_empty());
    }

    #[test]
    fn test_chat_payload_with_actions() {
        let json = r#"{"response": "Noted.", "actions_executed": ["kb_write", "wo_update"]}"#;
        let payload: ChatPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.actions_executed, vec!["kb_write", "wo_update"]);
    }

    #[test]
    fn test_start_payload() {
        let json = r#"{"mode": "ARCHITECT", "project_title": "Big Brain", "protagonist_name": "Mickey Bardot"}"#;
        let payload: StartPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.mode, Mode::Architect);
        assert_eq!(payload.project_title, "Big Brain");
    }
}
