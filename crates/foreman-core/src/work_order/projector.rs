//! Work-order projection.
//!
//! Pure transform from the raw work-order payload the backend reports into
//! the normalized [`WorkOrder`] shape. Total, deterministic, and
//! side-effect-free: the same payload always projects to the same output,
//! which is what lets concurrent status refreshes race safely under
//! last-write-wins.

use super::model::{TemplateProgress, TemplateStatus, WorkOrder};
use crate::protocol::{TemplatePayload, WorkOrderPayload};

/// Normalizes a raw work-order payload.
pub fn project_work_order(raw: &WorkOrderPayload) -> WorkOrder {
    WorkOrder {
        templates: raw.templates.iter().map(project_template).collect(),
    }
}

fn project_template(raw: &TemplatePayload) -> TemplateProgress {
    // Partition required_fields against the reported missing set, keeping
    // required_fields order in both halves. The raw status tag is not
    // trusted: the field partition is authoritative, so a malformed payload
    // still yields a consistent completed/missing/status triple.
    let completed_fields: Vec<String> = raw
        .required_fields
        .iter()
        .filter(|f| !raw.missing_fields.contains(f))
        .cloned()
        .collect();
    let missing_fields: Vec<String> = raw
        .required_fields
        .iter()
        .filter(|f| raw.missing_fields.contains(f))
        .cloned()
        .collect();

    let status = if missing_fields.is_empty() {
        // An empty requirement set is trivially satisfied, whatever the
        // backend tagged it.
        TemplateStatus::Complete
    } else if completed_fields.is_empty() {
        TemplateStatus::Pending
    } else {
        TemplateStatus::Partial
    };

    TemplateProgress {
        name: raw.name.clone(),
        required_fields: raw.required_fields.clone(),
        completed_fields,
        missing_fields,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(
        name: &str,
        required: &[&str],
        missing: &[&str],
        status: Option<&str>,
    ) -> TemplatePayload {
        TemplatePayload {
            name: name.to_string(),
            required_fields: required.iter().map(|s| s.to_string()).collect(),
            missing_fields: missing.iter().map(|s| s.to_string()).collect(),
            status: status.map(|s| s.to_string()),
        }
    }

    fn payload(templates: Vec<TemplatePayload>) -> WorkOrderPayload {
        WorkOrderPayload {
            project_title: None,
            protagonist_name: None,
            mode: None,
            templates,
        }
    }

    #[test]
    fn test_status_complete_when_nothing_missing() {
        let raw = payload(vec![template(
            "premise",
            &["logline", "stakes"],
            &[],
            Some("complete"),
        )]);
        let projected = project_work_order(&raw);
        assert_eq!(projected.templates[0].status, TemplateStatus::Complete);
        assert_eq!(projected.templates[0].completed_fields, vec!["logline", "stakes"]);
    }

    #[test]
    fn test_status_pending_when_everything_missing() {
        let raw = payload(vec![template(
            "premise",
            &["logline", "stakes"],
            &["logline", "stakes"],
            Some("not_started"),
        )]);
        let projected = project_work_order(&raw);
        assert_eq!(projected.templates[0].status, TemplateStatus::Pending);
        assert!(projected.templates[0].completed_fields.is_empty());
    }

    #[test]
    fn test_status_partial_otherwise() {
        let raw = payload(vec![template(
            "premise",
            &["logline", "stakes", "theme"],
            &["theme"],
            Some("in_progress"),
        )]);
        let projected = project_work_order(&raw);
        let t = &projected.templates[0];
        assert_eq!(t.status, TemplateStatus::Partial);
        assert_eq!(t.completed_fields, vec!["logline", "stakes"]);
        assert_eq!(t.missing_fields, vec!["theme"]);
    }

    #[test]
    fn test_empty_required_fields_forces_complete() {
        // Trivially satisfied, even when the backend tags it not_started.
        let raw = payload(vec![template("notes", &[], &[], Some("not_started"))]);
        let projected = project_work_order(&raw);
        assert_eq!(projected.templates[0].status, TemplateStatus::Complete);
    }

    #[test]
    fn test_completed_and_missing_partition_required() {
        let raw = payload(vec![template(
            "cast",
            &["hero", "rival", "mentor"],
            &["rival", "stray_field"],
            None,
        )]);
        let projected = project_work_order(&raw);
        let t = &projected.templates[0];

        // Union reconstructs required_fields order, intersection is empty.
        let mut union: Vec<&String> = Vec::new();
        for f in &t.required_fields {
            assert_ne!(
                t.completed_fields.contains(f),
                t.missing_fields.contains(f),
                "field {f} must be in exactly one half"
            );
            union.push(f);
        }
        assert_eq!(union.len(), t.required_fields.len());
        // A missing entry the backend invented for an unknown field is
        // dropped rather than breaking the partition.
        assert_eq!(t.missing_fields, vec!["rival"]);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let raw = payload(vec![
            template("premise", &["logline", "stakes"], &["stakes"], None),
            template("cast", &["hero"], &[], Some("complete")),
        ]);
        assert_eq!(project_work_order(&raw), project_work_order(&raw));
    }
}
