//! Session domain model.
//!
//! This module contains the session aggregate that the controllers operate
//! on. It is the "pure" domain model, independent of the wire format the
//! backend speaks.

use super::message::ChatMessage;
use super::mode::Mode;
use crate::kb::KbStats;
use crate::work_order::WorkOrder;
use serde::{Deserialize, Serialize};

/// Identity of the active creative project.
///
/// A `Project` exists iff the session is active. It is created by a
/// successful start and destroyed by reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Working title of the project.
    pub title: String,
    /// Name of the protagonist.
    pub protagonist: String,
    /// Current workflow phase, mirrored from the backend.
    pub mode: Mode,
}

/// The aggregate session state.
///
/// At most one logical session is live at a time. It is owned exclusively
/// by the [`SessionStore`](super::SessionStore); presentation code reads
/// snapshots and all mutation goes through the lifecycle and turn
/// controllers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Session {
    /// The active project, `None` when no project has been started.
    pub project: Option<Project>,
    /// Latest work-order snapshot, replaced wholesale on every refresh.
    pub work_order: Option<WorkOrder>,
    /// Ordered chat transcript, append-only within a session.
    pub transcript: Vec<ChatMessage>,
    /// Knowledge-base counters, `None` until the backend reports them.
    pub kb_stats: Option<KbStats>,
    /// Turn-in-flight flag serializing chat exchanges.
    pub busy: bool,
}

impl Session {
    /// Whether a project is active.
    pub fn is_active(&self) -> bool {
        self.project.is_some()
    }

    /// The current workflow phase, if a project is active.
    pub fn mode(&self) -> Option<Mode> {
        self.project.as_ref().map(|p| p.mode)
    }
}
