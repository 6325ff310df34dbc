//! Project lifecycle controller.
//!
//! Brings the session store into agreement with authoritative backend
//! state and manages start/reset. The session is `NO_PROJECT` until a
//! successful start and returns there on reset; `ACTIVE` persists across
//! refreshes.

use foreman_core::backend::WorkflowBackend;
use foreman_core::error::Result;
use foreman_core::protocol::StartRequest;
use foreman_core::session::{ChatMessage, Project, SessionStore};
use foreman_core::work_order::project_work_order;
use std::sync::Arc;

/// Result of a start attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The project was started and announced in the transcript.
    Started,
    /// Title or protagonist was blank after trimming; nothing was sent
    /// and nothing surfaced. A precondition, not a runtime error.
    RejectedBlank,
}

/// Orchestrates project start, status refresh, and reset.
pub struct LifecycleController {
    store: Arc<SessionStore>,
    backend: Arc<dyn WorkflowBackend>,
}

impl LifecycleController {
    /// Creates a controller over the given store and backend.
    pub fn new(store: Arc<SessionStore>, backend: Arc<dyn WorkflowBackend>) -> Self {
        Self { store, backend }
    }

    /// The store this controller mutates.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Re-synchronizes local state from the status endpoint.
    ///
    /// On success the backend payload is mirrored wholesale: project
    /// identity and mode, the work order (through the projector) when the
    /// payload carries one, and KB stats when present. Fields the payload
    /// omits keep their previously known values.
    ///
    /// # Errors
    ///
    /// Returns the failure as an "offline" signal. Existing state is left
    /// untouched so a transient failure never discards an active session
    /// or its transcript, and nothing is written to the transcript since
    /// refresh runs silently on a timer.
    ///
    /// There is no serialization guard here: concurrent refreshes replace
    /// state wholesale from the same deterministic projection, so the last
    /// response to land wins. A response issued against a session that was
    /// reset or restarted while it was in flight is discarded instead,
    /// like a stale chat response.
    pub async fn refresh_status(&self) -> Result<()> {
        let epoch = self.store.epoch();
        let status = self.backend.status().await.map_err(|e| {
            tracing::debug!(target: "foreman::lifecycle", "Status refresh failed: {}", e);
            e
        })?;

        let applied = self.store.apply_if_current(epoch, |session| {
            if status.active {
                let previous = session.project.take();
                let order = status.work_order.as_ref();

                let title = order
                    .and_then(|o| o.project_title.clone())
                    .or_else(|| previous.as_ref().map(|p| p.title.clone()))
                    .unwrap_or_default();
                let protagonist = order
                    .and_then(|o| o.protagonist_name.clone())
                    .or_else(|| previous.as_ref().map(|p| p.protagonist.clone()))
                    .unwrap_or_default();
                // Top-level mode is authoritative over the copy inside the
                // work order.
                let mode = status
                    .mode
                    .or_else(|| order.and_then(|o| o.mode))
                    .or(previous.map(|p| p.mode))
                    .unwrap_or_default();

                session.project = Some(Project {
                    title,
                    protagonist,
                    mode,
                });
                if let Some(order) = order {
                    session.work_order = Some(project_work_order(order));
                }
                if let Some(kb_stats) = status.kb_stats {
                    session.kb_stats = Some(kb_stats);
                }
            } else {
                session.project = None;
                session.work_order = None;
            }
        });

        if !applied {
            tracing::debug!(
                target: "foreman::lifecycle",
                "Discarded status response issued against a previous session"
            );
        }

        Ok(())
    }

    /// Starts a new project.
    ///
    /// Blank title or protagonist (after trimming) is a silent no-op. On
    /// success the returned project is installed, the transcript is
    /// replaced with a single system message announcing mode, title, and
    /// protagonist, and a status refresh populates the work order.
    ///
    /// # Errors
    ///
    /// On backend failure the transcript is replaced with a single
    /// `Error: ...` system message, the session stays inactive, and the
    /// failure is returned.
    pub async fn start_project(&self, title: &str, protagonist: &str) -> Result<StartOutcome> {
        let title = title.trim();
        let protagonist = protagonist.trim();
        if title.is_empty() || protagonist.is_empty() {
            tracing::debug!(
                target: "foreman::lifecycle",
                "Start rejected: blank title or protagonist"
            );
            return Ok(StartOutcome::RejectedBlank);
        }

        let request = StartRequest {
            project_title: title.to_string(),
            protagonist_name: protagonist.to_string(),
        };

        match self.backend.start(&request).await {
            Ok(payload) => {
                tracing::info!(
                    target: "foreman::lifecycle",
                    "Project '{}' started in {} mode",
                    payload.project_title,
                    payload.mode
                );
                let announcement = format!(
                    "Project '{}' started in {} mode. Protagonist: {}.",
                    payload.project_title, payload.mode, payload.protagonist_name
                );
                self.store.install_project(Project {
                    title: payload.project_title,
                    protagonist: payload.protagonist_name,
                    mode: payload.mode,
                });
                self.store
                    .replace_transcript(vec![ChatMessage::system(announcement)]);

                // Populate the work order; a transient failure here leaves
                // the freshly started project in place.
                if let Err(e) = self.refresh_status().await {
                    tracing::warn!(
                        target: "foreman::lifecycle",
                        "Status refresh after start failed: {}",
                        e
                    );
                }

                Ok(StartOutcome::Started)
            }
            Err(e) => {
                self.store
                    .replace_transcript(vec![ChatMessage::system(format!("Error: {}", e))]);
                self.store.replace_project(None);
                Err(e)
            }
        }
    }

    /// Abandons the active project.
    ///
    /// The backend call is best-effort: the user has explicitly asked to
    /// abandon the session, so local state returns to empty even when the
    /// network call fails. The epoch bump orphans any response still in
    /// flight.
    pub async fn reset_project(&self) {
        if let Err(e) = self.backend.reset().await {
            tracing::warn!(
                target: "foreman::lifecycle",
                "Backend reset failed, clearing local state anyway: {}",
                e
            );
        }
        self.store.reset_session();
    }
}
