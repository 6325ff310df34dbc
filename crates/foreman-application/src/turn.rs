//! Chat turn controller.
//!
//! Runs exactly one chat exchange at a time: optimistic user-message
//! append, network call, authoritative reconciliation, error recovery.

use crate::lifecycle::LifecycleController;
use foreman_core::backend::WorkflowBackend;
use foreman_core::session::{ChatMessage, SessionStore};
use foreman_core::work_order::project_work_order;
use std::sync::Arc;

/// Result of a `send_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The assistant answered and the transcript was reconciled.
    Completed,
    /// The backend call failed; the transcript carries an `Error: ...`
    /// entry and the user message was kept for retry.
    Failed(String),
    /// Message was blank after trimming; nothing happened.
    RejectedEmpty,
    /// Another turn is in flight; the call was rejected, not queued.
    RejectedBusy,
    /// The session was reset or restarted while the turn was in flight;
    /// the response was discarded.
    Discarded,
}

/// Orchestrates single chat turns against the backend.
pub struct TurnController {
    store: Arc<SessionStore>,
    backend: Arc<dyn WorkflowBackend>,
    lifecycle: Arc<LifecycleController>,
}

impl TurnController {
    /// Creates a controller sharing the lifecycle controller's store.
    pub fn new(
        store: Arc<SessionStore>,
        backend: Arc<dyn WorkflowBackend>,
        lifecycle: Arc<LifecycleController>,
    ) -> Self {
        Self {
            store,
            backend,
            lifecycle,
        }
    }

    /// Sends one user message and reconciles the response.
    ///
    /// The user message is appended (untrimmed) before the network call
    /// begins and is never rolled back, so a failed turn stays visible for
    /// retry. Turns are strictly serialized by the store's busy flag: a
    /// second call while one is in flight is rejected outright.
    pub async fn send_message(&self, text: &str) -> TurnOutcome {
        if text.trim().is_empty() {
            return TurnOutcome::RejectedEmpty;
        }

        let Some(epoch) = self.store.begin_turn(ChatMessage::user(text)) else {
            tracing::debug!(target: "foreman::turn", "Turn rejected: another turn is in flight");
            return TurnOutcome::RejectedBusy;
        };

        match self.backend.chat(text).await {
            Ok(payload) => {
                let work_order = payload.work_order_status.as_ref().map(project_work_order);
                let applied = self.store.apply_if_current(epoch, |session| {
                    session
                        .transcript
                        .push(ChatMessage::assistant(payload.response));
                    if let Some(work_order) = work_order {
                        session.work_order = Some(work_order);
                    }
                    if !payload.actions_executed.is_empty() {
                        session.transcript.push(ChatMessage::system(format!(
                            "Actions executed: {}",
                            payload.actions_executed.join(", ")
                        )));
                    }
                    session.busy = false;
                });

                if !applied {
                    tracing::debug!(
                        target: "foreman::turn",
                        "Discarded chat response issued against a previous session"
                    );
                    return TurnOutcome::Discarded;
                }

                // The assistant's side effects (work-order completion, KB
                // writes) are only authoritative through the status channel.
                if let Err(e) = self.lifecycle.refresh_status().await {
                    tracing::debug!(
                        target: "foreman::turn",
                        "Post-turn status refresh failed: {}",
                        e
                    );
                }

                TurnOutcome::Completed
            }
            Err(e) => {
                let reason = e.to_string();
                let message = ChatMessage::system(format!("Error: {}", reason));
                let applied = self.store.apply_if_current(epoch, |session| {
                    session.transcript.push(message);
                    session.busy = false;
                });

                if !applied {
                    tracing::debug!(
                        target: "foreman::turn",
                        "Discarded chat failure issued against a previous session"
                    );
                    return TurnOutcome::Discarded;
                }

                TurnOutcome::Failed(reason)
            }
        }
    }
}
