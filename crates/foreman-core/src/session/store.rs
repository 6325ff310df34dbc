//! Observable session store.
//!
//! `SessionStore` is the single source of truth for the live session. It is
//! read by presentation code through snapshots and explicit observer
//! registration, and mutated only by the lifecycle and turn controllers.

use super::message::ChatMessage;
use super::model::{Project, Session};
use crate::kb::KbStats;
use crate::work_order::WorkOrder;
use std::sync::{Mutex, RwLock};

/// Callback invoked with the post-mutation session snapshot.
pub type Observer = Box<dyn Fn(&Session) + Send + Sync>;

struct Inner {
    session: Session,
    /// Bumped whenever the session identity changes (start, reset). A turn
    /// captures the epoch it was issued against and its completion is
    /// discarded on mismatch, so a stale in-flight response cannot
    /// repopulate a session the user has already abandoned.
    epoch: u64,
}

/// Holds the single process-wide session and notifies observers on change.
///
/// The store is an owned, injectable object rather than a module-level
/// singleton, so multiple stores can exist in isolation (one per test).
/// Mutators are plain assignment and never fail; the lock is never held
/// across an await point.
pub struct SessionStore {
    inner: RwLock<Inner>,
    observers: Mutex<Vec<Observer>>,
}

impl SessionStore {
    /// Creates an empty store: no project, empty transcript, not busy.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                session: Session::default(),
                epoch: 0,
            }),
            observers: Mutex::new(Vec::new()),
        }
    }

    /// Returns a read-only snapshot of the current session.
    pub fn snapshot(&self) -> Session {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).session.clone()
    }

    /// Returns the current session epoch.
    pub fn epoch(&self) -> u64 {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).epoch
    }

    /// Registers an observer invoked after every mutation with the
    /// post-mutation snapshot.
    pub fn subscribe(&self, observer: impl Fn(&Session) + Send + Sync + 'static) {
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Box::new(observer));
    }

    /// Replaces the project without touching the session identity.
    ///
    /// Used by status refresh, which mirrors backend state into an existing
    /// session.
    pub fn replace_project(&self, project: Option<Project>) {
        self.mutate(|inner| inner.session.project = project);
    }

    /// Installs a newly started project, bumping the session epoch so that
    /// responses still in flight against the previous session are discarded.
    ///
    /// The busy flag is cleared here: an orphaned turn's completion can no
    /// longer release it, so it must not carry over into the new session.
    pub fn install_project(&self, project: Project) {
        self.mutate(|inner| {
            inner.session.project = Some(project);
            inner.session.busy = false;
            inner.epoch += 1;
        });
    }

    /// Replaces the work-order snapshot wholesale.
    pub fn replace_work_order(&self, work_order: Option<WorkOrder>) {
        self.mutate(|inner| inner.session.work_order = work_order);
    }

    /// Appends messages to the transcript, preserving order.
    pub fn append_messages(&self, messages: Vec<ChatMessage>) {
        self.mutate(|inner| inner.session.transcript.extend(messages));
    }

    /// Replaces the transcript wholesale.
    pub fn replace_transcript(&self, messages: Vec<ChatMessage>) {
        self.mutate(|inner| inner.session.transcript = messages);
    }

    /// Replaces the knowledge-base counters.
    pub fn replace_kb_stats(&self, stats: Option<KbStats>) {
        self.mutate(|inner| inner.session.kb_stats = stats);
    }

    /// Sets the turn-in-flight flag.
    pub fn set_busy(&self, busy: bool) {
        self.mutate(|inner| inner.session.busy = busy);
    }

    /// Begins a chat turn: rejects when a turn is already in flight,
    /// otherwise sets `busy`, appends the user message, and returns the
    /// epoch the turn was issued against.
    ///
    /// Guard, flag, and optimistic append happen under one lock so two
    /// concurrent turns cannot both pass the guard.
    pub fn begin_turn(&self, user_message: ChatMessage) -> Option<u64> {
        let mut epoch = None;
        self.mutate(|inner| {
            if inner.session.busy {
                return;
            }
            inner.session.busy = true;
            inner.session.transcript.push(user_message);
            epoch = Some(inner.epoch);
        });
        epoch
    }

    /// Applies a mutation iff the session epoch still matches the one the
    /// caller captured before its network call.
    ///
    /// Returns `false` when the session was reset or restarted while the
    /// call was in flight; the mutation is dropped in that case. For turn
    /// completions that includes the `busy` release, which would otherwise
    /// belong to a newer session; for status mirrors it keeps a stale
    /// response from repopulating a cleared session.
    pub fn apply_if_current(&self, epoch: u64, f: impl FnOnce(&mut Session)) -> bool {
        let mut applied = false;
        self.mutate(|inner| {
            if inner.epoch == epoch {
                f(&mut inner.session);
                applied = true;
            }
        });
        applied
    }

    /// Clears the session back to empty and bumps the epoch.
    ///
    /// Used by reset: local state returns to empty regardless of what the
    /// backend said, and anything still in flight is orphaned.
    pub fn reset_session(&self) {
        self.mutate(|inner| {
            inner.session = Session::default();
            inner.epoch += 1;
        });
    }

    fn mutate(&self, f: impl FnOnce(&mut Inner)) {
        let snapshot = {
            let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
            f(&mut inner);
            inner.session.clone()
        };
        // Observers run outside the state lock so they may take snapshots.
        let observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        for observer in observers.iter() {
            observer(&snapshot);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Mode;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn project() -> Project {
        Project {
            title: "Big Brain".to_string(),
            protagonist: "Mickey Bardot".to_string(),
            mode: Mode::Architect,
        }
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SessionStore::new();
        let session = store.snapshot();
        assert!(!session.is_active());
        assert!(session.transcript.is_empty());
        assert!(session.work_order.is_none());
        assert!(session.kb_stats.is_none());
        assert!(!session.busy);
    }

    #[test]
    fn test_observers_see_post_mutation_snapshot() {
        let store = SessionStore::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();
        store.subscribe(move |session| {
            seen_clone.store(session.transcript.len(), Ordering::SeqCst);
        });

        store.append_messages(vec![ChatMessage::user("one"), ChatMessage::user("two")]);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_begin_turn_rejects_while_busy() {
        let store = SessionStore::new();
        let first = store.begin_turn(ChatMessage::user("first"));
        assert!(first.is_some());

        let second = store.begin_turn(ChatMessage::user("second"));
        assert!(second.is_none());
        // Rejected turn must not have appended anything.
        assert_eq!(store.snapshot().transcript.len(), 1);
    }

    #[test]
    fn test_apply_if_current_discarded_after_reset() {
        let store = SessionStore::new();
        let epoch = store.begin_turn(ChatMessage::user("hello")).unwrap();

        store.reset_session();

        let applied = store.apply_if_current(epoch, |session| {
            session.transcript.push(ChatMessage::assistant("stale"));
            session.busy = false;
        });
        assert!(!applied);
        assert!(store.snapshot().transcript.is_empty());
    }

    #[test]
    fn test_install_project_bumps_epoch() {
        let store = SessionStore::new();
        let before = store.epoch();
        store.install_project(project());
        assert_eq!(store.epoch(), before + 1);
        assert!(store.snapshot().is_active());
    }

    #[test]
    fn test_install_project_clears_stale_busy() {
        let store = SessionStore::new();
        let epoch = store.begin_turn(ChatMessage::user("hello")).unwrap();

        store.install_project(project());
        assert!(!store.snapshot().busy);

        // The orphaned turn cannot complete against the new session, and
        // the new session accepts turns immediately.
        assert!(!store.apply_if_current(epoch, |session| session.busy = false));
        assert!(store.begin_turn(ChatMessage::user("next")).is_some());
    }

    #[test]
    fn test_replace_project_keeps_epoch() {
        let store = SessionStore::new();
        store.install_project(project());
        let epoch = store.epoch();
        store.replace_project(Some(project()));
        assert_eq!(store.epoch(), epoch);
    }

    #[test]
    fn test_reset_clears_everything() {
        let store = SessionStore::new();
        store.install_project(project());
        store.append_messages(vec![ChatMessage::user("hello")]);
        store.set_busy(true);

        store.reset_session();

        let session = store.snapshot();
        assert!(!session.is_active());
        assert!(session.transcript.is_empty());
        assert!(session.work_order.is_none());
        assert!(session.kb_stats.is_none());
        assert!(!session.busy);
    }
}
