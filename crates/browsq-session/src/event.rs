//! Session events
//!
//! Engines report through a [`SessionNotifier`]; every event carries the
//! originating [`SessionId`], so consumers can tell background tabs apart
//! from the active one with a plain equality check.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identity of one page session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEventKind {
    /// The engine's location changed (navigation, redirect, history step)
    UrlChanged(String),
    /// A navigation attempt finished; the flag is informational only
    LoadFinished(bool),
    /// The session's tab became the active tab
    Activated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub session: SessionId,
    pub kind: SessionEventKind,
}

impl SessionEvent {
    pub fn new(session: SessionId, kind: SessionEventKind) -> Self {
        Self { session, kind }
    }
}

/// FIFO of session events shared by every session in a window.
///
/// Engines may push from any thread; the window drains on the UI thread.
pub struct EventQueue {
    events: Arc<Mutex<VecDeque<SessionEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    pub fn push(&self, event: SessionEvent) {
        self.events.lock().push_back(event);
    }

    pub fn pop(&self) -> Option<SessionEvent> {
        self.events.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop everything queued for `session` (used when its tab is closed)
    pub fn discard_session(&self, session: SessionId) {
        self.events.lock().retain(|e| e.session != session);
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventQueue {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
        }
    }
}

/// Per-session subscription handed to an engine at spawn time
#[derive(Clone)]
pub struct SessionNotifier {
    session: SessionId,
    queue: EventQueue,
}

impl SessionNotifier {
    pub fn new(session: SessionId, queue: EventQueue) -> Self {
        Self { session, queue }
    }

    pub fn session_id(&self) -> SessionId {
        self.session
    }

    pub fn url_changed(&self, url: impl Into<String>) {
        self.queue.push(SessionEvent::new(
            self.session,
            SessionEventKind::UrlChanged(url.into()),
        ));
    }

    pub fn load_finished(&self, success: bool) {
        self.queue.push(SessionEvent::new(
            self.session,
            SessionEventKind::LoadFinished(success),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notifier_stamps_session() {
        let queue = EventQueue::new();
        let id = SessionId::new();
        let notifier = SessionNotifier::new(id, queue.clone());

        notifier.url_changed("https://example.com/");
        notifier.load_finished(true);

        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.pop(),
            Some(SessionEvent::new(
                id,
                SessionEventKind::UrlChanged("https://example.com/".to_string())
            ))
        );
        assert_eq!(
            queue.pop(),
            Some(SessionEvent::new(id, SessionEventKind::LoadFinished(true)))
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_discard_session() {
        let queue = EventQueue::new();
        let a = SessionNotifier::new(SessionId::new(), queue.clone());
        let b = SessionNotifier::new(SessionId::new(), queue.clone());

        a.url_changed("https://a.example/");
        b.url_changed("https://b.example/");
        a.load_finished(false);

        queue.discard_session(a.session_id());
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop().map(|e| e.session), Some(b.session_id()));
    }

    #[test]
    fn test_session_ids_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
