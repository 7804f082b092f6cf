//! Page session
//!
//! URL, title and scheme are read through to the engine on every call;
//! the session never keeps its own copy.

use crate::engine::{Engine, EngineFactory};
use crate::event::{EventQueue, SessionId, SessionNotifier};

pub struct PageSession {
    id: SessionId,
    engine: Box<dyn Engine>,
}

impl PageSession {
    /// Spawn a fresh engine whose notifications land in `queue`
    pub fn new(factory: &dyn EngineFactory, queue: &EventQueue) -> Self {
        let id = SessionId::new();
        let engine = factory.spawn(SessionNotifier::new(id, queue.clone()));

        tracing::debug!(session = %id, "Spawned page session");

        Self { id, engine }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Request a load. Completion arrives as events, never as a return value.
    pub fn navigate(&mut self, url: &str) {
        tracing::debug!(session = %self.id, url = %url, "Navigate");
        self.engine.load(url);
    }

    pub fn back(&mut self) {
        self.engine.go_back();
    }

    pub fn forward(&mut self) {
        self.engine.go_forward();
    }

    pub fn reload(&mut self) {
        self.engine.reload();
    }

    pub fn current_url(&self) -> String {
        self.engine.current_url()
    }

    pub fn title(&self) -> String {
        self.engine.title()
    }

    pub fn scheme(&self) -> String {
        scheme_of(&self.current_url()).to_string()
    }
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("id", &self.id)
            .field("url", &self.current_url())
            .finish()
    }
}

/// Literal scheme of `url`, case preserved; empty when there is none.
///
/// A scheme is a letter followed by letters, digits, `+`, `-` or `.`,
/// terminated by the first `:`.
pub fn scheme_of(url: &str) -> &str {
    let Some((scheme, _)) = url.split_once(':') else {
        return "";
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return "",
    }

    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        scheme
    } else {
        ""
    }
}
