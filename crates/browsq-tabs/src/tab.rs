//! Tab data structure

use browsq_session::{PageSession, SessionId};

#[derive(Debug)]
pub struct Tab {
    /// The page shown in this tab
    pub session: PageSession,
    /// Text shown in the tab strip
    pub label: String,
}

impl Tab {
    pub fn new(session: PageSession, label: impl Into<String>) -> Self {
        Self {
            session,
            label: label.into(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session.id()
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}
