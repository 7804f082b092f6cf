//! Tab Collection
//!
//! Owns every tab of a window and tracks which one is active. Activation is
//! announced through the shared event queue as `SessionEventKind::Activated`,
//! in order with the engines' own notifications.

use std::sync::Arc;

use browsq_session::{
    EngineFactory, EventQueue, PageSession, SessionEvent, SessionEventKind, SessionId,
};

use crate::error::TabError;
use crate::tab::Tab;
use crate::Result;

pub struct TabCollection {
    tabs: Vec<Tab>,
    /// Index of the active tab, valid whenever `tabs` is non-empty
    active_index: usize,
    factory: Arc<dyn EngineFactory>,
    events: EventQueue,
}

impl TabCollection {
    pub fn new(factory: Arc<dyn EngineFactory>, events: EventQueue) -> Self {
        Self {
            tabs: Vec::new(),
            active_index: 0,
            factory,
            events,
        }
    }

    /// Open a tab on `initial_url`, append it and make it active
    pub fn add(&mut self, initial_url: &str, label: impl Into<String>) -> usize {
        let mut session = PageSession::new(self.factory.as_ref(), &self.events);
        session.navigate(initial_url);

        let tab = Tab::new(session, label);
        tracing::info!(session = %tab.session_id(), url = %initial_url, "Created new tab");

        self.tabs.push(tab);
        self.active_index = self.tabs.len() - 1;
        self.fire_activated();

        self.active_index
    }

    /// Close the tab at `index`.
    ///
    /// Returns `Ok(None)` without touching anything when fewer than two tabs
    /// are open, whatever the index.
    pub fn remove(&mut self, index: usize) -> Result<Option<Tab>> {
        if self.tabs.len() < 2 {
            tracing::debug!(index, "Refusing to close the last tab");
            return Ok(None);
        }
        self.check_index(index)?;

        let removed = self.tabs.remove(index);
        self.events.discard_session(removed.session_id());

        if index < self.active_index {
            self.active_index -= 1;
        } else if index == self.active_index {
            // Select the tab that slid into place, or the new last tab
            self.active_index = index.min(self.tabs.len() - 1);
            self.fire_activated();
        }

        tracing::info!(session = %removed.session_id(), index, "Closed tab");

        Ok(Some(removed))
    }

    pub fn set_active(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.active_index = index;
        self.fire_activated();
        Ok(())
    }

    pub fn active_tab(&self) -> Result<&Tab> {
        self.tabs
            .get(self.active_index)
            .ok_or(TabError::EmptyCollection)
    }

    pub fn active_tab_mut(&mut self) -> Result<&mut Tab> {
        self.tabs
            .get_mut(self.active_index)
            .ok_or(TabError::EmptyCollection)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_active(&self, session: SessionId) -> bool {
        self.tabs
            .get(self.active_index)
            .is_some_and(|tab| tab.session_id() == session)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn position_of(&self, session: SessionId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.session_id() == session)
    }

    pub fn find(&self, session: SessionId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.session_id() == session)
    }

    pub fn find_mut(&mut self, session: SessionId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|tab| tab.session_id() == session)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.tabs.len() {
            return Err(TabError::OutOfRange {
                index,
                len: self.tabs.len(),
            });
        }
        Ok(())
    }

    fn fire_activated(&self) {
        if let Some(tab) = self.tabs.get(self.active_index) {
            self.events.push(SessionEvent::new(
                tab.session_id(),
                SessionEventKind::Activated,
            ));
        }
    }
}
