//! Embedded engine capability

use crate::event::SessionNotifier;

/// One engine instance (one tab's web view).
///
/// Commands are fire-and-forget. Completion is reported through the
/// [`SessionNotifier`] the engine was spawned with.
pub trait Engine {
    fn load(&mut self, url: &str);
    fn current_url(&self) -> String;
    fn title(&self) -> String;
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn reload(&mut self);
}

/// Creates engine instances wired to a session's notifier
pub trait EngineFactory {
    fn spawn(&self, notifier: SessionNotifier) -> Box<dyn Engine>;
}
