//! Headless engine
//!
//! Runs the shell without a web view. Pages are looked up in a directory
//! shared by every engine of a factory; nothing is fetched or rendered.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::engine::{Engine, EngineFactory};
use crate::event::SessionNotifier;

const MAX_REDIRECTS: usize = 20;

#[derive(Debug, Default)]
struct PageDirectory {
    titles: HashMap<String, String>,
    redirects: HashMap<String, String>,
}

impl PageDirectory {
    /// Follow redirects from `url`, returning every location visited
    fn resolve(&self, url: &str) -> Vec<String> {
        let mut hops = vec![url.to_string()];
        while hops.len() <= MAX_REDIRECTS {
            let Some(next) = hops.last().and_then(|u| self.redirects.get(u)) else {
                break;
            };
            hops.push(next.clone());
        }
        hops
    }
}

pub struct HeadlessEngineFactory {
    pages: Arc<RwLock<PageDirectory>>,
}

impl HeadlessEngineFactory {
    pub fn new() -> Self {
        Self {
            pages: Arc::new(RwLock::new(PageDirectory::default())),
        }
    }

    pub fn with_page(self, url: impl Into<String>, title: impl Into<String>) -> Self {
        self.add_page(url, title);
        self
    }

    pub fn with_redirect(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.add_redirect(from, to);
        self
    }

    pub fn add_page(&self, url: impl Into<String>, title: impl Into<String>) {
        self.pages.write().titles.insert(url.into(), title.into());
    }

    pub fn add_redirect(&self, from: impl Into<String>, to: impl Into<String>) {
        self.pages.write().redirects.insert(from.into(), to.into());
    }
}

impl Default for HeadlessEngineFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for HeadlessEngineFactory {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
        }
    }
}

impl EngineFactory for HeadlessEngineFactory {
    fn spawn(&self, notifier: SessionNotifier) -> Box<dyn Engine> {
        Box::new(HeadlessEngine {
            pages: Arc::clone(&self.pages),
            notifier,
            history: Vec::new(),
            index: 0,
        })
    }
}

/// Engine with a back/forward list and no content
pub struct HeadlessEngine {
    pages: Arc<RwLock<PageDirectory>>,
    notifier: SessionNotifier,
    history: Vec<String>,
    /// Current position in `history`; meaningless while history is empty
    index: usize,
}

impl HeadlessEngine {
    fn is_known(&self, url: &str) -> bool {
        self.pages.read().titles.contains_key(url)
    }

    fn finish_load(&self) {
        let url = self.current_url();
        let success = self.is_known(&url);
        if !success {
            tracing::debug!(url = %url, "Headless engine has no page for URL");
        }
        self.notifier.load_finished(success);
    }
}

impl Engine for HeadlessEngine {
    fn load(&mut self, url: &str) {
        let hops = self.pages.read().resolve(url);
        for hop in &hops {
            self.notifier.url_changed(hop.as_str());
        }

        let Some(target) = hops.last() else {
            return;
        };

        if !self.history.is_empty() {
            self.history.truncate(self.index + 1);
        }
        self.history.push(target.clone());
        self.index = self.history.len() - 1;

        self.finish_load();
    }

    fn current_url(&self) -> String {
        self.history.get(self.index).cloned().unwrap_or_default()
    }

    fn title(&self) -> String {
        let url = self.current_url();
        self.pages
            .read()
            .titles
            .get(&url)
            .cloned()
            .unwrap_or(url)
    }

    fn go_back(&mut self) {
        if self.history.is_empty() || self.index == 0 {
            return;
        }
        self.index -= 1;
        self.notifier.url_changed(self.current_url());
        self.finish_load();
    }

    fn go_forward(&mut self) {
        if self.index + 1 >= self.history.len() {
            return;
        }
        self.index += 1;
        self.notifier.url_changed(self.current_url());
        self.finish_load();
    }

    fn reload(&mut self) {
        if self.history.is_empty() {
            return;
        }
        self.finish_load();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventQueue, SessionEventKind, SessionId};

    fn spawn(factory: &HeadlessEngineFactory) -> (Box<dyn Engine>, EventQueue) {
        let queue = EventQueue::new();
        let engine = factory.spawn(SessionNotifier::new(SessionId::new(), queue.clone()));
        (engine, queue)
    }

    fn drain(queue: &EventQueue) -> Vec<SessionEventKind> {
        std::iter::from_fn(|| queue.pop()).map(|e| e.kind).collect()
    }

    #[test]
    fn test_back_forward() {
        let factory = HeadlessEngineFactory::new()
            .with_page("https://a.example/", "A")
            .with_page("https://b.example/", "B");
        let (mut engine, queue) = spawn(&factory);

        // Empty history: no-ops
        engine.go_back();
        engine.go_forward();
        engine.reload();
        assert!(queue.is_empty());

        engine.load("https://a.example/");
        engine.load("https://b.example/");
        drain(&queue);

        engine.go_back();
        assert_eq!(engine.current_url(), "https://a.example/");
        assert_eq!(engine.title(), "A");
        assert_eq!(
            drain(&queue),
            vec![
                SessionEventKind::UrlChanged("https://a.example/".to_string()),
                SessionEventKind::LoadFinished(true),
            ]
        );

        engine.go_back();
        assert!(queue.is_empty());

        engine.go_forward();
        assert_eq!(engine.current_url(), "https://b.example/");

        engine.go_forward();
        assert_eq!(engine.current_url(), "https://b.example/");
    }

    #[test]
    fn test_load_truncates_forward_history() {
        let factory = HeadlessEngineFactory::new();
        let (mut engine, _queue) = spawn(&factory);

        engine.load("https://a.example/");
        engine.load("https://b.example/");
        engine.go_back();
        engine.load("https://c.example/");
        engine.go_forward();
        assert_eq!(engine.current_url(), "https://c.example/");

        engine.go_back();
        assert_eq!(engine.current_url(), "https://a.example/");
    }

    #[test]
    fn test_redirect_reports_each_hop() {
        let factory = HeadlessEngineFactory::new()
            .with_redirect("http://example.com/", "https://example.com/")
            .with_page("https://example.com/", "Example");
        let (mut engine, queue) = spawn(&factory);

        engine.load("http://example.com/");
        assert_eq!(engine.current_url(), "https://example.com/");
        assert_eq!(
            drain(&queue),
            vec![
                SessionEventKind::UrlChanged("http://example.com/".to_string()),
                SessionEventKind::UrlChanged("https://example.com/".to_string()),
                SessionEventKind::LoadFinished(true),
            ]
        );
    }

    #[test]
    fn test_redirect_loop_is_bounded() {
        let factory = HeadlessEngineFactory::new()
            .with_redirect("https://a.example/", "https://b.example/")
            .with_redirect("https://b.example/", "https://a.example/");
        let (mut engine, queue) = spawn(&factory);

        engine.load("https://a.example/");
        let events = drain(&queue);
        assert_eq!(events.len(), MAX_REDIRECTS + 2);
        assert_eq!(events.last(), Some(&SessionEventKind::LoadFinished(false)));
    }

    #[test]
    fn test_unknown_page_fails_with_url_title() {
        let factory = HeadlessEngineFactory::new();
        let (mut engine, queue) = spawn(&factory);

        engine.load("https://nowhere.example/");
        assert_eq!(engine.title(), "https://nowhere.example/");
        assert_eq!(
            drain(&queue).last(),
            Some(&SessionEventKind::LoadFinished(false))
        );

        engine.reload();
        assert_eq!(drain(&queue), vec![SessionEventKind::LoadFinished(false)]);
    }
}
