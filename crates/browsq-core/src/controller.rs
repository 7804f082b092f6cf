//! Navigation controller
//!
//! Keeps the address bar, padlock and window title in step with the active
//! tab. Engine events can arrive from any tab in any interleaving; only
//! events whose session is the active tab's session reach the address bar
//! and the window title.

use browsq_navigation::InputResolver;
use browsq_session::{scheme_of, SessionEvent, SessionEventKind, SessionId};
use browsq_storage::BookmarkStore;
use browsq_tabs::TabCollection;

use crate::app::Application;
use crate::presenter::Presenter;
use crate::Result;

pub struct NavigationController<P: Presenter> {
    presenter: P,
    resolver: InputResolver,
    home_url: String,
    app_name: String,
    /// Last URL written to the address bar
    address_text: String,
    /// Padlock state
    secure: bool,
    window_title: String,
}

impl<P: Presenter> NavigationController<P> {
    pub fn new(app: &Application, presenter: P) -> Result<Self> {
        let config = app.config();
        let resolver = InputResolver::with_search_host(config.search_host.as_str())?;

        Ok(Self {
            presenter,
            resolver,
            home_url: config.home_url.clone(),
            app_name: config.app_name.clone(),
            address_text: String::new(),
            secure: false,
            window_title: String::new(),
        })
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn address_text(&self) -> &str {
        &self.address_text
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn window_title(&self) -> &str {
        &self.window_title
    }

    // === Commands ===

    /// Turn address bar text into the URL to load
    pub fn interpret_address_bar_input(&self, raw_text: &str) -> String {
        self.resolver.resolve(raw_text).into_url()
    }

    pub fn navigate_to_input(&mut self, tabs: &mut TabCollection, raw_text: &str) -> Result<()> {
        let url = self.interpret_address_bar_input(raw_text);
        tabs.active_tab_mut()?.session.navigate(&url);
        Ok(())
    }

    /// Load `url` verbatim in the active tab
    pub fn open_url(&mut self, tabs: &mut TabCollection, url: &str) -> Result<()> {
        tabs.active_tab_mut()?.session.navigate(url);
        Ok(())
    }

    pub fn go_home(&mut self, tabs: &mut TabCollection) -> Result<()> {
        let home = self.home_url.clone();
        self.open_url(tabs, &home)
    }

    pub fn back(&mut self, tabs: &mut TabCollection) -> Result<()> {
        tabs.active_tab_mut()?.session.back();
        Ok(())
    }

    pub fn forward(&mut self, tabs: &mut TabCollection) -> Result<()> {
        tabs.active_tab_mut()?.session.forward();
        Ok(())
    }

    pub fn reload(&mut self, tabs: &mut TabCollection) -> Result<()> {
        tabs.active_tab_mut()?.session.reload();
        Ok(())
    }

    /// Bookmark the active page and rebuild the bookmark bar.
    ///
    /// The bar reflects the new entry even if writing the file failed; the
    /// write error is returned.
    pub fn add_bookmark(&mut self, tabs: &TabCollection, store: &mut BookmarkStore) -> Result<()> {
        let tab = tabs.active_tab()?;
        let url = tab.session.current_url();
        let title = tab.session.title();

        let saved = store.add(url.as_str(), title);
        self.presenter.set_bookmarks(store.bookmarks());

        if let Err(e) = &saved {
            tracing::warn!(url = %url, error = %e, "Failed to persist bookmarks");
        }

        Ok(saved?)
    }

    // === Events ===

    pub fn dispatch(&mut self, tabs: &mut TabCollection, event: SessionEvent) {
        tracing::debug!(session = %event.session, kind = ?event.kind, "Dispatch");

        match event.kind {
            SessionEventKind::UrlChanged(url) => self.on_url_changed(tabs, event.session, &url),
            SessionEventKind::LoadFinished(success) => {
                self.on_load_finished(tabs, event.session, success)
            }
            SessionEventKind::Activated => self.on_tab_activated(tabs, event.session),
        }
    }

    pub fn on_tab_activated(&mut self, tabs: &TabCollection, session: SessionId) {
        if !tabs.is_active(session) {
            tracing::debug!(session = %session, "Ignoring stale activation");
            return;
        }
        let Ok(tab) = tabs.active_tab() else {
            return;
        };

        let url = tab.session.current_url();
        let title = tab.session.title();

        self.presenter.set_current_tab(tabs.active_index());
        self.show_url(&url);
        self.show_title(&title);
    }

    pub fn on_url_changed(&mut self, tabs: &TabCollection, session: SessionId, url: &str) {
        if !tabs.is_active(session) {
            tracing::debug!(session = %session, url = %url, "Ignoring URL change of background tab");
            return;
        }
        self.show_url(url);
    }

    pub fn on_load_finished(&mut self, tabs: &mut TabCollection, session: SessionId, success: bool) {
        let Some(index) = tabs.position_of(session) else {
            tracing::debug!(session = %session, "Load finished for a closed tab");
            return;
        };
        let is_active = tabs.is_active(session);
        let Some(tab) = tabs.find_mut(session) else {
            return;
        };

        let title = tab.session.title();
        if !success {
            tracing::warn!(session = %session, url = %tab.session.current_url(), "Page failed to load");
        }

        tab.set_label(title.as_str());
        self.presenter.set_tab_label(index, &title);

        if is_active {
            self.show_title(&title);
        }
    }

    fn show_url(&mut self, url: &str) {
        self.address_text = url.to_string();
        self.secure = scheme_of(url) == "https";

        self.presenter.set_address_text(url);
        self.presenter.set_padlock_visible(self.secure);
    }

    fn show_title(&mut self, page_title: &str) {
        self.window_title = format!("{} - {}", page_title, self.app_name);
        self.presenter.set_window_title(&self.window_title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::presenter::RecordingPresenter;
    use browsq_session::{EventQueue, HeadlessEngineFactory};
    use proptest::prelude::*;
    use std::sync::Arc;

    struct Fixture {
        tabs: TabCollection,
        events: EventQueue,
        controller: NavigationController<RecordingPresenter>,
    }

    impl Fixture {
        fn new() -> Self {
            let factory = HeadlessEngineFactory::new()
                .with_page("https://a.example/", "Page A")
                .with_page("https://b.example/", "Page B")
                .with_page("http://plain.example/", "Plain");
            let app = Application::new(Config::default(), Arc::new(factory)).unwrap();
            let events = EventQueue::new();
            let tabs = TabCollection::new(app.engine_factory(), events.clone());
            let controller = NavigationController::new(&app, RecordingPresenter::new()).unwrap();
            Self {
                tabs,
                events,
                controller,
            }
        }

        fn add_tab(&mut self, url: &str) -> SessionId {
            let index = self.tabs.add(url, "New Tab");
            self.controller.presenter_mut().insert_tab(index, "New Tab");
            self.tabs.get(index).unwrap().session_id()
        }

        fn pump(&mut self) {
            while let Some(event) = self.events.pop() {
                self.controller.dispatch(&mut self.tabs, event);
            }
        }

        fn presenter(&self) -> &RecordingPresenter {
            self.controller.presenter()
        }
    }

    #[test]
    fn test_interpret_address_bar_input() {
        let fx = Fixture::new();
        let c = &fx.controller;

        assert_eq!(c.interpret_address_bar_input("openai.com"), "https://openai.com");
        assert_eq!(
            c.interpret_address_bar_input("how to bake bread"),
            "https://www.google.com/search?q=how%20to%20bake%20bread"
        );
        assert_eq!(c.interpret_address_bar_input("https://x.com/a"), "https://x.com/a");
        assert_eq!(c.interpret_address_bar_input("sub/page.html"), "https://sub/page.html");
    }

    #[test]
    fn test_activation_refreshes_everything() {
        let mut fx = Fixture::new();
        fx.add_tab("https://a.example/");
        fx.pump();

        assert_eq!(fx.controller.address_text(), "https://a.example/");
        assert!(fx.controller.is_secure());
        assert_eq!(fx.controller.window_title(), "Page A - BrowsQ");

        let p = fx.presenter();
        assert_eq!(p.address_text, "https://a.example/");
        assert!(p.padlock_visible);
        assert_eq!(p.window_title, "Page A - BrowsQ");
        assert_eq!(p.tab_labels, vec!["Page A"]);
        assert_eq!(p.current_tab, Some(0));
    }

    #[test]
    fn test_background_url_change_ignored() {
        let mut fx = Fixture::new();
        let a = fx.add_tab("https://a.example/");
        fx.add_tab("https://b.example/");
        fx.pump();
        assert_eq!(fx.presenter().address_text, "https://b.example/");
        let updates = fx.presenter().address_updates;

        // Background tab A navigates while B stays active
        fx.tabs.find_mut(a).unwrap().session.navigate("http://plain.example/");
        fx.pump();

        let p = fx.presenter();
        assert_eq!(p.address_text, "https://b.example/");
        assert_eq!(p.address_updates, updates);
        assert!(p.padlock_visible);
        assert_eq!(p.window_title, "Page B - BrowsQ");
        // The background tab's label still follows its page
        assert_eq!(p.tab_labels, vec!["Plain", "Page B"]);
    }

    #[test]
    fn test_url_change_of_other_tab_after_select() {
        let mut fx = Fixture::new();
        fx.add_tab("https://a.example/");
        let b = fx.add_tab("https://b.example/");
        fx.pump();

        fx.tabs.set_active(0).unwrap();
        fx.pump();
        assert_eq!(fx.presenter().address_text, "https://a.example/");
        assert_eq!(fx.presenter().current_tab, Some(0));
        let updates = fx.presenter().address_updates;

        fx.tabs.find_mut(b).unwrap().session.navigate("http://plain.example/");
        fx.pump();

        let p = fx.presenter();
        assert_eq!(p.address_text, "https://a.example/");
        assert_eq!(p.address_updates, updates);
        assert!(p.padlock_visible);
        assert_eq!(p.window_title, "Page A - BrowsQ");
    }

    #[test]
    fn test_stale_activation_ignored() {
        let mut fx = Fixture::new();
        let a = fx.add_tab("https://a.example/");
        let b = fx.add_tab("https://b.example/");
        fx.pump();

        // Activation of A delivered after B became active again
        fx.tabs.set_active(0).unwrap();
        fx.tabs.set_active(1).unwrap();
        fx.controller.on_tab_activated(&fx.tabs, a);
        assert_eq!(fx.presenter().address_text, "https://b.example/");

        fx.controller.on_tab_activated(&fx.tabs, b);
        assert_eq!(fx.presenter().current_tab, Some(1));
    }

    #[test]
    fn test_padlock_requires_exact_https() {
        let mut fx = Fixture::new();
        let id = fx.add_tab("https://a.example/");
        fx.pump();

        for (url, secure) in [
            ("https://a.example/", true),
            ("HTTPS://a.example/", false),
            ("http://a.example/", false),
            ("a.example", false),
            ("", false),
        ] {
            fx.controller.on_url_changed(&fx.tabs, id, url);
            assert_eq!(fx.presenter().padlock_visible, secure, "url {url:?}");
            assert_eq!(fx.presenter().address_text, url);
        }
    }

    #[test]
    fn test_load_finished_background_label_only() {
        let mut fx = Fixture::new();
        let a = fx.add_tab("https://a.example/");
        fx.add_tab("https://b.example/");
        fx.pump();

        fx.controller.on_load_finished(&mut fx.tabs, a, true);
        assert_eq!(fx.tabs.find(a).unwrap().label, "Page A");
        assert_eq!(fx.presenter().window_title, "Page B - BrowsQ");
    }

    #[test]
    fn test_failed_load_still_labels_tab() {
        let mut fx = Fixture::new();
        let id = fx.add_tab("https://missing.example/");
        fx.pump();

        assert_eq!(fx.tabs.find(id).unwrap().label, "https://missing.example/");
        assert_eq!(fx.presenter().window_title, "https://missing.example/ - BrowsQ");
    }

    #[test]
    fn test_events_for_closed_tab_ignored() {
        let mut fx = Fixture::new();
        fx.add_tab("https://a.example/");
        fx.pump();
        let before = fx.presenter().clone();

        let ghost = SessionId::new();
        fx.controller.on_url_changed(&fx.tabs, ghost, "https://ghost.example/");
        fx.controller.on_load_finished(&mut fx.tabs, ghost, true);
        fx.controller.on_tab_activated(&fx.tabs, ghost);

        let after = fx.presenter();
        assert_eq!(after.address_text, before.address_text);
        assert_eq!(after.window_title, before.window_title);
        assert_eq!(after.tab_labels, before.tab_labels);
    }

    #[test]
    fn test_navigation_commands() {
        let mut fx = Fixture::new();
        fx.add_tab("https://a.example/");
        fx.pump();

        fx.controller.navigate_to_input(&mut fx.tabs, "b.example/").unwrap();
        fx.pump();
        // Trailing slash leaves an empty last segment: searched, not loaded
        assert_eq!(
            fx.presenter().address_text,
            "https://www.google.com/search?q=b.example/"
        );

        fx.controller.open_url(&mut fx.tabs, "https://b.example/").unwrap();
        fx.pump();
        assert_eq!(fx.presenter().window_title, "Page B - BrowsQ");

        fx.controller.back(&mut fx.tabs).unwrap();
        fx.pump();
        assert_eq!(
            fx.presenter().address_text,
            "https://www.google.com/search?q=b.example/"
        );

        fx.controller.forward(&mut fx.tabs).unwrap();
        fx.pump();
        assert_eq!(fx.presenter().address_text, "https://b.example/");

        fx.controller.go_home(&mut fx.tabs).unwrap();
        fx.pump();
        assert_eq!(fx.presenter().address_text, "http://www.google.com");
        assert!(!fx.presenter().padlock_visible);
    }

    #[test]
    fn test_commands_without_tabs() {
        let mut fx = Fixture::new();
        assert!(fx.controller.go_home(&mut fx.tabs).is_err());
        assert!(fx.controller.reload(&mut fx.tabs).is_err());
    }

    #[test]
    fn test_add_bookmark_rebuilds_bar() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = BookmarkStore::open(dir.path().join("bookmarks.json")).unwrap();

        let mut fx = Fixture::new();
        fx.add_tab("https://a.example/");
        fx.pump();

        fx.controller.add_bookmark(&fx.tabs, &mut store).unwrap();
        assert_eq!(store.title_for("https://a.example/"), Some("Page A"));
        assert_eq!(fx.presenter().bookmarks.len(), 1);
        assert_eq!(fx.presenter().bookmarks[0].title, "Page A");
    }

    proptest! {
        #[test]
        fn prop_padlock_tracks_https_scheme(url in "[a-zA-Z]{0,6}:?/{0,2}[a-z.]{0,12}") {
            let mut fx = Fixture::new();
            let id = fx.add_tab("https://a.example/");
            fx.pump();

            fx.controller.on_url_changed(&fx.tabs, id, &url);
            prop_assert_eq!(fx.presenter().padlock_visible, url.starts_with("https:"));
            prop_assert_eq!(fx.controller.address_text(), url.as_str());
        }
    }
}
