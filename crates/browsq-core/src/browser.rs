//! Browser window
//!
//! One window: its tabs, its event queue, its controller and the bookmark
//! store backing its bookmark bar. User actions from the toolbar, tab strip
//! and bookmark bar enter through the methods here; engine events are drained
//! with [`Browser::process_events`].

use browsq_session::EventQueue;
use browsq_storage::BookmarkStore;
use browsq_tabs::TabCollection;

use crate::app::Application;
use crate::config::Config;
use crate::controller::NavigationController;
use crate::presenter::Presenter;
use crate::Result;

pub struct Browser<P: Presenter> {
    config: Config,
    tabs: TabCollection,
    controller: NavigationController<P>,
    bookmarks: BookmarkStore,
    events: EventQueue,
}

impl<P: Presenter> Browser<P> {
    /// Open a window with a single tab on the home page.
    ///
    /// Fails if the bookmark file exists but cannot be read or parsed.
    pub fn new(app: &Application, mut presenter: P) -> Result<Self> {
        let config = app.config().clone();

        let bookmarks = BookmarkStore::open(&config.bookmarks_path)?;
        presenter.set_bookmarks(bookmarks.bookmarks());

        let events = EventQueue::new();
        let tabs = TabCollection::new(app.engine_factory(), events.clone());
        let controller = NavigationController::new(app, presenter)?;

        let mut browser = Self {
            config,
            tabs,
            controller,
            bookmarks,
            events,
        };

        let home = browser.config.home_url.clone();
        let label = browser.config.initial_tab_label.clone();
        browser.add_tab(&home, &label);

        tracing::info!(
            bookmarks = browser.bookmarks.len(),
            path = %browser.bookmarks.path().display(),
            "Browser window opened"
        );

        Ok(browser)
    }

    // === Tab strip ===

    /// Open a tab on the configured new-tab page
    pub fn new_tab(&mut self) -> usize {
        let url = self.config.new_tab_url.clone();
        let label = self.config.new_tab_label.clone();
        self.add_tab(&url, &label)
    }

    pub fn add_tab(&mut self, url: &str, label: &str) -> usize {
        let index = self.tabs.add(url, label);
        self.controller.presenter_mut().insert_tab(index, label);
        index
    }

    /// Double click on the tab strip. Only a click on empty space (no tab
    /// under the pointer) opens a tab.
    pub fn tab_bar_double_clicked(&mut self, tab_under_pointer: Option<usize>) -> Option<usize> {
        match tab_under_pointer {
            Some(_) => None,
            None => Some(self.new_tab()),
        }
    }

    /// Close the tab at `index`. Returns `false` when it was the last tab.
    pub fn close_tab(&mut self, index: usize) -> Result<bool> {
        match self.tabs.remove(index)? {
            Some(_) => {
                let active = self.tabs.active_index();
                let presenter = self.controller.presenter_mut();
                presenter.remove_tab(index);
                // The active index shifts without an activation when a tab to its left closes
                presenter.set_current_tab(active);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn select_tab(&mut self, index: usize) -> Result<()> {
        self.tabs.set_active(index)?;
        Ok(())
    }

    // === Toolbar ===

    /// Address bar submit
    pub fn submit_address(&mut self, text: &str) -> Result<()> {
        self.controller.navigate_to_input(&mut self.tabs, text)
    }

    pub fn back(&mut self) -> Result<()> {
        self.controller.back(&mut self.tabs)
    }

    pub fn forward(&mut self) -> Result<()> {
        self.controller.forward(&mut self.tabs)
    }

    pub fn reload(&mut self) -> Result<()> {
        self.controller.reload(&mut self.tabs)
    }

    pub fn home(&mut self) -> Result<()> {
        self.controller.go_home(&mut self.tabs)
    }

    // === Bookmarks ===

    pub fn add_bookmark(&mut self) -> Result<()> {
        self.controller.add_bookmark(&self.tabs, &mut self.bookmarks)
    }

    /// Bookmark bar click: load the stored URL as is
    pub fn open_bookmark(&mut self, url: &str) -> Result<()> {
        self.controller.open_url(&mut self.tabs, url)
    }

    // === Events ===

    /// Deliver queued engine events in order. Returns how many were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.events.pop() {
            self.controller.dispatch(&mut self.tabs, event);
            handled += 1;
        }
        handled
    }

    // === Accessors ===

    pub fn tabs(&self) -> &TabCollection {
        &self.tabs
    }

    pub fn controller(&self) -> &NavigationController<P> {
        &self.controller
    }

    pub fn presenter(&self) -> &P {
        self.controller.presenter()
    }

    pub fn bookmarks(&self) -> &BookmarkStore {
        &self.bookmarks
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
