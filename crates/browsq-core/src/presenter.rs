//! Presentation interface
//!
//! Everything the core shows on screen goes through [`Presenter`]. A toolkit
//! binding implements it with real widgets; [`RecordingPresenter`] just keeps
//! the last value of each.

use browsq_storage::Bookmark;

pub trait Presenter {
    fn set_address_text(&mut self, text: &str);
    fn set_padlock_visible(&mut self, visible: bool);
    fn set_window_title(&mut self, title: &str);

    // Tab strip
    fn insert_tab(&mut self, index: usize, label: &str);
    fn remove_tab(&mut self, index: usize);
    fn set_tab_label(&mut self, index: usize, label: &str);
    fn set_current_tab(&mut self, index: usize);

    /// Rebuild the bookmark bar: one button per bookmark, in order
    fn set_bookmarks(&mut self, bookmarks: &[Bookmark]);
}

/// Presenter without a screen. Used for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    pub address_text: String,
    /// How many times the address bar was written
    pub address_updates: usize,
    pub padlock_visible: bool,
    pub window_title: String,
    pub tab_labels: Vec<String>,
    pub current_tab: Option<usize>,
    pub bookmarks: Vec<Bookmark>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for RecordingPresenter {
    fn set_address_text(&mut self, text: &str) {
        self.address_text = text.to_string();
        self.address_updates += 1;
    }

    fn set_padlock_visible(&mut self, visible: bool) {
        self.padlock_visible = visible;
    }

    fn set_window_title(&mut self, title: &str) {
        self.window_title = title.to_string();
    }

    fn insert_tab(&mut self, index: usize, label: &str) {
        let index = index.min(self.tab_labels.len());
        self.tab_labels.insert(index, label.to_string());
    }

    fn remove_tab(&mut self, index: usize) {
        if index < self.tab_labels.len() {
            self.tab_labels.remove(index);
        }
    }

    fn set_tab_label(&mut self, index: usize, label: &str) {
        if let Some(slot) = self.tab_labels.get_mut(index) {
            *slot = label.to_string();
        }
    }

    fn set_current_tab(&mut self, index: usize) {
        self.current_tab = Some(index);
    }

    fn set_bookmarks(&mut self, bookmarks: &[Bookmark]) {
        self.bookmarks = bookmarks.to_vec();
    }
}
