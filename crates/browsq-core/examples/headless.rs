//! Example: drive a BrowsQ window without a toolkit
//!
//! Reads `browsq.json` from the working directory if present, opens a window
//! on the headless engine and replays a few user actions.

use std::sync::Arc;

use browsq_core::{Application, Browser, Config, HeadlessEngineFactory, RecordingPresenter};

fn main() -> browsq_core::Result<()> {
    browsq_core::init_logging();

    let config = Config::load_or_default("browsq.json")?;

    let engines = HeadlessEngineFactory::new()
        .with_page(config.home_url.clone(), "Google")
        .with_page(config.new_tab_url.clone(), "Google")
        .with_page("https://www.rust-lang.org", "Rust Programming Language")
        .with_redirect("http://www.rust-lang.org", "https://www.rust-lang.org");

    let app = Application::new(config, Arc::new(engines))?;
    let mut browser = Browser::new(&app, RecordingPresenter::new())?;
    browser.process_events();

    browser.submit_address("http://www.rust-lang.org")?;
    browser.process_events();

    browser.tab_bar_double_clicked(None);
    browser.submit_address("how to bake bread")?;
    browser.process_events();

    browser.close_tab(0)?;
    browser.process_events();

    let presenter = browser.presenter();
    tracing::info!(
        address = %presenter.address_text,
        secure = presenter.padlock_visible,
        title = %presenter.window_title,
        tabs = ?presenter.tab_labels,
        "Window state"
    );

    Ok(())
}
