//! BrowsQ Page Sessions
//!
//! A page session wraps one embedded engine instance:
//! - navigation commands go down to the engine
//! - location / load notifications come back up as typed [`SessionEvent`]s
//!
//! Rendering, networking and scripting belong to the engine. This crate only
//! sees it through the [`Engine`] and [`EngineFactory`] traits.

mod engine;
mod event;
mod headless;
mod session;

pub use engine::{Engine, EngineFactory};
pub use event::{EventQueue, SessionEvent, SessionEventKind, SessionId, SessionNotifier};
pub use headless::{HeadlessEngine, HeadlessEngineFactory};
pub use session::{scheme_of, PageSession};
