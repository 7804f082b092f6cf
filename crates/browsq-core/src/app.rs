//! Application context
//!
//! Built once at process start and handed to every window. Holds what the
//! windows share: configuration and the engine factory.

use std::sync::Arc;

use browsq_session::EngineFactory;

use crate::config::Config;
use crate::Result;

pub struct Application {
    config: Config,
    engines: Arc<dyn EngineFactory>,
}

impl Application {
    pub fn new(config: Config, engines: Arc<dyn EngineFactory>) -> Result<Self> {
        config.validate()?;

        tracing::info!(app = %config.app_name, "Application initialized");

        Ok(Self { config, engines })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine_factory(&self) -> Arc<dyn EngineFactory> {
        Arc::clone(&self.engines)
    }
}

impl Clone for Application {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            engines: Arc::clone(&self.engines),
        }
    }
}
