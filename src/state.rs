//! Shared application state for all routes. The application is swapped atomically on reload.

use crate::config::FullConfig;
use crate::error::ConfigError;
use crate::package::Application;
use arc_swap::ArcSwap;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Readers see either the previous or the reloaded application, never a partial one.
    pub app: Arc<ArcSwap<Application>>,
}

impl AppState {
    pub fn new(app: Application) -> Self {
        AppState {
            app: Arc::new(ArcSwap::from_pointee(app)),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<Application> {
        self.app.load_full()
    }

    /// Build a new application from `config` and publish it. On error the current one stays live.
    pub fn reload(&self, config: &FullConfig) -> Result<(), ConfigError> {
        match Application::from_config(config) {
            Ok(next) => {
                let packages = next.packages().count();
                self.app.store(Arc::new(next));
                tracing::info!(packages, "routes reloaded");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "reload failed, keeping current routes");
                Err(e)
            }
        }
    }
}
