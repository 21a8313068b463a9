//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{RenderOptions, RenderService};
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub render_service: RenderService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let render_service = RenderService::new(fs);

        Self {
            settings,
            render_service,
        }
    }

    /// Render options derived from settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            tree_limit: self.settings.tree_limit,
            strict: self.settings.strict,
        }
    }
}
