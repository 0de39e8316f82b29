//! Service container for dependency injection
//!
//! Wires settings and the filesystem into services.

use std::sync::Arc;

use crate::application::services::HierarchyService;
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding application settings and I/O boundaries.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
        }
    }

    /// Tree builder configured from the container's settings.
    pub fn hierarchy_service(&self) -> ApplicationResult<HierarchyService> {
        HierarchyService::from_settings(Arc::clone(&self.fs), &self.settings)
    }
}
