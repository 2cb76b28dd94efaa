//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{SolverOptions, SolverService};
use crate::config::{global_config_path, Settings};
use crate::infrastructure::traits::{FileSystem, RealFileSystem, RealStdin, StdinReader};
use crate::infrastructure::{InfraError, InfraResult};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    pub solver: SolverService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(RealStdin))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        stdin: Arc<dyn StdinReader>,
    ) -> Self {
        let settings = Arc::new(settings);
        let solver = SolverService::new(Arc::clone(&fs), stdin);

        Self {
            settings,
            fs,
            solver,
        }
    }

    /// Solver options derived from the loaded settings.
    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions::from(self.settings.as_ref())
    }

    /// Write the config template to `path`, or the global config location.
    pub fn init_config(&self, path: Option<&Path>, force: bool) -> InfraResult<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => global_config_path().ok_or_else(|| {
                InfraError::io(
                    "determine config directory",
                    std::io::Error::new(std::io::ErrorKind::NotFound, "no home directory"),
                )
            })?,
        };
        if self.fs.exists(&path) && !force {
            return Err(InfraError::AlreadyExists(path));
        }
        debug!("init_config: writing {}", path.display());
        self.fs
            .ensure_parent(&path)
            .map_err(|e| InfraError::io(format!("create directory for {}", path.display()), e))?;
        self.fs
            .write(&path, &Settings::template())
            .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
        Ok(path)
    }
}
