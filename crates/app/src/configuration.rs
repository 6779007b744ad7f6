//! Shared configuration: the swappable snapshot read by the dispatcher.

use std::sync::{Arc, PoisonError, RwLock};

use scenepad_domain::catalog::Catalog;
use scenepad_domain::configuration::Configuration;
use scenepad_domain::error::ScenepadError;

use crate::ports::ConfigurationSource;

/// Holds the current [`Configuration`] and swaps it atomically.
///
/// Readers get an `Arc` snapshot, so a replacement never affects a gesture
/// that is already being resolved.
#[derive(Debug, Default)]
pub struct SharedConfiguration {
    current: RwLock<Arc<Configuration>>,
}

impl SharedConfiguration {
    #[must_use]
    pub fn new(configuration: Configuration) -> Self {
        Self {
            current: RwLock::new(Arc::new(configuration)),
        }
    }

    /// Swap in `configuration`, returning the previous snapshot.
    pub fn replace(&self, configuration: Configuration) -> Arc<Configuration> {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, Arc::new(configuration))
    }

    /// Validate `configuration` against `catalog`, then swap it in.
    ///
    /// # Errors
    ///
    /// Returns [`ScenepadError::Validation`] when a binding references an
    /// unknown button or an action key that does not resolve; the current
    /// configuration is left untouched in that case.
    pub fn try_replace(
        &self,
        catalog: &Catalog,
        configuration: Configuration,
    ) -> Result<Arc<Configuration>, ScenepadError> {
        catalog.validate_configuration(&configuration)?;
        let previous = self.replace(configuration);
        tracing::info!("configuration replaced");
        Ok(previous)
    }
}

impl ConfigurationSource for SharedConfiguration {
    fn snapshot(&self) -> Arc<Configuration> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }
}
