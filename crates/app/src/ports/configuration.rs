//! Configuration provider port.

use std::sync::Arc;

use scenepad_domain::configuration::Configuration;

/// Hands out read-only configuration snapshots.
///
/// A snapshot stays valid for as long as the caller holds it, even if the
/// provider swaps in a new configuration meanwhile.
pub trait ConfigurationSource {
    fn snapshot(&self) -> Arc<Configuration>;
}

impl<T: ConfigurationSource + ?Sized> ConfigurationSource for Arc<T> {
    fn snapshot(&self) -> Arc<Configuration> {
        (**self).snapshot()
    }
}
