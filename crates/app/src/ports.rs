//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod configuration;
pub mod event_bus;
pub mod gesture;
pub mod notifier;
pub mod observer;

pub use configuration::ConfigurationSource;
pub use event_bus::EventPublisher;
pub use gesture::GestureSink;
pub use notifier::ActionNotifier;
pub use observer::LightObserver;
