//! # scenepad-app
//!
//! Application layer: the runtime half of the core plus **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** implemented by adapters:
//!   - `ActionNotifier`: fire-and-forget remote notification of action keys
//!   - `LightObserver`: synchronous render hook after every light mutation
//!   - `EventPublisher`: publish domain events
//!   - `ConfigurationSource`: read-only configuration snapshots
//!   - `GestureSink`: consumer of classified gestures
//! - Own the mutable state: `LightStateStore`, `SharedConfiguration`
//! - Run things over time: `SceneEngine`, `PressService`
//! - Route gestures: `ActionDispatcher`
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `scenepad-domain` only (plus `tokio` for timers and channels).
//! Never imports adapter crates.

pub mod configuration;
pub mod dispatcher;
pub mod event_bus;
pub mod light_store;
pub mod ports;
pub mod press_service;
pub mod scene_engine;
