//! Light state store: the single source of truth for light state.
//!
//! Every mutation of an existing light is reported to the [`LightObserver`]
//! while the lock is still held, so notifications come out in mutation order
//! and the last one seen for a light always matches the store. Observers
//! must not call back into the store.

use std::sync::{Mutex, PoisonError};

use scenepad_domain::id::LightId;
use scenepad_domain::light::{Light, LightPatch};

use crate::ports::LightObserver;

/// In-memory store of lights, keyed by [`LightId`], in catalog order.
pub struct LightStateStore<O> {
    lights: Mutex<Vec<Light>>,
    observer: O,
}

impl<O: LightObserver> LightStateStore<O> {
    #[must_use]
    pub fn new(lights: Vec<Light>, observer: O) -> Self {
        Self {
            lights: Mutex::new(lights),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Current state of a single light.
    pub fn get(&self, id: &LightId) -> Option<Light> {
        self.lock().iter().find(|light| &light.id == id).cloned()
    }

    /// Snapshot of every light.
    pub fn all(&self) -> Vec<Light> {
        self.lock().clone()
    }

    /// Merge `patch` into the light `id`. Fields absent from the patch keep
    /// their current value.
    ///
    /// Returns the updated light, or `None` when the id is unknown; an
    /// unknown id leaves the store untouched and notifies nobody.
    pub fn merge(&self, id: &LightId, patch: &LightPatch) -> Option<Light> {
        let mut lights = self.lock();
        let light = lights.iter_mut().find(|light| &light.id == id)?;
        let changed = light.apply(patch);
        tracing::trace!(light_id = %id, changed, "light merged");
        self.observer.light_changed(light);
        Some(light.clone())
    }

    /// Switch every light on or off, leaving brightness and color alone.
    pub fn set_all(&self, is_on: bool) -> Vec<Light> {
        let mut lights = self.lock();
        for light in lights.iter_mut() {
            light.is_on = is_on;
            self.observer.light_changed(light);
        }
        tracing::trace!(is_on, count = lights.len(), "all lights set");
        lights.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Light>> {
        self.lights.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
