//! Render hook: observes light mutations.

use scenepad_domain::light::Light;

/// Called synchronously by the light store after every mutation, with the
/// light's new state and the store's lock held. Implementations must not
/// block and must not call back into the store.
pub trait LightObserver {
    fn light_changed(&self, light: &Light);
}

impl<T: LightObserver + ?Sized> LightObserver for std::sync::Arc<T> {
    fn light_changed(&self, light: &Light) {
        (**self).light_changed(light);
    }
}

/// Observer that ignores every change.
impl LightObserver for () {
    fn light_changed(&self, _light: &Light) {}
}
