//! Gesture sink port: where the press service delivers classified gestures.

use std::future::Future;

use scenepad_domain::button::Gesture;
use scenepad_domain::id::ButtonId;

pub trait GestureSink {
    fn on_gesture(
        &self,
        button_id: &ButtonId,
        gesture: Gesture,
    ) -> impl Future<Output = ()> + Send;
}

impl<T: GestureSink + Send + Sync> GestureSink for std::sync::Arc<T> {
    fn on_gesture(
        &self,
        button_id: &ButtonId,
        gesture: Gesture,
    ) -> impl Future<Output = ()> + Send {
        (**self).on_gesture(button_id, gesture)
    }
}
