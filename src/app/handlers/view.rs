//! Handler für Kamera und Viewport.

use crate::app::use_cases;
use crate::app::AppState;

/// Setzt die Kamera auf den Standardzustand zurück.
pub fn reset_camera(state: &mut AppState) {
    use_cases::camera::reset_camera(state);
}

/// Zoomt stufenweise hinein.
pub fn zoom_in(state: &mut AppState) {
    use_cases::camera::zoom_in(state);
}

/// Zoomt stufenweise heraus.
pub fn zoom_out(state: &mut AppState) {
    use_cases::camera::zoom_out(state);
}

/// Passt die Kamera auf den Grundriss ein.
pub fn zoom_to_fit(state: &mut AppState) {
    use_cases::camera::zoom_to_fit(state);
}

/// Aktualisiert die Viewport-Größe im State.
pub fn set_viewport_size(state: &mut AppState, size: [f32; 2]) {
    use_cases::viewport::resize(state, size);
}

/// Verschiebt die Kamera um ein Screen-Delta.
pub fn pan(state: &mut AppState, delta: glam::Vec2) {
    use_cases::camera::pan(state, delta);
}

/// Zoomt mit optionalem Fokuspunkt in Screen-Pixeln.
pub fn zoom_towards(state: &mut AppState, factor: f32, focus_screen: Option<glam::Vec2>) {
    use_cases::camera::zoom_towards(state, factor, focus_screen);
}
