//! 2D-Kamera für Pan und Zoom.
//!
//! Affine Abbildung `screen = world * zoom + offset`. Die beiden
//! Konvertierungen sind exakte Inverse voneinander.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D-Kamera mit Pan und Zoom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera2D {
    /// Screen-Position des Welt-Ursprungs in Pixeln
    pub offset: Vec2,
    /// Zoom-Level in Pixeln pro Welteinheit
    pub zoom: f32,
}

impl Camera2D {
    /// Standard-Zoom (Pixel pro Welteinheit).
    pub const DEFAULT_ZOOM: f32 = 50.0;
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.001;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 10_000.0;

    /// Erstellt eine neue Kamera
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: Self::DEFAULT_ZOOM,
        }
    }

    /// Erstellt eine Kamera mit expliziten Parametern (Zoom wird begrenzt).
    pub fn with(offset: Vec2, zoom: f32) -> Self {
        Self {
            offset,
            zoom: zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX),
        }
    }

    /// Konvertiert Welt-Koordinaten zu Screen-Koordinaten.
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos * self.zoom + self.offset
    }

    /// Konvertiert Screen-Koordinaten zu Welt-Koordinaten.
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        (screen_pos - self.offset) / self.zoom
    }

    /// Berechnet den Umrechnungsfaktor von Screen-Pixeln zu Welt-Einheiten.
    pub fn world_per_pixel(&self) -> f32 {
        1.0 / self.zoom
    }

    /// Rechnet einen Pixel-Radius in Welteinheiten um (z.B. Snap-Schwellen).
    pub fn px_to_world(&self, px: f32) -> f32 {
        px * self.world_per_pixel()
    }

    /// Verschiebt die Kamera um ein Screen-Delta (Pan)
    pub fn pan(&mut self, delta_screen: Vec2) {
        self.offset += delta_screen;
    }

    /// Ändert den Zoom-Level um den Ursprung des Screens.
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Zoomt so, dass der Weltpunkt unter `focus_screen` an Ort und Stelle bleibt.
    pub fn zoom_towards(&mut self, factor: f32, focus_screen: Vec2) {
        let focus_world = self.screen_to_world(focus_screen);
        self.zoom_by(factor);
        self.offset = focus_screen - focus_world * self.zoom;
    }

    /// Zentriert die Kamera auf einen Weltpunkt.
    pub fn look_at(&mut self, target: Vec2, viewport_size: Vec2) {
        self.offset = viewport_size * 0.5 - target * self.zoom;
    }

    /// Passt Zoom und Offset so an, dass die Bounding-Box mit Rand sichtbar ist.
    pub fn fit_bounds(&mut self, min: Vec2, max: Vec2, viewport_size: Vec2, margin_px: f32) {
        let extent = (max - min).max(Vec2::splat(f32::EPSILON));
        let usable = (viewport_size - Vec2::splat(2.0 * margin_px)).max(Vec2::ONE);
        let zoom = (usable.x / extent.x).min(usable.y / extent.y);
        self.zoom = zoom.clamp(Self::ZOOM_MIN, Self::ZOOM_MAX);
        self.look_at((min + max) * 0.5, viewport_size);
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_pan() {
        let mut camera = Camera2D::new();
        camera.pan(Vec2::new(10.0, 5.0));
        assert_relative_eq!(camera.offset.x, 10.0);
        assert_relative_eq!(camera.offset.y, 5.0);
    }

    #[test]
    fn test_camera_zoom_is_clamped() {
        let mut camera = Camera2D::with(Vec2::ZERO, 1.0);
        camera.zoom_by(2.0);
        assert_relative_eq!(camera.zoom, 2.0);

        camera.zoom_by(1e9);
        assert_relative_eq!(camera.zoom, Camera2D::ZOOM_MAX);
    }

    #[test]
    fn test_world_screen_roundtrip() {
        let camera = Camera2D::with(Vec2::new(320.0, 240.0), 37.5);
        for world in [
            Vec2::new(0.0, 0.0),
            Vec2::new(3.25, -7.5),
            Vec2::new(-120.0, 44.0),
        ] {
            let screen = camera.world_to_screen(world);
            let back = camera.screen_to_world(screen);
            assert_relative_eq!(back.x, world.x, epsilon = 1e-4);
            assert_relative_eq!(back.y, world.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_zoom_towards_keeps_focus_fixed() {
        let mut camera = Camera2D::with(Vec2::new(100.0, 50.0), 20.0);
        let focus = Vec2::new(400.0, 300.0);
        let before = camera.screen_to_world(focus);

        camera.zoom_towards(1.5, focus);

        let after = camera.screen_to_world(focus);
        assert_relative_eq!(before.x, after.x, epsilon = 1e-4);
        assert_relative_eq!(before.y, after.y, epsilon = 1e-4);
        assert_relative_eq!(camera.zoom, 30.0);
    }

    #[test]
    fn test_world_per_pixel() {
        let mut camera = Camera2D::with(Vec2::ZERO, 10.0);
        let wpp1 = camera.world_per_pixel();
        camera.zoom = 20.0;
        let wpp2 = camera.world_per_pixel();
        // Doppelter Zoom → halb so viele Welt-Einheiten pro Pixel
        assert_relative_eq!(wpp2, wpp1 / 2.0);
        assert_relative_eq!(camera.px_to_world(12.0), 0.6);
    }

    #[test]
    fn test_fit_bounds_centers_box() {
        let mut camera = Camera2D::new();
        let viewport = Vec2::new(800.0, 600.0);
        camera.fit_bounds(Vec2::ZERO, Vec2::new(10.0, 10.0), viewport, 50.0);

        let center = camera.world_to_screen(Vec2::new(5.0, 5.0));
        assert_relative_eq!(center.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(center.y, 300.0, epsilon = 1e-3);
        assert_relative_eq!(camera.zoom, 50.0);
    }
}
