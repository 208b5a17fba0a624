//! Türen und Fenster, parametrisch an einer Wand verankert.

use super::WallId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Mindestabstand (parametrisch) einer Öffnung zu den Wandenden.
pub const MIN_END_MARGIN: f32 = 0.02;

/// Aufschlagrichtung einer Tür
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingSide {
    /// Aufschlag nach links (bezogen auf die Wandrichtung)
    #[default]
    Left,
    /// Aufschlag nach rechts
    Right,
}

/// Art der Öffnung inkl. typspezifischer Felder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpeningKind {
    /// Tür
    Door {
        /// Aufschlagrichtung
        swing: SwingSide,
    },
    /// Fenster
    Window {
        /// Brüstungshöhe
        sill_height: f32,
    },
}

/// Tür oder Fenster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opening {
    /// Tragende Wand
    pub wall: WallId,
    /// Parametrische Position entlang der Wand (0 = Start, 1 = Ende)
    pub position: f32,
    /// Breite
    pub width: f32,
    /// Höhe
    pub height: f32,
    /// Art
    pub kind: OpeningKind,
}

impl Opening {
    /// Erstellt eine Tür.
    pub fn door(wall: WallId, position: f32, width: f32, height: f32, swing: SwingSide) -> Self {
        Self {
            wall,
            position,
            width,
            height,
            kind: OpeningKind::Door { swing },
        }
    }

    /// Erstellt ein Fenster.
    pub fn window(wall: WallId, position: f32, width: f32, height: f32, sill_height: f32) -> Self {
        Self {
            wall,
            position,
            width,
            height,
            kind: OpeningKind::Window { sill_height },
        }
    }

    /// `true` für Türen.
    pub fn is_door(&self) -> bool {
        matches!(self.kind, OpeningKind::Door { .. })
    }
}

/// Begrenzt eine parametrische Position so, dass die Öffnung nicht über die
/// Wandenden hinausragt. Passt die Öffnung nicht in die Wand, wird sie mittig platziert.
pub fn clamp_opening_position(position: f32, width: f32, wall_length: f32) -> f32 {
    if wall_length <= f32::EPSILON {
        return 0.5;
    }
    let margin = (width * 0.5 / wall_length).max(MIN_END_MARGIN);
    if margin >= 0.5 {
        return 0.5;
    }
    position.clamp(margin, 1.0 - margin)
}

/// Abgeleitete Lage einer Öffnung in Weltkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningGeometry {
    /// Mittelpunkt auf der Wandachse
    pub center: Vec2,
    /// Anfang der Öffnung auf der Wandachse
    pub start: Vec2,
    /// Ende der Öffnung auf der Wandachse
    pub end: Vec2,
    /// Winkel der tragenden Wand (Radiant)
    pub angle: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamp_keeps_opening_inside_wall() {
        // 1 m breite Tür in 4 m Wand → Rand 0.125
        assert_relative_eq!(clamp_opening_position(0.0, 1.0, 4.0), 0.125);
        assert_relative_eq!(clamp_opening_position(0.99, 1.0, 4.0), 0.875);
        assert_relative_eq!(clamp_opening_position(0.4, 1.0, 4.0), 0.4);
    }

    #[test]
    fn clamp_centers_oversized_opening() {
        assert_relative_eq!(clamp_opening_position(0.1, 5.0, 4.0), 0.5);
        assert_relative_eq!(clamp_opening_position(0.1, 1.0, 0.0), 0.5);
    }

    #[test]
    fn clamp_applies_minimum_margin_for_narrow_openings() {
        assert_relative_eq!(clamp_opening_position(0.0, 0.0, 10.0), MIN_END_MARGIN);
    }
}
