//! Räume: aus dem Wandgraphen abgeleitete Polygone.

use super::geometry;
use super::WallId;
use glam::Vec2;

/// Ergebnis einer Raumerkennung, noch ohne Namen und ID.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDraft {
    /// Innenpolygon (um halbe Wandstärken eingerückt), implizit geschlossen
    pub polygon: Vec<Vec2>,
    /// Umlaufende Wände in Laufreihenfolge
    pub walls: Vec<WallId>,
    /// Fläche des Innenpolygons
    pub area: f32,
    /// Umfang des Innenpolygons
    pub perimeter: f32,
}

impl RoomDraft {
    /// Erstellt einen Entwurf und berechnet Fläche und Umfang.
    pub fn new(polygon: Vec<Vec2>, walls: Vec<WallId>) -> Self {
        let area = geometry::polygon_area(&polygon);
        let perimeter = geometry::polygon_perimeter(&polygon);
        Self {
            polygon,
            walls,
            area,
            perimeter,
        }
    }

    /// Anzahl paarweise verschiedener Eckpunkte.
    pub fn distinct_vertex_count(&self) -> usize {
        distinct_vertex_count(&self.polygon)
    }
}

/// Ein Raum. Wird beim Verschieben von Wänden NICHT automatisch
/// nachgeführt; dafür gibt es den expliziten Re-Sync.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    /// Anzeigename
    pub name: String,
    /// Innenpolygon, implizit geschlossen
    pub polygon: Vec<Vec2>,
    /// Umlaufende Wände
    pub walls: Vec<WallId>,
    /// Fläche zum Zeitpunkt der Ableitung
    pub area: f32,
    /// Umfang zum Zeitpunkt der Ableitung
    pub perimeter: f32,
}

impl Room {
    /// Erstellt einen Raum aus einem Entwurf.
    pub fn from_draft(name: impl Into<String>, draft: RoomDraft) -> Self {
        Self {
            name: name.into(),
            polygon: draft.polygon,
            walls: draft.walls,
            area: draft.area,
            perimeter: draft.perimeter,
        }
    }

    /// Übernimmt die Geometrie eines neuen Entwurfs (Name bleibt).
    pub fn apply_draft(&mut self, draft: RoomDraft) {
        self.polygon = draft.polygon;
        self.walls = draft.walls;
        self.area = draft.area;
        self.perimeter = draft.perimeter;
    }

    /// Schwerpunkt der Eckpunkte.
    pub fn centroid(&self) -> Option<Vec2> {
        geometry::polygon_centroid(&self.polygon)
    }

    /// Punkt-in-Raum-Test.
    pub fn contains(&self, point: Vec2) -> bool {
        geometry::is_point_in_polygon(point, &self.polygon)
    }
}

/// Zählt paarweise verschiedene Eckpunkte (Toleranz [`geometry::EPSILON`]).
pub fn distinct_vertex_count(polygon: &[Vec2]) -> usize {
    let mut distinct: Vec<Vec2> = Vec::with_capacity(polygon.len());
    for p in polygon {
        if !distinct.iter().any(|q| q.distance(*p) <= geometry::EPSILON) {
            distinct.push(*p);
        }
    }
    distinct.len()
}
