//! Repräsentiert eine Wand zwischen zwei Knoten.

use super::geometry;
use super::{LayerId, NodeId};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Konstruktionsart der Wand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallKind {
    /// Tragende Wand
    #[default]
    Structural,
    /// Leichte Trennwand
    Partition,
}

/// Parameter für eine neue Wand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    /// Wandstärke (> 0)
    pub thickness: f32,
    /// Konstruktionsart
    pub kind: WallKind,
    /// Ebene (`None` = Standard-Ebene des Grundrisses)
    pub layer: Option<LayerId>,
    /// Optionale Wandhöhe
    pub height: Option<f32>,
}

impl WallSpec {
    /// Tragende Wand auf der Standard-Ebene.
    pub fn new(thickness: f32) -> Self {
        Self {
            thickness,
            kind: WallKind::Structural,
            layer: None,
            height: None,
        }
    }

    /// Setzt die Konstruktionsart.
    pub fn with_kind(mut self, kind: WallKind) -> Self {
        self.kind = kind;
        self
    }

    /// Setzt die Ebene.
    pub fn on_layer(mut self, layer: LayerId) -> Self {
        self.layer = Some(layer);
        self
    }

    /// Setzt die Wandhöhe.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// Eine Wand (Kante des Graphen). Geometrie wird nie gespeichert, sondern
/// immer aus den aktuellen Knotenpositionen abgeleitet.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    /// Start-Knoten
    pub start: NodeId,
    /// End-Knoten
    pub end: NodeId,
    /// Wandstärke
    pub thickness: f32,
    /// Konstruktionsart
    pub kind: WallKind,
    /// Ebene
    pub layer: LayerId,
    /// Optionale Höhe
    pub height: Option<f32>,
}

impl Wall {
    /// Prüft ob die Wand am Knoten endet.
    pub fn touches(&self, node: NodeId) -> bool {
        self.start == node || self.end == node
    }

    /// Liefert den gegenüberliegenden Knoten.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.start == node {
            Some(self.end)
        } else if self.end == node {
            Some(self.start)
        } else {
            None
        }
    }

    /// Übernimmt Stärke, Art, Ebene und Höhe als Spec (z.B. beim Teilen).
    pub fn spec(&self) -> WallSpec {
        WallSpec {
            thickness: self.thickness,
            kind: self.kind,
            layer: Some(self.layer),
            height: self.height,
        }
    }
}

/// Abgeleitete Wandgeometrie, bei jedem Zugriff neu berechnet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallGeometry {
    /// Startposition
    pub start: Vec2,
    /// Endposition
    pub end: Vec2,
    /// Mittelpunkt
    pub midpoint: Vec2,
    /// Länge
    pub length: f32,
    /// Winkel (Radiant)
    pub angle: f32,
    /// Rechteckiger Grundriss
    pub footprint: [Vec2; 4],
}

impl WallGeometry {
    /// Berechnet die Geometrie aus Endpunkten und Stärke.
    pub fn new(start: Vec2, end: Vec2, thickness: f32) -> Self {
        let delta = end - start;
        Self {
            start,
            end,
            midpoint: geometry::midpoint(start, end),
            length: delta.length(),
            angle: delta.y.atan2(delta.x),
            footprint: geometry::wall_footprint(start, end, thickness),
        }
    }

    /// Einheitsvektor Start → Ende (Null bei Länge 0).
    pub fn direction(&self) -> Vec2 {
        (self.end - self.start).normalize_or_zero()
    }

    /// Position beim Parameter `t` (0 = Start, 1 = Ende).
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.start.lerp(self.end, t)
    }
}
