//! JSON-Import/Export für Grundrisse.
//!
//! Das Dokument besteht nur aus Arrays (Ebenen, Knoten, Wände, Öffnungen,
//! Räume) mit expliziten IDs. Beim Import werden alle Referenzen geprüft.

pub mod reader;
pub mod writer;

pub use reader::{from_document, parse_plan_document};
pub use writer::{to_document, write_plan_document};

use crate::core::{
    Camera2D, GraphError, LayerId, NodeId, OpeningId, OpeningKind, RoomId, Tombstones, WallId,
    WallKind,
};
use crate::shared::LinearUnit;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Aktuelle Version des Dokumentformats.
pub const FORMAT_VERSION: u32 = 1;

/// Fehler beim Einlesen eines Dokuments
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// JSON ungültig oder Felder fehlen
    #[error("JSON-Fehler: {0}")]
    Json(#[from] serde_json::Error),
    /// Dokument wurde mit einer neueren Formatversion geschrieben
    #[error("nicht unterstützte Formatversion {found} (maximal {supported})")]
    UnsupportedVersion {
        /// Gefundene Version
        found: u32,
        /// Höchste lesbare Version
        supported: u32,
    },
    /// Referenz- oder Geometriefehler im Inhalt
    #[error("ungültiger Grundriss: {0}")]
    Graph(#[from] GraphError),
}

/// Serialisiertes Grundriss-Dokument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDocument {
    /// Formatversion
    pub version: u32,
    /// Längeneinheit der Koordinaten
    pub unit: LinearUnit,
    /// Fangradius für Knoten-Merge
    pub merge_threshold: f32,
    /// ID der Standard-Ebene
    pub default_layer: LayerId,
    /// Ebenen
    pub layers: Vec<LayerRecord>,
    /// Knoten mit Adjazenz in gespeicherter Reihenfolge
    pub nodes: Vec<NodeRecord>,
    /// Wände
    pub walls: Vec<WallRecord>,
    /// Türen und Fenster
    #[serde(default)]
    pub openings: Vec<OpeningRecord>,
    /// Räume
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    /// Freie Slots mit Generation, damit gelöschte IDs nicht neu vergeben werden
    #[serde(default, skip_serializing_if = "Tombstones::is_empty")]
    pub tombstones: Tombstones,
    /// Kamera beim Speichern
    pub camera: Camera2D,
}

/// Ebene im Dokument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    /// ID
    pub id: LayerId,
    /// Name
    pub name: String,
    /// Sichtbarkeit
    pub visible: bool,
    /// Sperre
    #[serde(default)]
    pub locked: bool,
}

/// Knoten im Dokument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// ID
    pub id: NodeId,
    /// Position
    pub position: Vec2,
    /// Angrenzende Wände
    pub walls: Vec<WallId>,
}

/// Wand im Dokument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRecord {
    /// ID
    pub id: WallId,
    /// Start-Knoten
    pub start: NodeId,
    /// End-Knoten
    pub end: NodeId,
    /// Wandstärke
    pub thickness: f32,
    /// Konstruktionsart
    #[serde(default)]
    pub kind: WallKind,
    /// Ebene
    pub layer: LayerId,
    /// Höhe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Tür oder Fenster im Dokument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningRecord {
    /// ID
    pub id: OpeningId,
    /// Wand
    pub wall: WallId,
    /// Parametrische Position (0..=1)
    pub position: f32,
    /// Breite
    pub width: f32,
    /// Höhe
    pub height: f32,
    /// Tür/Fenster mit Zusatzfeldern
    pub kind: OpeningKind,
}

/// Raum im Dokument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    /// ID
    pub id: RoomId,
    /// Name
    pub name: String,
    /// Innenpolygon
    pub polygon: Vec<Vec2>,
    /// Umlaufende Wände
    pub walls: Vec<WallId>,
    /// Fläche
    pub area: f32,
    /// Umfang
    pub perimeter: f32,
}
