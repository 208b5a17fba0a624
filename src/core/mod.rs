//! Core-Domänentypen: Geometrie, Kamera, Grundriss-Graph, Snapping, Raumerkennung.

pub mod arena;
pub mod camera;
pub mod error;
pub mod floor_plan;
pub mod geometry;
pub mod layer;
/// Grundriss-Datenmodell
///
/// - FloorPlan: Container für Knoten, Wände, Öffnungen, Räume und Ebenen
/// - Node: Wandendpunkt mit Adjazenzliste
/// - Wall: Kante zwischen zwei Knoten mit Stärke, Art und Ebene
pub mod node;
pub mod opening;
pub mod region;
pub mod room;
pub mod snapping;
pub mod spatial;
pub mod wall;

pub use arena::{Arena, ArenaKey, LayerId, NodeId, OpeningId, RawId, RoomId, WallId};
pub use camera::Camera2D;
pub use error::GraphError;
pub use floor_plan::{
    FloorPlan, FloorPlanParts, NodeMerge, RemovedNode, RemovedWall, Tombstones, WallMatch,
    WallSplit, DEFAULT_MERGE_THRESHOLD, IMPORT_INDEX_HEADROOM,
};
pub use layer::Layer;
pub use node::Node;
pub use opening::{clamp_opening_position, Opening, OpeningGeometry, OpeningKind, SwingSide};
pub use region::{extract_region, resync_room, RegionError, RoomSync};
pub use room::{Room, RoomDraft};
pub use snapping::{
    resolve_snap, SnapContext, SnapKind, SnapResult, SnapSettings, SnapSource, SnapThresholds,
};
pub use spatial::{SpatialIndex, SpatialMatch};
pub use wall::{Wall, WallGeometry, WallKind, WallSpec};
