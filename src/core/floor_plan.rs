//! Der zentrale Grundriss-Graph mit Knoten, Wänden, Öffnungen, Räumen und Ebenen.
//!
//! Alle Mutationen sind Alles-oder-Nichts: schlägt eine Prüfung fehl, bleibt
//! der Grundriss unverändert. Abgeleitete Geometrie (Wandlänge, Mittelpunkt,
//! Footprint) wird nie gespeichert, sondern bei jedem Zugriff neu berechnet.

use super::arena::{Arena, ArenaKey};
use super::geometry;
use super::opening::OpeningGeometry;
use super::room::{self, RoomDraft};
use super::{
    GraphError, Layer, LayerId, Node, NodeId, Opening, OpeningId, Room, RoomId, SpatialIndex,
    SpatialMatch, Wall, WallGeometry, WallId, WallKind, WallSpec,
};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Standard-Fangradius beim Zusammenführen von Knoten (Welteinheiten).
pub const DEFAULT_MERGE_THRESHOLD: f32 = 0.05;

/// Name der Ebene, die jeder Grundriss bei der Erstellung erhält.
pub const DEFAULT_LAYER_NAME: &str = "Standard";

/// Zusätzliche Slots über Einträge und Tombstones hinaus, die ein Import
/// als Lücken in der ID-Vergabe akzeptiert.
pub const IMPORT_INDEX_HEADROOM: usize = 1024;

/// Was beim Entfernen einer Wand mit entfernt wurde.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedWall {
    /// ID der entfernten Wand
    pub wall_id: WallId,
    /// Die entfernte Wand
    pub wall: Wall,
    /// Kaskadiert entfernte Öffnungen
    pub openings: Vec<(OpeningId, Opening)>,
    /// Verwaiste und daher entfernte Endknoten
    pub orphaned_nodes: Vec<NodeId>,
}

/// Was beim Entfernen eines Knotens mit entfernt wurde.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedNode {
    /// ID des entfernten Knotens
    pub node_id: NodeId,
    /// Letzte Position
    pub position: Vec2,
    /// Kaskadiert entfernte Wände
    pub walls: Vec<RemovedWall>,
}

/// Ergebnis einer Knotenzusammenführung.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMerge {
    /// Verbleibender Knoten
    pub target: NodeId,
    /// Auf `target` umgehängte Wände
    pub rewired_walls: Vec<WallId>,
    /// Zur Schleife oder zum Duplikat gewordene und daher entfernte Wände
    pub removed_walls: Vec<RemovedWall>,
}

/// Ergebnis einer Wandteilung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSplit {
    /// Neuer Knoten am Teilungspunkt
    pub new_node: NodeId,
    /// Neue zweite Wandhälfte (Teilungspunkt → ursprüngliches Ende)
    pub new_wall: WallId,
}

/// Treffer einer Wand-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallMatch {
    /// ID der Wand
    pub wall_id: WallId,
    /// Nächster Punkt auf der Wandachse
    pub point: Vec2,
    /// Parametrische Position des Punkts (0..=1)
    pub t: f32,
    /// Distanz Suchpunkt → Wandachse
    pub distance: f32,
}

/// Rohdaten für den Wiederaufbau eines Grundrisses mit festen IDs (Import).
#[derive(Debug, Clone)]
pub struct FloorPlanParts {
    /// Fangradius
    pub merge_threshold: f32,
    /// Standard-Ebene
    pub default_layer: LayerId,
    /// Ebenen
    pub layers: Vec<(LayerId, Layer)>,
    /// Knoten mit Position und Adjazenzliste
    pub nodes: Vec<(NodeId, Vec2, Vec<WallId>)>,
    /// Wände
    pub walls: Vec<(WallId, Wall)>,
    /// Öffnungen
    pub openings: Vec<(OpeningId, Opening)>,
    /// Räume
    pub rooms: Vec<(RoomId, Room)>,
    /// Freie Slots mit Generation
    pub tombstones: Tombstones,
}

/// Freie Slots je Arena mit aktueller Generation, in Freilisten-Reihenfolge.
///
/// Wird mitgespeichert, damit gelöschte IDs nach dem Laden nicht erneut
/// vergeben werden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tombstones {
    /// Ebenen
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<LayerId>,
    /// Knoten
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeId>,
    /// Wände
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<WallId>,
    /// Öffnungen
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub openings: Vec<OpeningId>,
    /// Räume
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rooms: Vec<RoomId>,
}

impl Tombstones {
    /// `true`, wenn keine Arena freie Slots hat.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
            && self.nodes.is_empty()
            && self.walls.is_empty()
            && self.openings.is_empty()
            && self.rooms.is_empty()
    }
}

/// Vollständiger Grundriss
#[derive(Debug, Clone)]
pub struct FloorPlan {
    nodes: Arena<NodeId, Node>,
    walls: Arena<WallId, Wall>,
    openings: Arena<OpeningId, Opening>,
    rooms: Arena<RoomId, Room>,
    layers: Arena<LayerId, Layer>,
    default_layer: LayerId,
    merge_threshold: f32,
    /// Persistenter Spatial-Index für schnelle Knoten-Abfragen
    spatial_index: SpatialIndex,
}

impl PartialEq for FloorPlan {
    /// Vergleicht den Modellzustand; der Spatial-Index ist abgeleitet und zählt nicht.
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
            && self.walls == other.walls
            && self.openings == other.openings
            && self.rooms == other.rooms
            && self.layers == other.layers
            && self.default_layer == other.default_layer
            && self.merge_threshold == other.merge_threshold
    }
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new(DEFAULT_MERGE_THRESHOLD)
    }
}

impl FloorPlan {
    /// Erstellt einen leeren Grundriss mit einer Standard-Ebene.
    pub fn new(merge_threshold: f32) -> Self {
        let mut layers = Arena::new();
        let default_layer = layers.insert(Layer::new(DEFAULT_LAYER_NAME));
        Self {
            nodes: Arena::new(),
            walls: Arena::new(),
            openings: Arena::new(),
            rooms: Arena::new(),
            layers,
            default_layer,
            merge_threshold: merge_threshold.max(0.0),
            spatial_index: SpatialIndex::empty(),
        }
    }

    /// Baut einen Grundriss mit vorgegebenen IDs auf und prüft alle Referenzen.
    pub fn from_parts(parts: FloorPlanParts) -> Result<Self, GraphError> {
        let mut plan = Self {
            nodes: Arena::new(),
            walls: Arena::new(),
            openings: Arena::new(),
            rooms: Arena::new(),
            layers: Arena::new(),
            default_layer: parts.default_layer,
            merge_threshold: parts.merge_threshold.max(0.0),
            spatial_index: SpatialIndex::empty(),
        };

        let tombstones = parts.tombstones;

        let limit = index_limit(parts.layers.len(), tombstones.layers.len());
        for (id, layer) in parts.layers {
            check_index(id, limit)?;
            plan.layers
                .insert_at(id, layer)
                .map_err(|_| GraphError::IdCollision(id.to_string()))?;
        }
        if !plan.layers.contains(plan.default_layer) {
            return Err(GraphError::UnknownLayer(plan.default_layer));
        }

        let limit = index_limit(parts.nodes.len(), tombstones.nodes.len());
        for (id, position, walls) in parts.nodes {
            check_index(id, limit)?;
            ensure_finite(position)?;
            plan.nodes
                .insert_at(id, Node::with_walls(position, walls))
                .map_err(|_| GraphError::IdCollision(id.to_string()))?;
        }

        let limit = index_limit(parts.walls.len(), tombstones.walls.len());
        for (id, wall) in parts.walls {
            check_index(id, limit)?;
            plan.validate_wall(wall.start, wall.end, &wall.spec())?;
            plan.walls
                .insert_at(id, wall)
                .map_err(|_| GraphError::IdCollision(id.to_string()))?;
        }

        // Adjazenz: jede gelistete Wand muss am Knoten enden und umgekehrt
        for (node_id, node) in plan.nodes.iter() {
            let listed_ok = node
                .walls()
                .iter()
                .all(|w| plan.walls.get(*w).is_some_and(|wall| wall.touches(node_id)));
            let complete = plan
                .walls
                .iter()
                .filter(|(_, wall)| wall.touches(node_id))
                .all(|(wall_id, _)| node.walls().contains(&wall_id));
            if !listed_ok || !complete {
                return Err(GraphError::InconsistentAdjacency(node_id));
            }
        }

        let limit = index_limit(parts.openings.len(), tombstones.openings.len());
        for (id, opening) in parts.openings {
            check_index(id, limit)?;
            validate_opening(&opening)?;
            if !plan.walls.contains(opening.wall) {
                return Err(GraphError::UnknownWall(opening.wall));
            }
            plan.openings
                .insert_at(id, opening)
                .map_err(|_| GraphError::IdCollision(id.to_string()))?;
        }

        let limit = index_limit(parts.rooms.len(), tombstones.rooms.len());
        for (id, room) in parts.rooms {
            check_index(id, limit)?;
            if room::distinct_vertex_count(&room.polygon) < 3 {
                return Err(GraphError::DegenerateRoom);
            }
            plan.rooms
                .insert_at(id, room)
                .map_err(|_| GraphError::IdCollision(id.to_string()))?;
        }

        reserve_all(&mut plan.layers, &tombstones.layers)?;
        reserve_all(&mut plan.nodes, &tombstones.nodes)?;
        reserve_all(&mut plan.walls, &tombstones.walls)?;
        reserve_all(&mut plan.openings, &tombstones.openings)?;
        reserve_all(&mut plan.rooms, &tombstones.rooms)?;

        plan.nodes.seal_import();
        plan.walls.seal_import();
        plan.openings.seal_import();
        plan.rooms.seal_import();
        plan.layers.seal_import();
        plan.rebuild_spatial_index();
        Ok(plan)
    }

    // ── Knoten ───────────────────────────────────────────────────────

    /// Fügt einen Knoten hinzu oder liefert einen bestehenden Knoten
    /// innerhalb des Fangradius.
    pub fn add_node(&mut self, position: Vec2) -> Result<NodeId, GraphError> {
        ensure_finite(position)?;
        if let Some(hit) = self.spatial_index.nearest(position) {
            if hit.distance <= self.merge_threshold {
                return Ok(hit.node_id);
            }
        }
        Ok(self.insert_node(position))
    }

    fn insert_node(&mut self, position: Vec2) -> NodeId {
        let id = self.nodes.insert(Node::new(position));
        self.rebuild_spatial_index();
        id
    }

    /// Verschiebt einen Knoten. Reine Positionsänderung ohne Merge.
    ///
    /// Schlägt fehl, wenn eine angrenzende Wand dadurch die Länge 0 bekäme.
    pub fn move_node(&mut self, node_id: NodeId, position: Vec2) -> Result<(), GraphError> {
        ensure_finite(position)?;
        let node = self
            .nodes
            .get(node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        if node.position == position {
            return Ok(());
        }
        for &wall_id in node.walls() {
            let Some(other) = self.walls.get(wall_id).and_then(|w| w.other_end(node_id)) else {
                continue;
            };
            if self.node_position(other)?.distance(position) <= geometry::EPSILON {
                return Err(GraphError::ZeroLengthWall(node_id, other));
            }
        }

        if let Some(node) = self.nodes.get_mut(node_id) {
            node.position = position;
        }
        self.rebuild_spatial_index();
        Ok(())
    }

    /// Führt `source` in `target` zusammen.
    ///
    /// Wände von `source` werden auf `target` umgehängt. Wände, die dabei zur
    /// Schleife oder zum Duplikat einer bestehenden Wand würden, werden samt
    /// Öffnungen entfernt. `source` existiert danach nicht mehr.
    pub fn merge_nodes(&mut self, source: NodeId, target: NodeId) -> Result<NodeMerge, GraphError> {
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        let target_pos = self.node_position(target)?;
        let incident: Vec<WallId> = self
            .nodes
            .get(source)
            .ok_or(GraphError::UnknownNode(source))?
            .walls()
            .to_vec();

        let mut rewire = Vec::new();
        let mut collapse = Vec::new();
        for wall_id in incident {
            let other = self
                .walls
                .get(wall_id)
                .ok_or(GraphError::UnknownWall(wall_id))?
                .other_end(source)
                .ok_or(GraphError::InconsistentAdjacency(source))?;
            if other == target || self.wall_between(other, target).is_some() {
                collapse.push(wall_id);
            } else if self.node_position(other)?.distance(target_pos) <= geometry::EPSILON {
                return Err(GraphError::ZeroLengthWall(other, target));
            } else {
                rewire.push(wall_id);
            }
        }

        // Erst umhängen, damit `target` beim Entfernen nicht verwaist
        for &wall_id in &rewire {
            if let Some(wall) = self.walls.get_mut(wall_id) {
                if wall.start == source {
                    wall.start = target;
                } else {
                    wall.end = target;
                }
            }
            if let Some(node) = self.nodes.get_mut(source) {
                node.detach(wall_id);
            }
            if let Some(node) = self.nodes.get_mut(target) {
                node.attach(wall_id);
            }
        }
        let mut removed_walls = Vec::with_capacity(collapse.len());
        for wall_id in collapse {
            removed_walls.push(self.remove_wall(wall_id)?);
        }
        self.nodes.remove(source);
        self.rebuild_spatial_index();

        Ok(NodeMerge {
            target,
            rewired_walls: rewire,
            removed_walls,
        })
    }

    /// Entfernt einen Knoten samt aller angrenzenden Wände (kaskadierend).
    pub fn remove_node(&mut self, node_id: NodeId) -> Result<RemovedNode, GraphError> {
        let node = self
            .nodes
            .get(node_id)
            .ok_or(GraphError::UnknownNode(node_id))?;
        let position = node.position;
        let incident: Vec<WallId> = node.walls().to_vec();

        let mut walls = Vec::with_capacity(incident.len());
        for wall_id in incident {
            walls.push(self.remove_wall(wall_id)?);
        }
        // Nach der letzten Wand ist der Knoten bereits als Waise entfernt
        if self.nodes.remove(node_id).is_some() {
            self.rebuild_spatial_index();
        }

        Ok(RemovedNode {
            node_id,
            position,
            walls,
        })
    }

    // ── Wände ────────────────────────────────────────────────────────

    /// Verbindet zwei bestehende Knoten mit einer neuen Wand.
    pub fn add_wall(
        &mut self,
        start: NodeId,
        end: NodeId,
        spec: WallSpec,
    ) -> Result<WallId, GraphError> {
        self.validate_wall(start, end, &spec)?;
        if let Some(existing) = self.wall_between(start, end) {
            return Err(GraphError::DuplicateWall(existing));
        }

        let wall_id = self.walls.insert(Wall {
            start,
            end,
            thickness: spec.thickness,
            kind: spec.kind,
            layer: spec.layer.unwrap_or(self.default_layer),
            height: spec.height,
        });
        for node_id in [start, end] {
            if let Some(node) = self.nodes.get_mut(node_id) {
                node.attach(wall_id);
            }
        }
        Ok(wall_id)
    }

    fn validate_wall(&self, start: NodeId, end: NodeId, spec: &WallSpec) -> Result<(), GraphError> {
        let start_pos = self.node_position(start)?;
        let end_pos = self.node_position(end)?;
        if start == end {
            return Err(GraphError::SelfLoop(start));
        }
        if start_pos.distance(end_pos) <= geometry::EPSILON {
            return Err(GraphError::ZeroLengthWall(start, end));
        }
        if !(spec.thickness.is_finite() && spec.thickness > 0.0) {
            return Err(GraphError::InvalidThickness(spec.thickness));
        }
        if let Some(layer) = spec.layer {
            if !self.layers.contains(layer) {
                return Err(GraphError::UnknownLayer(layer));
            }
        }
        Ok(())
    }

    /// Entfernt eine Wand, ihre Öffnungen und dadurch verwaiste Endknoten.
    pub fn remove_wall(&mut self, wall_id: WallId) -> Result<RemovedWall, GraphError> {
        let wall = self
            .walls
            .remove(wall_id)
            .ok_or(GraphError::UnknownWall(wall_id))?;

        let opening_ids = self.openings_on_wall(wall_id);
        let openings = opening_ids
            .into_iter()
            .filter_map(|id| self.openings.remove(id).map(|o| (id, o)))
            .collect();

        let mut orphaned_nodes = Vec::new();
        for node_id in [wall.start, wall.end] {
            let orphan = match self.nodes.get_mut(node_id) {
                Some(node) => {
                    node.detach(wall_id);
                    node.is_orphan()
                }
                None => false,
            };
            if orphan {
                self.nodes.remove(node_id);
                orphaned_nodes.push(node_id);
            }
        }
        if !orphaned_nodes.is_empty() {
            self.rebuild_spatial_index();
        }

        Ok(RemovedWall {
            wall_id,
            wall,
            openings,
            orphaned_nodes,
        })
    }

    /// Teilt eine Wand am auf sie projizierten Punkt.
    ///
    /// Die ursprüngliche Wand endet danach am neuen Knoten, die zweite Hälfte
    /// übernimmt Stärke, Art, Ebene und Höhe. Öffnungen wandern auf die Hälfte,
    /// in der sie liegen.
    pub fn split_wall(&mut self, wall_id: WallId, at: Vec2) -> Result<WallSplit, GraphError> {
        ensure_finite(at)?;
        let wall = self
            .walls
            .get(wall_id)
            .cloned()
            .ok_or(GraphError::UnknownWall(wall_id))?;
        let geom = self
            .wall_geometry(wall_id)
            .ok_or(GraphError::UnknownWall(wall_id))?;

        let projection = geometry::closest_point_on_segment(at, geom.start, geom.end);
        let t = projection.t;
        if t * geom.length <= geometry::EPSILON || (1.0 - t) * geom.length <= geometry::EPSILON {
            return Err(GraphError::SplitAtEndpoint(wall_id));
        }

        let new_node = self.insert_node(projection.point);
        let new_wall = self.walls.insert(Wall {
            start: new_node,
            end: wall.end,
            ..wall.clone()
        });

        if let Some(original) = self.walls.get_mut(wall_id) {
            original.end = new_node;
        }
        if let Some(end_node) = self.nodes.get_mut(wall.end) {
            end_node.replace_wall(wall_id, new_wall);
        }
        if let Some(node) = self.nodes.get_mut(new_node) {
            node.attach(wall_id);
            node.attach(new_wall);
        }

        for opening_id in self.openings_on_wall(wall_id) {
            if let Some(opening) = self.openings.get_mut(opening_id) {
                if opening.position <= t {
                    opening.position /= t;
                } else {
                    opening.wall = new_wall;
                    opening.position = (opening.position - t) / (1.0 - t);
                }
            }
        }

        Ok(WallSplit { new_node, new_wall })
    }

    /// Setzt die Wandstärke.
    pub fn set_wall_thickness(&mut self, wall_id: WallId, thickness: f32) -> Result<(), GraphError> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(GraphError::InvalidThickness(thickness));
        }
        self.wall_mut(wall_id)?.thickness = thickness;
        Ok(())
    }

    /// Setzt die Konstruktionsart.
    pub fn set_wall_kind(&mut self, wall_id: WallId, kind: WallKind) -> Result<(), GraphError> {
        self.wall_mut(wall_id)?.kind = kind;
        Ok(())
    }

    /// Verschiebt eine Wand auf eine andere Ebene.
    pub fn set_wall_layer(&mut self, wall_id: WallId, layer: LayerId) -> Result<(), GraphError> {
        if !self.layers.contains(layer) {
            return Err(GraphError::UnknownLayer(layer));
        }
        self.wall_mut(wall_id)?.layer = layer;
        Ok(())
    }

    fn wall_mut(&mut self, wall_id: WallId) -> Result<&mut Wall, GraphError> {
        self.walls
            .get_mut(wall_id)
            .ok_or(GraphError::UnknownWall(wall_id))
    }

    // ── Öffnungen ────────────────────────────────────────────────────

    /// Fügt eine Tür oder ein Fenster hinzu. Die Position wird nicht begrenzt.
    pub fn add_opening(&mut self, opening: Opening) -> Result<OpeningId, GraphError> {
        if !self.walls.contains(opening.wall) {
            return Err(GraphError::UnknownWall(opening.wall));
        }
        validate_opening(&opening)?;
        Ok(self.openings.insert(opening))
    }

    /// Entfernt eine Öffnung.
    pub fn remove_opening(&mut self, opening_id: OpeningId) -> Result<Opening, GraphError> {
        self.openings
            .remove(opening_id)
            .ok_or(GraphError::UnknownOpening(opening_id))
    }

    /// Setzt die parametrische Position einer Öffnung.
    pub fn set_opening_position(
        &mut self,
        opening_id: OpeningId,
        position: f32,
    ) -> Result<(), GraphError> {
        if !position.is_finite() {
            return Err(GraphError::InvalidOpening);
        }
        let opening = self
            .openings
            .get_mut(opening_id)
            .ok_or(GraphError::UnknownOpening(opening_id))?;
        opening.position = position;
        Ok(())
    }

    // ── Räume ────────────────────────────────────────────────────────

    /// Legt einen Raum aus einem Entwurf an.
    pub fn add_room(
        &mut self,
        draft: RoomDraft,
        name: impl Into<String>,
    ) -> Result<RoomId, GraphError> {
        if draft.distinct_vertex_count() < 3 {
            return Err(GraphError::DegenerateRoom);
        }
        Ok(self.rooms.insert(Room::from_draft(name, draft)))
    }

    /// Entfernt einen Raum.
    pub fn remove_room(&mut self, room_id: RoomId) -> Result<Room, GraphError> {
        self.rooms
            .remove(room_id)
            .ok_or(GraphError::UnknownRoom(room_id))
    }

    /// Benennt einen Raum um.
    pub fn rename_room(
        &mut self,
        room_id: RoomId,
        name: impl Into<String>,
    ) -> Result<(), GraphError> {
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or(GraphError::UnknownRoom(room_id))?;
        room.name = name.into();
        Ok(())
    }

    /// Ersetzt Polygon, Wandliste und Maße eines Raums (expliziter Re-Sync).
    pub fn replace_room_geometry(
        &mut self,
        room_id: RoomId,
        draft: RoomDraft,
    ) -> Result<(), GraphError> {
        if draft.distinct_vertex_count() < 3 {
            return Err(GraphError::DegenerateRoom);
        }
        let room = self
            .rooms
            .get_mut(room_id)
            .ok_or(GraphError::UnknownRoom(room_id))?;
        room.apply_draft(draft);
        Ok(())
    }

    // ── Ebenen ───────────────────────────────────────────────────────

    /// Legt eine neue, sichtbare Ebene an.
    pub fn add_layer(&mut self, name: impl Into<String>) -> LayerId {
        self.layers.insert(Layer::new(name))
    }

    /// Schaltet die Sichtbarkeit einer Ebene.
    pub fn set_layer_visibility(&mut self, layer: LayerId, visible: bool) -> Result<(), GraphError> {
        self.layer_mut(layer)?.visible = visible;
        Ok(())
    }

    /// Sperrt oder entsperrt eine Ebene.
    pub fn set_layer_locked(&mut self, layer: LayerId, locked: bool) -> Result<(), GraphError> {
        self.layer_mut(layer)?.locked = locked;
        Ok(())
    }

    fn layer_mut(&mut self, layer: LayerId) -> Result<&mut Layer, GraphError> {
        self.layers
            .get_mut(layer)
            .ok_or(GraphError::UnknownLayer(layer))
    }

    // ── Abfragen ─────────────────────────────────────────────────────

    /// Fangradius für das Zusammenführen von Knoten.
    pub fn merge_threshold(&self) -> f32 {
        self.merge_threshold
    }

    /// Setzt den Fangradius.
    pub fn set_merge_threshold(&mut self, threshold: f32) {
        self.merge_threshold = threshold.max(0.0);
    }

    /// Freie Slots aller Arenen (für den Export).
    pub fn tombstones(&self) -> Tombstones {
        Tombstones {
            layers: self.layers.tombstones().collect(),
            nodes: self.nodes.tombstones().collect(),
            walls: self.walls.tombstones().collect(),
            openings: self.openings.tombstones().collect(),
            rooms: self.rooms.tombstones().collect(),
        }
    }

    /// Standard-Ebene neuer Wände.
    pub fn default_layer(&self) -> LayerId {
        self.default_layer
    }

    /// Knoten per ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Wand per ID.
    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id)
    }

    /// Öffnung per ID.
    pub fn opening(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.get(id)
    }

    /// Raum per ID.
    pub fn room(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Ebene per ID.
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    /// Alle Knoten in stabiler Reihenfolge.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter()
    }

    /// Alle Wände in stabiler Reihenfolge.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> + '_ {
        self.walls.iter()
    }

    /// Alle Öffnungen.
    pub fn openings(&self) -> impl Iterator<Item = (OpeningId, &Opening)> + '_ {
        self.openings.iter()
    }

    /// Alle Räume.
    pub fn rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> + '_ {
        self.rooms.iter()
    }

    /// Alle Ebenen.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &Layer)> + '_ {
        self.layers.iter()
    }

    /// Gibt die Anzahl der Knoten zurück
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt die Anzahl der Wände zurück
    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    /// Gibt die Anzahl der Öffnungen zurück
    pub fn opening_count(&self) -> usize {
        self.openings.len()
    }

    /// Gibt die Anzahl der Räume zurück
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Gibt die Anzahl der Ebenen zurück
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn node_position(&self, id: NodeId) -> Result<Vec2, GraphError> {
        self.nodes
            .get(id)
            .map(|n| n.position)
            .ok_or(GraphError::UnknownNode(id))
    }

    /// Start- und Endposition einer Wand.
    pub fn wall_endpoints(&self, wall_id: WallId) -> Option<(Vec2, Vec2)> {
        let wall = self.walls.get(wall_id)?;
        let start = self.nodes.get(wall.start)?.position;
        let end = self.nodes.get(wall.end)?.position;
        Some((start, end))
    }

    /// Abgeleitete Geometrie einer Wand (bei jedem Aufruf neu berechnet).
    pub fn wall_geometry(&self, wall_id: WallId) -> Option<WallGeometry> {
        let thickness = self.walls.get(wall_id)?.thickness;
        let (start, end) = self.wall_endpoints(wall_id)?;
        Some(WallGeometry::new(start, end, thickness))
    }

    /// Abgeleitete Lage einer Öffnung.
    pub fn opening_geometry(&self, opening_id: OpeningId) -> Option<OpeningGeometry> {
        let opening = self.openings.get(opening_id)?;
        let geom = self.wall_geometry(opening.wall)?;
        let center = geom.point_at(opening.position);
        let half = geom.direction() * (opening.width * 0.5);
        Some(OpeningGeometry {
            center,
            start: center - half,
            end: center + half,
            angle: geom.angle,
        })
    }

    /// IDs aller Öffnungen einer Wand.
    pub fn openings_on_wall(&self, wall_id: WallId) -> Vec<OpeningId> {
        self.openings
            .iter()
            .filter(|(_, o)| o.wall == wall_id)
            .map(|(id, _)| id)
            .collect()
    }

    /// Angrenzende Wände eines Knotens (leer für unbekannte Knoten).
    pub fn walls_at_node(&self, node_id: NodeId) -> &[WallId] {
        self.nodes.get(node_id).map(Node::walls).unwrap_or(&[])
    }

    /// Wand zwischen zwei Knoten (richtungsunabhängig).
    pub fn wall_between(&self, a: NodeId, b: NodeId) -> Option<WallId> {
        self.walls_at_node(a).iter().copied().find(|w| {
            self.walls
                .get(*w)
                .is_some_and(|wall| wall.other_end(a) == Some(b))
        })
    }

    /// Findet den nächstgelegenen Knoten zur Weltposition.
    pub fn nearest_node(&self, query: Vec2) -> Option<SpatialMatch> {
        self.spatial_index.nearest(query)
    }

    /// Findet alle Knoten innerhalb eines Radius (nach Distanz sortiert).
    pub fn nodes_within_radius(&self, query: Vec2, radius: f32) -> Vec<SpatialMatch> {
        self.spatial_index.within_radius(query, radius)
    }

    /// Findet alle Knoten innerhalb eines Rechtecks.
    pub fn nodes_within_rect(&self, min: Vec2, max: Vec2) -> Vec<NodeId> {
        self.spatial_index.within_rect(min, max)
    }

    /// Nächstgelegene Wand (Segmentdistanz). Bei Gleichstand gewinnt die
    /// Wand mit der kleineren ID.
    pub fn nearest_wall(&self, query: Vec2) -> Option<WallMatch> {
        self.nearest_wall_where(query, |_| true)
    }

    /// Nächstgelegene sichtbare Wand innerhalb von `radius`.
    pub fn pick_wall(&self, query: Vec2, radius: f32) -> Option<WallMatch> {
        self.nearest_wall_where(query, |id| self.is_wall_visible(id))
            .filter(|hit| hit.distance <= radius)
    }

    fn nearest_wall_where(
        &self,
        query: Vec2,
        mut filter: impl FnMut(WallId) -> bool,
    ) -> Option<WallMatch> {
        let mut best: Option<WallMatch> = None;
        for wall_id in self.walls.ids() {
            if !filter(wall_id) {
                continue;
            }
            let Some((start, end)) = self.wall_endpoints(wall_id) else {
                continue;
            };
            let projection = geometry::closest_point_on_segment(query, start, end);
            let distance = query.distance(projection.point);
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(WallMatch {
                    wall_id,
                    point: projection.point,
                    t: projection.t,
                    distance,
                });
            }
        }
        best
    }

    /// Achsparallele Bounding-Box aller Knoten.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut positions = self.nodes.values().map(|n| n.position);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    // ── Sichtbarkeit ─────────────────────────────────────────────────

    /// Sichtbar, wenn die Ebene der Wand sichtbar ist.
    pub fn is_wall_visible(&self, wall_id: WallId) -> bool {
        self.walls
            .get(wall_id)
            .and_then(|wall| self.layers.get(wall.layer))
            .is_some_and(|layer| layer.visible)
    }

    /// Editierbar, wenn die Ebene der Wand sichtbar und nicht gesperrt ist.
    pub fn is_wall_editable(&self, wall_id: WallId) -> bool {
        self.walls
            .get(wall_id)
            .and_then(|wall| self.layers.get(wall.layer))
            .is_some_and(Layer::is_editable)
    }

    /// Sichtbar, wenn mindestens eine angrenzende Wand sichtbar ist.
    /// Knoten ohne Wände gehören keiner Ebene an und sind immer sichtbar.
    pub fn is_node_visible(&self, node_id: NodeId) -> bool {
        match self.nodes.get(node_id) {
            Some(node) if node.is_orphan() => true,
            Some(node) => node.walls().iter().any(|w| self.is_wall_visible(*w)),
            None => false,
        }
    }

    /// Öffnungen erben die Sichtbarkeit ihrer Wand.
    pub fn is_opening_visible(&self, opening_id: OpeningId) -> bool {
        self.openings
            .get(opening_id)
            .is_some_and(|o| self.is_wall_visible(o.wall))
    }

    /// Sichtbar, wenn mindestens eine noch existierende Umfassungswand
    /// sichtbar ist oder keine mehr existiert.
    pub fn is_room_visible(&self, room_id: RoomId) -> bool {
        let Some(room) = self.rooms.get(room_id) else {
            return false;
        };
        let mut surviving = room
            .walls
            .iter()
            .filter(|w| self.walls.contains(**w))
            .peekable();
        if surviving.peek().is_none() {
            return true;
        }
        surviving.any(|w| self.is_wall_visible(*w))
    }

    /// Sichtbare Knoten.
    pub fn visible_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().filter(|(id, _)| self.is_node_visible(*id))
    }

    /// Sichtbare Wände.
    pub fn visible_walls(&self) -> impl Iterator<Item = (WallId, &Wall)> + '_ {
        self.walls.iter().filter(|(id, _)| self.is_wall_visible(*id))
    }

    /// Sichtbare Öffnungen.
    pub fn visible_openings(&self) -> impl Iterator<Item = (OpeningId, &Opening)> + '_ {
        self.openings
            .iter()
            .filter(|(id, _)| self.is_opening_visible(*id))
    }

    /// Sichtbare Räume.
    pub fn visible_rooms(&self) -> impl Iterator<Item = (RoomId, &Room)> + '_ {
        self.rooms.iter().filter(|(id, _)| self.is_room_visible(*id))
    }

    /// Baut den persistenten Spatial-Index aus den aktuellen Knoten neu auf.
    fn rebuild_spatial_index(&mut self) {
        self.spatial_index = SpatialIndex::from_nodes(&self.nodes);
    }
}

fn index_limit(records: usize, tombstones: usize) -> usize {
    records + tombstones + IMPORT_INDEX_HEADROOM
}

fn check_index<K: ArenaKey + Display>(id: K, limit: usize) -> Result<(), GraphError> {
    if id.raw().index as usize >= limit {
        return Err(GraphError::IdOutOfRange(id.to_string()));
    }
    Ok(())
}

fn reserve_all<K: ArenaKey + Display, T>(
    arena: &mut Arena<K, T>,
    ids: &[K],
) -> Result<(), GraphError> {
    let limit = index_limit(arena.len(), ids.len());
    for &id in ids {
        check_index(id, limit)?;
        if !arena.reserve_tombstone(id) {
            return Err(GraphError::IdCollision(id.to_string()));
        }
    }
    Ok(())
}

fn ensure_finite(position: Vec2) -> Result<(), GraphError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(GraphError::NonFinitePosition(position.x, position.y))
    }
}

fn validate_opening(opening: &Opening) -> Result<(), GraphError> {
    let finite = opening.position.is_finite()
        && opening.width.is_finite()
        && opening.height.is_finite();
    if !finite || opening.width <= 0.0 || opening.height < 0.0 {
        return Err(GraphError::InvalidOpening);
    }
    Ok(())
}
