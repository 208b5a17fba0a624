//! Writer für Grundriss-Dokumente.

use super::{
    LayerRecord, NodeRecord, OpeningRecord, PlanDocument, RoomRecord, WallRecord, FORMAT_VERSION,
};
use crate::core::{Camera2D, FloorPlan};
use crate::shared::LinearUnit;
use anyhow::Result;

/// Überführt einen Grundriss in ein serialisierbares Dokument.
///
/// Reihenfolge der Arrays folgt der Slot-Reihenfolge der Arenen,
/// Adjazenzlisten bleiben in gespeicherter Reihenfolge.
pub fn to_document(plan: &FloorPlan, unit: LinearUnit, camera: &Camera2D) -> PlanDocument {
    PlanDocument {
        version: FORMAT_VERSION,
        unit,
        merge_threshold: plan.merge_threshold(),
        default_layer: plan.default_layer(),
        layers: plan
            .layers()
            .map(|(id, layer)| LayerRecord {
                id,
                name: layer.name.clone(),
                visible: layer.visible,
                locked: layer.locked,
            })
            .collect(),
        nodes: plan
            .nodes()
            .map(|(id, node)| NodeRecord {
                id,
                position: node.position,
                walls: node.walls().to_vec(),
            })
            .collect(),
        walls: plan
            .walls()
            .map(|(id, wall)| WallRecord {
                id,
                start: wall.start,
                end: wall.end,
                thickness: wall.thickness,
                kind: wall.kind,
                layer: wall.layer,
                height: wall.height,
            })
            .collect(),
        openings: plan
            .openings()
            .map(|(id, opening)| OpeningRecord {
                id,
                wall: opening.wall,
                position: opening.position,
                width: opening.width,
                height: opening.height,
                kind: opening.kind,
            })
            .collect(),
        rooms: plan
            .rooms()
            .map(|(id, room)| RoomRecord {
                id,
                name: room.name.clone(),
                polygon: room.polygon.clone(),
                walls: room.walls.clone(),
                area: room.area,
                perimeter: room.perimeter,
            })
            .collect(),
        tombstones: plan.tombstones(),
        camera: *camera,
    }
}

/// Schreibt ein Dokument als formatiertes JSON.
pub fn write_plan_document(document: &PlanDocument) -> Result<String> {
    let json = serde_json::to_string_pretty(document)?;
    Ok(json)
}
