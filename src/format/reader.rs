//! Reader für Grundriss-Dokumente.

use super::{DocumentError, PlanDocument, FORMAT_VERSION};
use crate::core::{FloorPlan, FloorPlanParts, Layer, Opening, Room, Wall};

/// Parst ein JSON-Dokument und prüft die Formatversion.
pub fn parse_plan_document(json: &str) -> Result<PlanDocument, DocumentError> {
    let document: PlanDocument = serde_json::from_str(json)?;
    if document.version > FORMAT_VERSION {
        return Err(DocumentError::UnsupportedVersion {
            found: document.version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(document)
}

/// Baut aus einem Dokument einen Grundriss mit denselben IDs auf.
///
/// Alle Referenzen (Knoten, Wände, Ebenen) und die Adjazenz werden geprüft.
pub fn from_document(document: &PlanDocument) -> Result<FloorPlan, DocumentError> {
    let parts = FloorPlanParts {
        merge_threshold: document.merge_threshold,
        default_layer: document.default_layer,
        layers: document
            .layers
            .iter()
            .map(|l| {
                (
                    l.id,
                    Layer {
                        name: l.name.clone(),
                        visible: l.visible,
                        locked: l.locked,
                    },
                )
            })
            .collect(),
        nodes: document
            .nodes
            .iter()
            .map(|n| (n.id, n.position, n.walls.clone()))
            .collect(),
        walls: document
            .walls
            .iter()
            .map(|w| {
                (
                    w.id,
                    Wall {
                        start: w.start,
                        end: w.end,
                        thickness: w.thickness,
                        kind: w.kind,
                        layer: w.layer,
                        height: w.height,
                    },
                )
            })
            .collect(),
        openings: document
            .openings
            .iter()
            .map(|o| {
                (
                    o.id,
                    Opening {
                        wall: o.wall,
                        position: o.position,
                        width: o.width,
                        height: o.height,
                        kind: o.kind,
                    },
                )
            })
            .collect(),
        rooms: document
            .rooms
            .iter()
            .map(|r| {
                (
                    r.id,
                    Room {
                        name: r.name.clone(),
                        polygon: r.polygon.clone(),
                        walls: r.walls.clone(),
                        area: r.area,
                        perimeter: r.perimeter,
                    },
                )
            })
            .collect(),
        tombstones: document.tombstones.clone(),
    };

    let plan = FloorPlan::from_parts(parts)?;
    log::debug!(
        "Dokument gelesen: {} Knoten, {} Wände, {} Öffnungen, {} Räume",
        plan.node_count(),
        plan.wall_count(),
        plan.opening_count(),
        plan.room_count()
    );
    Ok(plan)
}
