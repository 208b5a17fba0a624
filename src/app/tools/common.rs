//! Gemeinsame Hilfsfunktionen für Werkzeuge.

use super::{ToolAnchor, ToolContext};
use crate::app::state::SelectionItem;
use crate::core::geometry::distance_to_segment;
use crate::core::{FloorPlan, NodeId, SnapResult};
use glam::Vec2;

/// Knoten ist editierbar, wenn alle angrenzenden Wände editierbar sind.
/// Waisen sind immer editierbar.
pub(crate) fn is_node_editable(plan: &FloorPlan, node_id: NodeId) -> bool {
    plan.walls_at_node(node_id)
        .iter()
        .all(|w| plan.is_wall_editable(*w))
}

/// Sucht das Element unter dem Cursor.
///
/// Reihenfolge: Knoten > Öffnung > Wand > Raum. Nur sichtbare Elemente.
pub(crate) fn pick_item(plan: &FloorPlan, pos: Vec2, radius: f32) -> Option<SelectionItem> {
    if let Some(hit) = plan
        .nodes_within_radius(pos, radius)
        .into_iter()
        .find(|m| plan.is_node_visible(m.node_id))
    {
        return Some(SelectionItem::Node(hit.node_id));
    }

    let opening = plan
        .visible_openings()
        .filter_map(|(id, _)| {
            let geo = plan.opening_geometry(id)?;
            let d = distance_to_segment(pos, geo.start, geo.end);
            (d <= radius).then_some((id, d))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1));
    if let Some((id, _)) = opening {
        return Some(SelectionItem::Opening(id));
    }

    if let Some(hit) = plan.pick_wall(pos, radius) {
        return Some(SelectionItem::Wall(hit.wall_id));
    }

    plan.visible_rooms()
        .filter(|(_, room)| room.contains(pos))
        .min_by(|a, b| a.1.area.total_cmp(&b.1.area))
        .map(|(id, _)| SelectionItem::Room(id))
}

/// Leitet aus einem Snap-Ergebnis den Anker für eine Wand ab.
///
/// Eingerastete Knoten werden übernommen. Liegt die Position auf einer
/// editierbaren Wand, wird diese beim Anwenden geteilt; nahe an einem
/// Wandende wird stattdessen der Endknoten verwendet.
pub(crate) fn anchor_from_snap(snap: &SnapResult, ctx: &ToolContext) -> ToolAnchor {
    let plan = ctx.plan;
    if let Some(node_id) = snap.node() {
        if let Some(node) = plan.node(node_id) {
            return ToolAnchor::ExistingNode(node_id, node.position);
        }
    }

    let tolerance = plan.merge_threshold().max(ctx.camera.px_to_world(1.0));
    if let Some(hit) = plan.pick_wall(snap.position, tolerance) {
        if plan.is_wall_editable(hit.wall_id) {
            if let (Some(wall), Some(geo)) = (plan.wall(hit.wall_id), plan.wall_geometry(hit.wall_id))
            {
                let along = hit.t * geo.length;
                if along <= tolerance {
                    return ToolAnchor::ExistingNode(wall.start, geo.start);
                }
                if geo.length - along <= tolerance {
                    return ToolAnchor::ExistingNode(wall.end, geo.end);
                }
                return ToolAnchor::OnWall(hit.wall_id, hit.point);
            }
        }
    }

    ToolAnchor::NewPosition(snap.position)
}
