//! Wand-Werkzeug: zeichnet Wände als fortlaufende Kette.
//!
//! Erster Klick setzt den Anker, jeder weitere Klick erzeugt eine Wand vom
//! vorherigen Endpunkt. Doppelklick beendet die Kette, Escape verwirft den
//! offenen Anker. Der Winkel-Versatz für den Orthogonal-Snap ist Zustand
//! dieser Instanz.

use super::common::anchor_from_snap;
use super::{
    EditOutcome, PlanTool, ToolAnchor, ToolContext, ToolEdit, ToolPreview, ToolResponse,
};
use crate::core::snapping::{clamp_angle_offset, ANGLE_OFFSET_STEP_DEG};
use crate::core::{FloorPlan, SnapContext, SnapResult};
use crate::shared::SnapMode;
use glam::Vec2;

/// Wand-Werkzeug
#[derive(Debug, Default)]
pub struct WallTool {
    chain_start: Option<ToolAnchor>,
    previous_angle: Option<f32>,
    angle_offset_deg: f32,
    cursor: Option<SnapResult>,
}

impl WallTool {
    /// Erstellt ein Wand-Werkzeug ohne offene Kette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aktueller Winkel-Versatz in Grad.
    pub fn angle_offset_deg(&self) -> f32 {
        self.angle_offset_deg
    }

    /// Anker, von dem aus die nächste Wand gezeichnet wird.
    pub fn chain_start(&self) -> Option<ToolAnchor> {
        self.chain_start
    }

    fn snap_context(&self) -> SnapContext {
        SnapContext {
            anchor: self.chain_start.map(|a| a.position()),
            previous_wall_angle: self.previous_angle,
            angle_offset_deg: self.angle_offset_deg,
            exclude_nodes: Vec::new(),
        }
    }

    fn finish_chain(&mut self) {
        self.chain_start = None;
        self.previous_angle = None;
    }
}

fn same_anchor(a: &ToolAnchor, b: &ToolAnchor, tolerance: f32) -> bool {
    match (a, b) {
        (ToolAnchor::ExistingNode(x, _), ToolAnchor::ExistingNode(y, _)) if x == y => true,
        _ => a.position().distance(b.position()) <= tolerance,
    }
}

impl PlanTool for WallTool {
    fn name(&self) -> &str {
        "Wand"
    }

    fn status_text(&self) -> &str {
        if self.chain_start.is_some() {
            "Nächsten Punkt setzen (Doppelklick beendet)"
        } else {
            "Startpunkt der Wand setzen"
        }
    }

    fn on_pointer_down(&mut self, pos: Vec2, _additive: bool, ctx: &ToolContext) -> ToolResponse {
        if let Some(layer) = ctx.active_layer.and_then(|l| ctx.plan.layer(l)) {
            if !layer.is_editable() {
                return ToolResponse::status("Aktive Ebene ist gesperrt");
            }
        }

        let snapped = ctx.snap(pos, SnapMode::WallDrawing, &self.snap_context());
        self.cursor = Some(snapped);
        let anchor = anchor_from_snap(&snapped, ctx);

        let Some(start) = self.chain_start else {
            self.chain_start = Some(anchor);
            return ToolResponse::none();
        };

        if same_anchor(&start, &anchor, ctx.plan.merge_threshold()) {
            log::debug!("Wand-Werkzeug: Klick auf den Anker ignoriert");
            return ToolResponse::none();
        }

        let delta = anchor.position() - start.position();
        self.previous_angle = Some(delta.y.atan2(delta.x));
        self.chain_start = Some(anchor);
        ToolResponse::edit(ToolEdit::AddWall {
            start,
            end: anchor,
            spec: ctx.wall_spec(),
        })
    }

    fn on_pointer_moved(&mut self, pos: Vec2, ctx: &ToolContext) -> ToolResponse {
        self.cursor = Some(ctx.snap(pos, SnapMode::WallDrawing, &self.snap_context()));
        ToolResponse::none()
    }

    fn on_double_click(&mut self, _pos: Vec2, _ctx: &ToolContext) -> ToolResponse {
        if self.chain_start.is_some() {
            self.finish_chain();
            log::debug!("Wandzug beendet");
        }
        ToolResponse::none()
    }

    fn on_escape(&mut self) -> ToolResponse {
        self.finish_chain();
        ToolResponse::none()
    }

    fn on_applied(&mut self, outcome: &EditOutcome, plan: &FloorPlan) {
        // Weiterzeichnen vom tatsächlich erzeugten Endknoten
        let Some(wall) = outcome.walls.last().and_then(|id| plan.wall(*id)) else {
            return;
        };
        if let Some(node) = plan.node(wall.end) {
            if self.chain_start.is_some() {
                self.chain_start = Some(ToolAnchor::ExistingNode(wall.end, node.position));
            }
        }
    }

    fn preview(&self) -> ToolPreview {
        let mut preview = ToolPreview::default();
        if let Some(cursor) = self.cursor {
            preview.points.push(cursor.position);
            preview.snap = cursor.kind.map(|k| (cursor.position, k));
            if let Some(start) = self.chain_start {
                preview.segments.push((start.position(), cursor.position));
            }
        }
        preview
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn has_pending_input(&self) -> bool {
        self.chain_start.is_some()
    }

    fn nudge_angle(&mut self, steps: i32) -> bool {
        self.angle_offset_deg =
            clamp_angle_offset(self.angle_offset_deg + steps as f32 * ANGLE_OFFSET_STEP_DEG);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Camera2D, WallSpec};
    use crate::shared::EditorOptions;

    fn ctx<'a>(plan: &'a FloorPlan, camera: &'a Camera2D, options: &'a EditorOptions) -> ToolContext<'a> {
        ToolContext {
            plan,
            camera,
            options,
            active_layer: None,
        }
    }

    #[test]
    fn test_first_click_creates_nothing() {
        let plan = FloorPlan::default();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let mut tool = WallTool::new();

        let response = tool.on_pointer_down(Vec2::new(0.0, 0.0), false, &ctx(&plan, &camera, &options));
        assert!(response.edits.is_empty());
        assert!(tool.has_pending_input());
    }

    #[test]
    fn test_second_click_emits_wall_with_orthogonal_snap() {
        let plan = FloorPlan::default();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let mut tool = WallTool::new();
        let c = ctx(&plan, &camera, &options);

        tool.on_pointer_down(Vec2::new(0.0, 0.0), false, &c);
        let response = tool.on_pointer_down(Vec2::new(3.0, 0.4), false, &c);

        match response.edits.as_slice() {
            [ToolEdit::AddWall { start, end, spec }] => {
                assert_eq!(start.position(), Vec2::ZERO);
                assert!((end.position() - Vec2::new(3.0, 0.0)).length() < 1e-4);
                assert!((spec.thickness - 0.2).abs() < 1e-6);
            }
            other => panic!("Unerwartete Edits: {other:?}"),
        }
    }

    #[test]
    fn test_click_on_wall_anchors_split() {
        let mut plan = FloorPlan::default();
        let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
        let b = plan.add_node(Vec2::new(4.0, 0.0)).expect("Knoten");
        let wall = plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let mut tool = WallTool::new();

        tool.on_pointer_down(Vec2::new(2.0, 0.0), false, &ctx(&plan, &camera, &options));
        assert!(matches!(
            tool.chain_start(),
            Some(ToolAnchor::OnWall(id, _)) if id == wall
        ));
    }

    #[test]
    fn test_double_click_finishes_chain() {
        let plan = FloorPlan::default();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let mut tool = WallTool::new();
        let c = ctx(&plan, &camera, &options);

        tool.on_pointer_down(Vec2::new(0.0, 0.0), false, &c);
        tool.on_double_click(Vec2::new(0.0, 0.0), &c);
        assert!(!tool.has_pending_input());
    }

    #[test]
    fn test_angle_nudge_is_clamped_instance_state() {
        let mut tool = WallTool::new();
        let other = WallTool::new();

        for _ in 0..5 {
            tool.nudge_angle(1);
        }
        assert!((tool.angle_offset_deg() - 45.0).abs() < 1e-6);
        tool.nudge_angle(-1);
        assert!((tool.angle_offset_deg() - 30.0).abs() < 1e-6);
        assert_eq!(other.angle_offset_deg(), 0.0);
    }

    #[test]
    fn test_click_on_anchor_is_ignored() {
        let plan = FloorPlan::default();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let mut tool = WallTool::new();
        let c = ctx(&plan, &camera, &options);

        tool.on_pointer_down(Vec2::new(1.0, 1.0), false, &c);
        let response = tool.on_pointer_down(Vec2::new(1.0, 1.0), false, &c);
        assert!(response.edits.is_empty());
        assert!(tool.has_pending_input());
    }
}
