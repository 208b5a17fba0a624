//! Auswahl-Werkzeug: Klick selektiert, Drag verschiebt Knoten als eine Transaktion.

use super::common::{is_node_editable, pick_item};
use super::{
    PlanTool, SelectionChange, ToolContext, ToolEdit, ToolPreview, ToolResponse, TransactionStep,
};
use crate::app::state::SelectionItem;
use crate::core::{NodeId, SnapContext, SnapKind, SnapSource};
use crate::shared::SnapMode;
use glam::Vec2;

#[derive(Debug, Clone, Copy)]
struct NodeDrag {
    node: NodeId,
    /// Abstand Knoten → Greifpunkt, damit der Knoten beim Greifen nicht springt
    grab_offset: Vec2,
    snap: Option<(Vec2, SnapKind)>,
    /// Knoten, auf den eingerastet wurde; beim Loslassen wird zusammengeführt
    merge_target: Option<NodeId>,
}

/// Auswahl-Werkzeug
#[derive(Debug, Default)]
pub struct SelectTool {
    drag: Option<NodeDrag>,
}

impl SelectTool {
    /// Erstellt ein Auswahl-Werkzeug ohne laufende Geste.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wird gerade ein Knoten gezogen?
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

impl PlanTool for SelectTool {
    fn name(&self) -> &str {
        "Auswahl"
    }

    fn status_text(&self) -> &str {
        if self.drag.is_some() {
            "Knoten verschieben (Esc bricht ab)"
        } else {
            "Element anklicken oder Knoten ziehen"
        }
    }

    fn on_pointer_down(&mut self, pos: Vec2, additive: bool, ctx: &ToolContext) -> ToolResponse {
        let Some(item) = pick_item(ctx.plan, pos, ctx.pick_radius()) else {
            if additive {
                return ToolResponse::none();
            }
            return ToolResponse::select(SelectionChange::Clear);
        };

        if additive {
            return ToolResponse::select(SelectionChange::Toggle(item));
        }

        let mut response = ToolResponse::select(SelectionChange::Replace(item));
        if let SelectionItem::Node(node) = item {
            if !is_node_editable(ctx.plan, node) {
                response.status = Some("Knoten liegt auf gesperrter Ebene".to_string());
                return response;
            }
            if let Some(n) = ctx.plan.node(node) {
                self.drag = Some(NodeDrag {
                    node,
                    grab_offset: n.position - pos,
                    snap: None,
                    merge_target: None,
                });
                response.transaction = Some(TransactionStep::Begin);
            }
        }
        response
    }

    fn on_pointer_moved(&mut self, pos: Vec2, ctx: &ToolContext) -> ToolResponse {
        let Some(drag) = self.drag.as_mut() else {
            return ToolResponse::none();
        };
        let context = SnapContext::excluding(vec![drag.node]);
        let snapped = ctx.snap(pos + drag.grab_offset, SnapMode::NodeDrag, &context);
        drag.snap = snapped.kind.map(|k| (snapped.position, k));
        drag.merge_target = match (snapped.kind, snapped.source) {
            (Some(SnapKind::Node), Some(SnapSource::Node(target))) => Some(target),
            _ => None,
        };
        // Auf einem Knoten bleibt der gezogene Knoten stehen, bis losgelassen wird
        if drag.merge_target.is_some() {
            return ToolResponse::none();
        }
        ToolResponse::edit(ToolEdit::MoveNode {
            node: drag.node,
            position: snapped.position,
        })
    }

    fn on_pointer_up(&mut self, _pos: Vec2, _ctx: &ToolContext) -> ToolResponse {
        let Some(drag) = self.drag.take() else {
            return ToolResponse::none();
        };
        let mut response = ToolResponse {
            transaction: Some(TransactionStep::Commit),
            ..ToolResponse::default()
        };
        if let Some(target) = drag.merge_target {
            response.selection = Some(SelectionChange::Replace(SelectionItem::Node(target)));
            response.edits.push(ToolEdit::MergeNodes {
                source: drag.node,
                target,
            });
        }
        response
    }

    fn on_escape(&mut self) -> ToolResponse {
        match self.drag.take() {
            Some(_) => ToolResponse {
                transaction: Some(TransactionStep::Cancel),
                ..ToolResponse::default()
            },
            None => ToolResponse::select(SelectionChange::Clear),
        }
    }

    fn preview(&self) -> ToolPreview {
        ToolPreview {
            snap: self.drag.and_then(|d| d.snap),
            ..ToolPreview::default()
        }
    }

    fn reset(&mut self) {
        self.drag = None;
    }

    fn has_pending_input(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Camera2D, FloorPlan, WallSpec};
    use crate::shared::EditorOptions;

    fn plan_with_wall() -> (FloorPlan, NodeId) {
        let mut plan = FloorPlan::default();
        let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
        let b = plan.add_node(Vec2::new(4.0, 0.0)).expect("Knoten");
        plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");
        (plan, a)
    }

    #[test]
    fn test_press_on_node_selects_and_begins_transaction() {
        let (plan, a) = plan_with_wall();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let ctx = ToolContext {
            plan: &plan,
            camera: &camera,
            options: &options,
            active_layer: None,
        };
        let mut tool = SelectTool::new();

        let response = tool.on_pointer_down(Vec2::new(0.05, 0.0), false, &ctx);
        assert_eq!(
            response.selection,
            Some(SelectionChange::Replace(SelectionItem::Node(a)))
        );
        assert_eq!(response.transaction, Some(TransactionStep::Begin));
        assert!(tool.is_dragging());

        let moved = tool.on_pointer_moved(Vec2::new(1.05, 2.0), &ctx);
        assert!(matches!(
            moved.edits.as_slice(),
            [ToolEdit::MoveNode { node, .. }] if *node == a
        ));

        let up = tool.on_pointer_up(Vec2::new(1.0, 2.0), &ctx);
        assert_eq!(up.transaction, Some(TransactionStep::Commit));
        assert!(!tool.is_dragging());
    }

    #[test]
    fn test_escape_during_drag_cancels() {
        let (plan, _) = plan_with_wall();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let ctx = ToolContext {
            plan: &plan,
            camera: &camera,
            options: &options,
            active_layer: None,
        };
        let mut tool = SelectTool::new();

        tool.on_pointer_down(Vec2::new(4.0, 0.0), false, &ctx);
        let response = tool.on_escape();
        assert_eq!(response.transaction, Some(TransactionStep::Cancel));

        let idle = tool.on_escape();
        assert_eq!(idle.selection, Some(SelectionChange::Clear));
    }

    #[test]
    fn test_click_on_empty_space_clears_selection() {
        let (plan, _) = plan_with_wall();
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let ctx = ToolContext {
            plan: &plan,
            camera: &camera,
            options: &options,
            active_layer: None,
        };
        let mut tool = SelectTool::new();

        let response = tool.on_pointer_down(Vec2::new(2.0, 5.0), false, &ctx);
        assert_eq!(response.selection, Some(SelectionChange::Clear));
        assert!(response.transaction.is_none());
    }
}
