//! Raum-Werkzeug: Klick in eine geschlossene Fläche legt einen Raum an.

use super::{PlanTool, SelectionChange, ToolContext, ToolEdit, ToolResponse};
use crate::app::state::SelectionItem;
use crate::core::extract_region;
use glam::Vec2;

/// Statusnachricht, wenn an der Klickposition kein Raum gefunden wurde.
pub const NO_ROOM_FOUND: &str = "Kein geschlossener Raum gefunden";

/// Raum-Werkzeug
#[derive(Debug, Default)]
pub struct RoomTool;

impl RoomTool {
    /// Erstellt ein Raum-Werkzeug.
    pub fn new() -> Self {
        Self
    }
}

impl PlanTool for RoomTool {
    fn name(&self) -> &str {
        "Raum"
    }

    fn status_text(&self) -> &str {
        "In eine geschlossene Fläche klicken"
    }

    fn on_pointer_down(&mut self, pos: Vec2, _additive: bool, ctx: &ToolContext) -> ToolResponse {
        let plan = ctx.plan;
        if let Some((id, _)) = plan.visible_rooms().find(|(_, room)| room.contains(pos)) {
            let mut response = ToolResponse::select(SelectionChange::Replace(SelectionItem::Room(id)));
            response.status = Some("Raum bereits vorhanden".to_string());
            return response;
        }

        match extract_region(plan, pos) {
            Ok(draft) => {
                let name = format!("Raum {}", plan.room_count() + 1);
                ToolResponse::edit(ToolEdit::AddRoom { draft, name })
            }
            Err(err) => {
                log::debug!("Raumerkennung fehlgeschlagen: {err}");
                ToolResponse::status(NO_ROOM_FOUND)
            }
        }
    }

    fn on_escape(&mut self) -> ToolResponse {
        ToolResponse::none()
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Camera2D, FloorPlan, WallSpec};
    use crate::shared::EditorOptions;

    fn square(plan: &mut FloorPlan) {
        let corners = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        let ids: Vec<_> = corners
            .iter()
            .map(|c| plan.add_node(*c).expect("Knoten"))
            .collect();
        for i in 0..4 {
            plan.add_wall(ids[i], ids[(i + 1) % 4], WallSpec::new(0.2))
                .expect("Wand");
        }
    }

    #[test]
    fn test_click_inside_square_emits_room() {
        let mut plan = FloorPlan::default();
        square(&mut plan);
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let ctx = ToolContext {
            plan: &plan,
            camera: &camera,
            options: &options,
            active_layer: None,
        };

        let response = RoomTool::new().on_pointer_down(Vec2::new(2.0, 2.0), false, &ctx);
        match response.edits.as_slice() {
            [ToolEdit::AddRoom { draft, name }] => {
                assert_eq!(name, "Raum 1");
                assert_eq!(draft.walls.len(), 4);
                assert!((draft.area - 14.44).abs() < 1e-3);
            }
            other => panic!("Unerwartete Edits: {other:?}"),
        }
    }

    #[test]
    fn test_click_outside_reports_status() {
        let mut plan = FloorPlan::default();
        square(&mut plan);
        let camera = Camera2D::new();
        let options = EditorOptions::default();
        let ctx = ToolContext {
            plan: &plan,
            camera: &camera,
            options: &options,
            active_layer: None,
        };

        let response = RoomTool::new().on_pointer_down(Vec2::new(10.0, 10.0), false, &ctx);
        assert!(response.edits.is_empty());
        assert_eq!(response.status.as_deref(), Some(NO_ROOM_FOUND));
    }
}
