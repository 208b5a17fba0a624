//! Tür- und Fenster-Werkzeug: Klick auf eine Wand setzt eine Öffnung.

use super::{PlanTool, ToolContext, ToolEdit, ToolPreview, ToolResponse};
use crate::core::{clamp_opening_position, Opening, SnapContext, SwingSide, WallId};
use crate::shared::SnapMode;
use glam::Vec2;

/// Welche Öffnungsart das Werkzeug setzt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningToolKind {
    /// Tür
    Door,
    /// Fenster
    Window,
}

#[derive(Debug, Clone, Copy)]
struct Hover {
    wall: WallId,
    start: Vec2,
    end: Vec2,
}

/// Tür-/Fenster-Werkzeug
#[derive(Debug)]
pub struct OpeningTool {
    kind: OpeningToolKind,
    hover: Option<Hover>,
}

impl OpeningTool {
    /// Werkzeug für Türen.
    pub fn door() -> Self {
        Self {
            kind: OpeningToolKind::Door,
            hover: None,
        }
    }

    /// Werkzeug für Fenster.
    pub fn window() -> Self {
        Self {
            kind: OpeningToolKind::Window,
            hover: None,
        }
    }

    /// Art der gesetzten Öffnung.
    pub fn kind(&self) -> OpeningToolKind {
        self.kind
    }

    /// Berechnet die Öffnung für eine Cursor-Position.
    ///
    /// `Err` enthält die Statusnachricht für die UI.
    fn place(&self, pos: Vec2, ctx: &ToolContext) -> Result<Opening, &'static str> {
        let snapped = ctx.snap(pos, SnapMode::OpeningPlacement, &SnapContext::default());
        let hit = ctx
            .plan
            .pick_wall(snapped.position, ctx.pick_radius())
            .ok_or("Keine Wand unter dem Cursor")?;
        if !ctx.plan.is_wall_editable(hit.wall_id) {
            return Err("Wand liegt auf gesperrter Ebene");
        }
        let geo = ctx
            .plan
            .wall_geometry(hit.wall_id)
            .ok_or("Keine Wand unter dem Cursor")?;

        let opening = match self.kind {
            OpeningToolKind::Door => {
                let (width, height) = ctx.options.door_size_world();
                if width >= geo.length {
                    return Err("Wand zu kurz für die Tür");
                }
                let t = clamp_opening_position(hit.t, width, geo.length);
                // Anschlagseite: Seite der Wand, auf der geklickt wurde
                let side = if geo.direction().perp_dot(pos - geo.start) >= 0.0 {
                    SwingSide::Left
                } else {
                    SwingSide::Right
                };
                Opening::door(hit.wall_id, t, width, height, side)
            }
            OpeningToolKind::Window => {
                let (width, height, sill) = ctx.options.window_size_world();
                if width >= geo.length {
                    return Err("Wand zu kurz für das Fenster");
                }
                let t = clamp_opening_position(hit.t, width, geo.length);
                Opening::window(hit.wall_id, t, width, height, sill)
            }
        };
        Ok(opening)
    }
}

impl PlanTool for OpeningTool {
    fn name(&self) -> &str {
        match self.kind {
            OpeningToolKind::Door => "Tür",
            OpeningToolKind::Window => "Fenster",
        }
    }

    fn status_text(&self) -> &str {
        "Wand anklicken"
    }

    fn on_pointer_down(&mut self, pos: Vec2, _additive: bool, ctx: &ToolContext) -> ToolResponse {
        match self.place(pos, ctx) {
            Ok(opening) => ToolResponse::edit(ToolEdit::AddOpening(opening)),
            Err(message) => ToolResponse::status(message),
        }
    }

    fn on_pointer_moved(&mut self, pos: Vec2, ctx: &ToolContext) -> ToolResponse {
        self.hover = self.place(pos, ctx).ok().and_then(|opening| {
            let geo = ctx.plan.wall_geometry(opening.wall)?;
            let center = geo.point_at(opening.position);
            let half = geo.direction() * (opening.width * 0.5);
            Some(Hover {
                wall: opening.wall,
                start: center - half,
                end: center + half,
            })
        });
        ToolResponse::none()
    }

    fn on_escape(&mut self) -> ToolResponse {
        self.hover = None;
        ToolResponse::none()
    }

    fn preview(&self) -> ToolPreview {
        match self.hover {
            Some(h) => {
                log::trace!("Öffnungs-Vorschau auf Wand {}", h.wall);
                ToolPreview {
                    segments: vec![(h.start, h.end)],
                    ..ToolPreview::default()
                }
            }
            None => ToolPreview::default(),
        }
    }

    fn reset(&mut self) {
        self.hover = None;
    }
}
