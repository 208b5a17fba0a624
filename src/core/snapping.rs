//! Snap-Resolver: rastet eine rohe Cursor-Position auf Geometrie-Merkmale ein.
//!
//! Die Strategien werden in fester Priorität geprüft; die erste Strategie,
//! deren nächster Kandidat innerhalb ihrer eigenen Schwelle liegt, gewinnt:
//!
//! 1. Knoten
//! 2. Wandmittelpunkt
//! 3. Lotfußpunkt auf einer Wand
//! 4. Wandverlängerung
//! 5. Orthogonal (nur mit Anker)
//! 6. Raster
//!
//! Schwellen werden in Pixeln angegeben und über die Kamera in Welteinheiten
//! umgerechnet. Der Resolver liest nur und ist deterministisch.

use super::geometry;
use super::{Camera2D, FloorPlan, NodeId, WallId};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Schwelle für `|cos|` zwischen Wandrichtung und Lot (≈ 84°..96°).
const PERPENDICULAR_COS_LIMIT: f32 = 0.1;
/// Maximale Verlängerung über die Wandenden hinaus (Welteinheiten).
const EXTENSION_REACH: f32 = 1000.0;
/// Raster für den Winkel-Versatz des Orthogonal-Snaps (Grad).
pub const ANGLE_OFFSET_STEP_DEG: f32 = 15.0;
/// Maximaler Winkel-Versatz (Grad).
pub const ANGLE_OFFSET_LIMIT_DEG: f32 = 45.0;

/// Welche Snap-Strategien aktiv sind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapSettings {
    /// Auf Rasterschnittpunkte
    pub to_grid: bool,
    /// Auf bestehende Knoten
    pub to_nodes: bool,
    /// Auf Wandmittelpunkte
    pub to_midpoints: bool,
    /// Auf Lotfußpunkte
    pub to_perpendicular: bool,
    /// Auf Wandverlängerungen
    pub to_extension: bool,
    /// Orthogonal zum Anker bzw. zur vorherigen Wand
    pub to_orthogonal: bool,
    /// Rasterweite in Welteinheiten
    pub grid_spacing: f32,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            to_grid: true,
            to_nodes: true,
            to_midpoints: true,
            to_perpendicular: true,
            to_extension: true,
            to_orthogonal: true,
            grid_spacing: 0.5,
        }
    }
}

impl SnapSettings {
    /// Alle Strategien deaktiviert (Rohposition wird durchgereicht).
    pub fn disabled() -> Self {
        Self {
            to_grid: false,
            to_nodes: false,
            to_midpoints: false,
            to_perpendicular: false,
            to_extension: false,
            to_orthogonal: false,
            grid_spacing: 0.5,
        }
    }
}

/// Fangschwellen pro Strategie (Pixel bzw. Grad)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapThresholds {
    /// Knoten-Fangradius (px)
    pub node_px: f32,
    /// Mittelpunkt-Fangradius (px)
    pub midpoint_px: f32,
    /// Lotfußpunkt-Fangradius (px)
    pub perpendicular_px: f32,
    /// Verlängerungs-Fangradius (px)
    pub extension_px: f32,
    /// Raster-Fangradius (px)
    pub grid_px: f32,
    /// Maximale Winkelabweichung für den Orthogonal-Snap (Grad)
    pub orthogonal_deg: f32,
}

impl Default for SnapThresholds {
    fn default() -> Self {
        Self {
            node_px: 12.0,
            midpoint_px: 10.0,
            perpendicular_px: 8.0,
            extension_px: 8.0,
            grid_px: 8.0,
            orthogonal_deg: 45.0,
        }
    }
}

/// Zustand der laufenden Geste, der das Snapping beeinflusst
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapContext {
    /// Anker (z.B. Startpunkt der gerade gezeichneten Wand)
    pub anchor: Option<Vec2>,
    /// Winkel der zuletzt gezeichneten Wand (Radiant)
    pub previous_wall_angle: Option<f32>,
    /// Winkel-Versatz für den Orthogonal-Snap (Grad, auf ±45° begrenzt)
    pub angle_offset_deg: f32,
    /// Knoten, die ignoriert werden (z.B. der gerade gezogene Knoten)
    pub exclude_nodes: Vec<NodeId>,
}

impl SnapContext {
    /// Kontext mit Anker.
    pub fn anchored(anchor: Vec2) -> Self {
        Self {
            anchor: Some(anchor),
            ..Self::default()
        }
    }

    /// Kontext, der die angegebenen Knoten ignoriert.
    pub fn excluding(nodes: Vec<NodeId>) -> Self {
        Self {
            exclude_nodes: nodes,
            ..Self::default()
        }
    }
}

/// Art des gefundenen Snap-Ziels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapKind {
    /// Bestehender Knoten
    Node,
    /// Wandmittelpunkt
    Midpoint,
    /// Lotfußpunkt
    Perpendicular,
    /// Wandverlängerung
    Extension,
    /// Orthogonale Richtung
    Orthogonal,
    /// Rasterpunkt
    Grid,
}

/// Geometrie-Element, auf das eingerastet wurde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapSource {
    /// Knoten
    Node(NodeId),
    /// Wand
    Wall(WallId),
}

/// Ergebnis des Snap-Resolvers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Eingerastete (oder rohe) Position
    pub position: Vec2,
    /// Gewonnene Strategie, `None` = Rohposition
    pub kind: Option<SnapKind>,
    /// Quelle (Knoten oder Wand), falls vorhanden
    pub source: Option<SnapSource>,
}

impl SnapResult {
    /// Rohposition ohne Snap.
    pub fn raw(position: Vec2) -> Self {
        Self {
            position,
            kind: None,
            source: None,
        }
    }

    /// Eingerasteter Knoten, falls auf einen Knoten gesnappt wurde.
    pub fn node(&self) -> Option<NodeId> {
        match self.source {
            Some(SnapSource::Node(id)) => Some(id),
            _ => None,
        }
    }

    /// Wand, falls auf ein Wandmerkmal gesnappt wurde.
    pub fn wall(&self) -> Option<WallId> {
        match self.source {
            Some(SnapSource::Wall(id)) => Some(id),
            _ => None,
        }
    }
}

/// Begrenzt einen Winkel-Versatz auf ±45°.
pub fn clamp_angle_offset(offset_deg: f32) -> f32 {
    offset_deg.clamp(-ANGLE_OFFSET_LIMIT_DEG, ANGLE_OFFSET_LIMIT_DEG)
}

#[derive(Clone, Copy)]
struct Candidate {
    position: Vec2,
    distance: f32,
    source: Option<SnapSource>,
}

/// Löst die Snap-Position für eine rohe Cursor-Position auf.
pub fn resolve_snap(
    raw: Vec2,
    plan: &FloorPlan,
    camera: &Camera2D,
    settings: &SnapSettings,
    thresholds: &SnapThresholds,
    context: &SnapContext,
) -> SnapResult {
    let hit = |kind: SnapKind, c: Candidate| SnapResult {
        position: c.position,
        kind: Some(kind),
        source: c.source,
    };

    if settings.to_nodes {
        let radius = camera.px_to_world(thresholds.node_px);
        if let Some(c) = snap_node(raw, plan, radius, context) {
            return hit(SnapKind::Node, c);
        }
    }
    if settings.to_midpoints {
        let radius = camera.px_to_world(thresholds.midpoint_px);
        if let Some(c) = snap_midpoint(raw, plan, radius, context) {
            return hit(SnapKind::Midpoint, c);
        }
    }
    if settings.to_perpendicular {
        let radius = camera.px_to_world(thresholds.perpendicular_px);
        if let Some(c) = snap_perpendicular(raw, plan, radius, context) {
            return hit(SnapKind::Perpendicular, c);
        }
    }
    if settings.to_extension {
        let radius = camera.px_to_world(thresholds.extension_px);
        if let Some(c) = snap_extension(raw, plan, radius, context) {
            return hit(SnapKind::Extension, c);
        }
    }
    if settings.to_orthogonal {
        if let Some(c) = snap_orthogonal(raw, thresholds.orthogonal_deg, context) {
            return hit(SnapKind::Orthogonal, c);
        }
    }
    if settings.to_grid {
        let radius = camera.px_to_world(thresholds.grid_px);
        if let Some(c) = snap_grid(raw, settings.grid_spacing, radius) {
            return hit(SnapKind::Grid, c);
        }
    }

    SnapResult::raw(raw)
}

/// Wände, die für wandbasierte Strategien in Frage kommen: sichtbar und
/// nicht an einem ausgeschlossenen Knoten hängend.
fn candidate_walls<'a>(
    plan: &'a FloorPlan,
    context: &'a SnapContext,
) -> impl Iterator<Item = (WallId, Vec2, Vec2)> + 'a {
    plan.visible_walls()
        .filter(|(_, wall)| {
            !context
                .exclude_nodes
                .iter()
                .any(|excluded| wall.touches(*excluded))
        })
        .filter_map(|(id, _)| plan.wall_endpoints(id).map(|(a, b)| (id, a, b)))
}

fn closest(candidates: impl Iterator<Item = Candidate>, radius: f32) -> Option<Candidate> {
    candidates
        .filter(|c| c.distance <= radius)
        .fold(None, |best: Option<Candidate>, c| match best {
            Some(b) if b.distance <= c.distance => Some(b),
            _ => Some(c),
        })
}

fn snap_node(raw: Vec2, plan: &FloorPlan, radius: f32, context: &SnapContext) -> Option<Candidate> {
    plan.nodes_within_radius(raw, radius)
        .into_iter()
        .filter(|m| !context.exclude_nodes.contains(&m.node_id))
        .filter(|m| plan.is_node_visible(m.node_id))
        .find_map(|m| {
            plan.node(m.node_id).map(|node| Candidate {
                position: node.position,
                distance: m.distance,
                source: Some(SnapSource::Node(m.node_id)),
            })
        })
}

fn snap_midpoint(
    raw: Vec2,
    plan: &FloorPlan,
    radius: f32,
    context: &SnapContext,
) -> Option<Candidate> {
    let candidates = candidate_walls(plan, context).map(|(id, a, b)| {
        let mid = geometry::midpoint(a, b);
        Candidate {
            position: mid,
            distance: raw.distance(mid),
            source: Some(SnapSource::Wall(id)),
        }
    });
    closest(candidates, radius)
}

fn snap_perpendicular(
    raw: Vec2,
    plan: &FloorPlan,
    radius: f32,
    context: &SnapContext,
) -> Option<Candidate> {
    let candidates = candidate_walls(plan, context).filter_map(|(id, a, b)| {
        let dir = (b - a).normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        let cursor_proj = geometry::project_onto_line(raw, a, b);
        if raw.distance(cursor_proj.point) > radius {
            return None;
        }

        let foot = match context.anchor {
            Some(anchor) => {
                let approach = cursor_proj.point - anchor;
                if approach.length() <= geometry::EPSILON {
                    return None;
                }
                let cos = dir.dot(approach.normalize()).abs();
                if cos >= PERPENDICULAR_COS_LIMIT {
                    return None;
                }
                geometry::project_onto_line(anchor, a, b)
            }
            None => cursor_proj,
        };

        // Der Lotfußpunkt muss auf der Wand selbst liegen
        if !(0.0..=1.0).contains(&foot.t) {
            return None;
        }
        Some(Candidate {
            position: foot.point,
            distance: raw.distance(foot.point),
            source: Some(SnapSource::Wall(id)),
        })
    });
    closest(candidates, radius)
}

fn snap_extension(
    raw: Vec2,
    plan: &FloorPlan,
    radius: f32,
    context: &SnapContext,
) -> Option<Candidate> {
    let candidates = candidate_walls(plan, context).filter_map(|(id, a, b)| {
        let length = a.distance(b);
        if length <= geometry::EPSILON {
            return None;
        }
        let proj = geometry::project_onto_line(raw, a, b);
        // Nur jenseits der Wandenden, innerhalb der Reichweite
        let reach = EXTENSION_REACH / length;
        if (0.0..=1.0).contains(&proj.t) || proj.t < -reach || proj.t > 1.0 + reach {
            return None;
        }
        Some(Candidate {
            position: proj.point,
            distance: raw.distance(proj.point),
            source: Some(SnapSource::Wall(id)),
        })
    });
    closest(candidates, radius)
}

fn snap_orthogonal(raw: Vec2, max_deviation_deg: f32, context: &SnapContext) -> Option<Candidate> {
    let anchor = context.anchor?;
    let delta = raw - anchor;
    if delta.length() <= geometry::EPSILON {
        return None;
    }
    let cursor_angle = delta.y.atan2(delta.x);

    use std::f32::consts::{FRAC_PI_2, PI};
    let base = context.previous_wall_angle.unwrap_or(0.0);
    let candidates = [base, base + FRAC_PI_2, base - FRAC_PI_2, base + PI];

    let (best_angle, deviation) = candidates
        .iter()
        .map(|angle| (*angle, geometry::angle_difference(cursor_angle, *angle)))
        .fold(None, |best: Option<(f32, f32)>, c| match best {
            Some(b) if b.1 <= c.1 => Some(b),
            _ => Some(c),
        })?;
    if deviation > max_deviation_deg.to_radians() + geometry::EPSILON {
        return None;
    }

    let angle = best_angle + clamp_angle_offset(context.angle_offset_deg).to_radians();
    let dir = Vec2::new(angle.cos(), angle.sin());
    let position = anchor + dir * delta.dot(dir);
    Some(Candidate {
        position,
        distance: raw.distance(position),
        source: None,
    })
}

fn snap_grid(raw: Vec2, spacing: f32, radius: f32) -> Option<Candidate> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return None;
    }
    let position = (raw / spacing).round() * spacing;
    let distance = raw.distance(position);
    (distance <= radius).then_some(Candidate {
        position,
        distance,
        source: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WallSpec;
    use approx::assert_relative_eq;

    /// Zoom 50 → 1 px = 0.02 Welteinheiten
    fn camera() -> Camera2D {
        Camera2D::with(Vec2::ZERO, 50.0)
    }

    fn plan_with_wall(a: Vec2, b: Vec2) -> (FloorPlan, NodeId, NodeId, WallId) {
        let mut plan = FloorPlan::new(0.01);
        let na = plan.add_node(a).expect("Knoten");
        let nb = plan.add_node(b).expect("Knoten");
        let wall = plan.add_wall(na, nb, WallSpec::new(0.2)).expect("Wand");
        (plan, na, nb, wall)
    }

    fn resolve(raw: Vec2, plan: &FloorPlan, settings: SnapSettings, ctx: &SnapContext) -> SnapResult {
        resolve_snap(
            raw,
            plan,
            &camera(),
            &settings,
            &SnapThresholds::default(),
            ctx,
        )
    }

    #[test]
    fn orthogonal_snap_projects_along_axis() {
        let plan = FloorPlan::default();
        let ctx = SnapContext::anchored(Vec2::ZERO);
        let result = resolve(Vec2::new(3.0, 0.4), &plan, SnapSettings::default(), &ctx);

        assert_eq!(result.kind, Some(SnapKind::Orthogonal));
        assert_relative_eq!(result.position.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(result.position.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn orthogonal_snap_uses_previous_wall_angle_and_offset() {
        let plan = FloorPlan::default();
        let ctx = SnapContext {
            anchor: Some(Vec2::ZERO),
            previous_wall_angle: Some(std::f32::consts::FRAC_PI_4),
            angle_offset_deg: 0.0,
            exclude_nodes: Vec::new(),
        };
        let result = resolve(Vec2::new(2.0, 2.2), &plan, SnapSettings::default(), &ctx);
        assert_relative_eq!(result.position.x, result.position.y, epsilon = 1e-5);

        // Versatz wird auf 45° begrenzt: 0° + 45° = Diagonale
        let ctx = SnapContext {
            anchor: Some(Vec2::ZERO),
            previous_wall_angle: None,
            angle_offset_deg: 90.0,
            exclude_nodes: Vec::new(),
        };
        let result = resolve(Vec2::new(3.0, 0.4), &plan, SnapSettings::default(), &ctx);
        assert_relative_eq!(result.position.x, result.position.y, epsilon = 1e-5);
    }

    #[test]
    fn node_snap_beats_closer_grid_point() {
        let (plan, _, nb, _) = plan_with_wall(Vec2::ZERO, Vec2::new(4.05, 0.0));
        // Rasterpunkt (4.0, 0) ist näher, der Knoten hat aber Vorrang
        let result = resolve(
            Vec2::new(4.0, 0.0),
            &plan,
            SnapSettings::default(),
            &SnapContext::default(),
        );
        assert_eq!(result.kind, Some(SnapKind::Node));
        assert_eq!(result.node(), Some(nb));
        assert_relative_eq!(result.position.x, 4.05);
    }

    #[test]
    fn excluded_node_and_its_walls_are_ignored() {
        let (plan, na, _, _) = plan_with_wall(Vec2::ZERO, Vec2::new(4.0, 0.0));
        let ctx = SnapContext::excluding(vec![na]);
        let settings = SnapSettings {
            to_grid: false,
            ..SnapSettings::default()
        };

        let result = resolve(Vec2::new(0.05, 0.05), &plan, settings, &ctx);
        assert_eq!(result, SnapResult::raw(Vec2::new(0.05, 0.05)));

        let result = resolve(Vec2::new(2.0, 0.05), &plan, settings, &ctx);
        assert_eq!(result.kind, None);
    }

    #[test]
    fn midpoint_snap_hits_wall_center() {
        let (plan, _, _, wall) = plan_with_wall(Vec2::ZERO, Vec2::new(4.0, 0.0));
        let result = resolve(
            Vec2::new(2.1, 0.1),
            &plan,
            SnapSettings::default(),
            &SnapContext::default(),
        );
        assert_eq!(result.kind, Some(SnapKind::Midpoint));
        assert_eq!(result.wall(), Some(wall));
        assert_eq!(result.position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn perpendicular_snap_uses_foot_from_anchor() {
        let (plan, _, _, wall) = plan_with_wall(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let ctx = SnapContext::anchored(Vec2::new(2.0, 3.0));
        let settings = SnapSettings {
            to_orthogonal: false,
            to_grid: false,
            ..SnapSettings::default()
        };

        let result = resolve(Vec2::new(2.1, 0.05), &plan, settings, &ctx);
        assert_eq!(result.kind, Some(SnapKind::Perpendicular));
        assert_eq!(result.wall(), Some(wall));
        assert_relative_eq!(result.position.x, 2.0, epsilon = 1e-5);
        assert_relative_eq!(result.position.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn perpendicular_snap_rejects_oblique_approach() {
        let (plan, _, _, _) = plan_with_wall(Vec2::ZERO, Vec2::new(10.0, 0.0));
        // Anker schräg: Winkel zur Wand weit weg von 90°
        let ctx = SnapContext::anchored(Vec2::new(-1.0, 1.0));
        let settings = SnapSettings {
            to_orthogonal: false,
            to_grid: false,
            to_extension: false,
            ..SnapSettings::default()
        };

        let result = resolve(Vec2::new(3.0, 0.05), &plan, settings, &ctx);
        assert_eq!(result.kind, None);
    }

    #[test]
    fn extension_snap_beyond_wall_end() {
        let (plan, _, _, wall) = plan_with_wall(Vec2::ZERO, Vec2::new(4.0, 0.0));
        let result = resolve(
            Vec2::new(6.0, 0.05),
            &plan,
            SnapSettings::default(),
            &SnapContext::default(),
        );
        assert_eq!(result.kind, Some(SnapKind::Extension));
        assert_eq!(result.wall(), Some(wall));
        assert_relative_eq!(result.position.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(result.position.x, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn grid_snap_and_passthrough() {
        let plan = FloorPlan::default();
        let ctx = SnapContext::default();

        let result = resolve(Vec2::new(1.03, 0.98), &plan, SnapSettings::default(), &ctx);
        assert_eq!(result.kind, Some(SnapKind::Grid));
        assert_relative_eq!(result.position.x, 1.0);
        assert_relative_eq!(result.position.y, 1.0);

        // 0.25 Abstand zum Raster > 8 px (0.16)
        let raw = Vec2::new(1.25, 1.25);
        assert_eq!(
            resolve(raw, &plan, SnapSettings::default(), &ctx),
            SnapResult::raw(raw)
        );
    }

    #[test]
    fn thresholds_scale_with_zoom() {
        let (plan, na, _, _) = plan_with_wall(Vec2::ZERO, Vec2::new(4.0, 0.0));
        let settings = SnapSettings {
            to_grid: false,
            to_extension: false,
            to_perpendicular: false,
            ..SnapSettings::default()
        };
        let ctx = SnapContext::default();
        let raw = Vec2::new(-0.3, 0.0);

        // Zoom 50: 12 px = 0.24 → kein Treffer
        let far = resolve_snap(raw, &plan, &camera(), &settings, &SnapThresholds::default(), &ctx);
        assert_eq!(far.kind, None);

        // Zoom 20: 12 px = 0.6 → Treffer
        let zoomed_out = Camera2D::with(Vec2::ZERO, 20.0);
        let near = resolve_snap(raw, &plan, &zoomed_out, &settings, &SnapThresholds::default(), &ctx);
        assert_eq!(near.node(), Some(na));
    }

    #[test]
    fn resolver_is_deterministic() {
        let (plan, ..) = plan_with_wall(Vec2::ZERO, Vec2::new(4.0, 0.0));
        let ctx = SnapContext::anchored(Vec2::new(1.0, 2.0));
        let raw = Vec2::new(1.07, 0.04);
        let first = resolve(raw, &plan, SnapSettings::default(), &ctx);
        for _ in 0..10 {
            assert_eq!(resolve(raw, &plan, SnapSettings::default(), &ctx), first);
        }
    }
}
