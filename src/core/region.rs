//! Raumerkennung: findet die geschlossene Wandschleife um einen Saatpunkt.
//!
//! Ablauf:
//! 1. Saatwand = Wand mit dem kleinsten Segmentabstand zum Saatpunkt
//! 2. Saatwand so ausrichten, dass der Saatpunkt links liegt
//! 3. Linke Fläche abgehen: an jedem Knoten die engste Linkskurve nehmen
//! 4. Mittellinien-Polygon muss den Saatpunkt enthalten
//! 5. Jede Wand um ihre halbe Stärke nach innen versetzen, Ecken schneiden
//! 6. Fläche und Umfang des Innenpolygons → [`RoomDraft`]

use super::geometry;
use super::room::RoomDraft;
use super::{FloorPlan, NodeId, Room, WallId};
use glam::Vec2;
use std::f32::consts::TAU;

/// Toleranz für den Vergleich gespeicherter und neu abgeleiteter Polygone.
const RESYNC_TOLERANCE: f32 = 1e-4;

/// Warum kein Raum abgeleitet werden konnte
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    /// Der Grundriss enthält keine Wände
    #[error("keine Wände vorhanden")]
    NoWalls,
    /// Sackgasse beim Abgehen der Wandschleife
    #[error("Wandschleife endet in Sackgasse an Knoten {0}")]
    DeadEnd(NodeId),
    /// Schleife schließt sich nicht innerhalb der Iterationsgrenze
    #[error("Wandschleife schließt sich nicht")]
    NotClosed,
    /// Weniger als drei Wände in der Schleife
    #[error("geschlossene Schleife benötigt mindestens 3 Wände, gefunden: {0}")]
    TooFewWalls(usize),
    /// Saatpunkt liegt außerhalb der gefundenen Schleife
    #[error("Punkt liegt außerhalb der gefundenen Wandschleife")]
    SeedOutside,
    /// Innenpolygon ist nach dem Einrücken entartet
    #[error("Innenpolygon ist entartet")]
    DegeneratePolygon,
}

/// Ergebnis eines expliziten Raum-Re-Syncs
#[derive(Debug, Clone, PartialEq)]
pub enum RoomSync {
    /// Gespeicherte Geometrie stimmt noch
    Unchanged,
    /// Neu abgeleitete Geometrie weicht ab
    Updated(RoomDraft),
    /// Raum lässt sich nicht mehr ableiten
    Lost(RegionError),
}

/// Leitet den Raum um `seed` ab. Panikt nie; alle Fehlerfälle als [`RegionError`].
pub fn extract_region(plan: &FloorPlan, seed: Vec2) -> Result<RoomDraft, RegionError> {
    let seed_wall = plan.nearest_wall(seed).ok_or(RegionError::NoWalls)?;
    let (wall_start, wall_end) = wall_nodes(plan, seed_wall.wall_id).ok_or(RegionError::NoWalls)?;
    let (a, b) = (position(plan, wall_start)?, position(plan, wall_end)?);

    // Saatpunkt links von der Laufrichtung
    let (start, first) = if (b - a).perp_dot(seed - a) >= 0.0 {
        (wall_start, wall_end)
    } else {
        (wall_end, wall_start)
    };

    let (nodes, walls) = trace_left_face(plan, start, first, seed_wall.wall_id)?;
    if walls.len() < 3 {
        return Err(RegionError::TooFewWalls(walls.len()));
    }

    let centerline: Vec<Vec2> = nodes
        .iter()
        .map(|n| position(plan, *n))
        .collect::<Result<_, _>>()?;
    if !geometry::is_point_in_polygon(seed, &centerline) {
        return Err(RegionError::SeedOutside);
    }

    let thicknesses: Vec<f32> = walls
        .iter()
        .map(|w| plan.wall(*w).map(|wall| wall.thickness).unwrap_or(0.0))
        .collect();
    let polygon = simplify_ring(inset_ring(&centerline, &thicknesses));
    if polygon.len() < 3 || geometry::polygon_area(&polygon) <= geometry::EPSILON {
        return Err(RegionError::DegeneratePolygon);
    }

    log::debug!(
        "Raum erkannt: {} Wände, Fläche {:.3}",
        walls.len(),
        geometry::polygon_area(&polygon)
    );
    Ok(RoomDraft::new(polygon, walls))
}

/// Leitet einen bestehenden Raum neu ab und vergleicht mit der gespeicherten Geometrie.
pub fn resync_room(plan: &FloorPlan, room: &Room) -> RoomSync {
    let Some(seed) = interior_point(&room.polygon) else {
        return RoomSync::Lost(RegionError::DegeneratePolygon);
    };
    match extract_region(plan, seed) {
        Ok(draft) if same_geometry(room, &draft) => RoomSync::Unchanged,
        Ok(draft) => RoomSync::Updated(draft),
        Err(err) => RoomSync::Lost(err),
    }
}

fn wall_nodes(plan: &FloorPlan, wall: WallId) -> Option<(NodeId, NodeId)> {
    plan.wall(wall).map(|w| (w.start, w.end))
}

fn position(plan: &FloorPlan, node: NodeId) -> Result<Vec2, RegionError> {
    plan.node(node)
        .map(|n| n.position)
        .ok_or(RegionError::DeadEnd(node))
}

/// Läuft die linke Fläche ab `start → first` ab. Liefert die besuchten
/// Knoten (ohne Wiederholung des Starts) und die Wände in Laufreihenfolge.
fn trace_left_face(
    plan: &FloorPlan,
    start: NodeId,
    first: NodeId,
    first_wall: WallId,
) -> Result<(Vec<NodeId>, Vec<WallId>), RegionError> {
    let max_steps = 2 * plan.wall_count();
    let mut nodes = vec![start];
    let mut walls = vec![first_wall];
    let mut previous = start;
    let mut current = first;
    let mut via = first_wall;

    for _ in 0..max_steps {
        if current == start {
            return Ok((nodes, walls));
        }
        nodes.push(current);

        let here = position(plan, current)?;
        let back = position(plan, previous)? - here;
        let back_angle = back.y.atan2(back.x);

        let mut best: Option<(f32, WallId, NodeId)> = None;
        for &wall_id in plan.walls_at_node(current) {
            if wall_id == via {
                continue;
            }
            let Some(next) = plan.wall(wall_id).and_then(|w| w.other_end(current)) else {
                continue;
            };
            let out = position(plan, next)? - here;
            // Im Uhrzeigersinn gemessen ab der Rückrichtung: kleinster Winkel = engste Linkskurve
            let mut sweep = (back_angle - out.y.atan2(out.x)).rem_euclid(TAU);
            if sweep <= geometry::EPSILON {
                sweep = TAU;
            }
            if best.map_or(true, |(s, _, _)| sweep < s) {
                best = Some((sweep, wall_id, next));
            }
        }

        let (_, wall_id, next) = best.ok_or(RegionError::DeadEnd(current))?;
        walls.push(wall_id);
        previous = current;
        current = next;
        via = wall_id;
    }

    if current == start {
        Ok((nodes, walls))
    } else {
        Err(RegionError::NotClosed)
    }
}

/// Versetzt jede Kante `i` (Knoten `i` → `i+1`) um die halbe Stärke nach
/// links und schneidet benachbarte Versatzlinien.
fn inset_ring(centerline: &[Vec2], thicknesses: &[f32]) -> Vec<Vec2> {
    let n = centerline.len();
    let offset_line = |i: usize| {
        let a = centerline[i];
        let b = centerline[(i + 1) % n];
        let dir = (b - a).normalize_or_zero();
        let shift = dir.perp() * (thicknesses[i] * 0.5);
        (a + shift, dir, shift)
    };

    (0..n)
        .map(|i| {
            let (p_prev, d_prev, _) = offset_line((i + n - 1) % n);
            let (p_here, d_here, shift) = offset_line(i);
            geometry::line_intersection(p_prev, d_prev, p_here, d_here)
                .unwrap_or(centerline[i] + shift)
        })
        .collect()
}

/// Entfernt doppelte und kollineare Eckpunkte.
fn simplify_ring(mut ring: Vec<Vec2>) -> Vec<Vec2> {
    loop {
        let n = ring.len();
        if n < 3 {
            return ring;
        }
        let redundant = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let here = ring[i];
            let next = ring[(i + 1) % n];
            here.distance(prev) <= geometry::EPSILON
                || (here - prev).perp_dot(next - here).abs() <= geometry::EPSILON
        });
        match redundant {
            Some(i) => {
                ring.remove(i);
            }
            None => return ring,
        }
    }
}

/// Punkt im Inneren eines Polygons: Schwerpunkt, sonst der erste Dreiecks-
/// schwerpunkt eines Fächers, der innen liegt.
fn interior_point(polygon: &[Vec2]) -> Option<Vec2> {
    let centroid = geometry::polygon_centroid(polygon)?;
    if geometry::is_point_in_polygon(centroid, polygon) {
        return Some(centroid);
    }
    polygon
        .windows(2)
        .skip(1)
        .map(|pair| (polygon[0] + pair[0] + pair[1]) / 3.0)
        .find(|candidate| geometry::is_point_in_polygon(*candidate, polygon))
}

fn same_geometry(room: &Room, draft: &RoomDraft) -> bool {
    room.walls == draft.walls
        && room.polygon.len() == draft.polygon.len()
        && room
            .polygon
            .iter()
            .zip(&draft.polygon)
            .all(|(a, b)| a.distance(*b) <= RESYNC_TOLERANCE)
}
