//! Geometrie-Kernel: reine Funktionen auf Punkten, Segmenten und Polygonen.
//!
//! Alle Funktionen sind zustandslos und einheitenagnostisch. Degenerierte
//! Eingaben (Segment der Länge 0, leere Polygone) liefern definierte
//! Fallback-Werte statt NaN/Infinity.

use glam::Vec2;

/// Toleranz für Längen- und Determinantenvergleiche.
pub const EPSILON: f32 = 1e-6;

/// Projektion eines Punkts auf ein Segment oder eine Gerade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// Projizierter Punkt
    pub point: Vec2,
    /// Parameter entlang des Segments (0 = Start, 1 = Ende)
    pub t: f32,
}

/// Euklidische Distanz zweier Punkte.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Mittelpunkt eines Segments.
pub fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) * 0.5
}

/// Nächster Punkt auf dem Segment `a`–`b`, `t` auf `[0, 1]` begrenzt.
///
/// Bei einem Segment der Länge 0 wird der Startpunkt mit `t = 0` geliefert.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> SegmentProjection {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= EPSILON * EPSILON {
        return SegmentProjection { point: a, t: 0.0 };
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    SegmentProjection {
        point: a + ab * t,
        t,
    }
}

/// Projektion auf die unendliche Gerade durch `a` und `b` (`t` unbegrenzt).
pub fn project_onto_line(p: Vec2, a: Vec2, b: Vec2) -> SegmentProjection {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= EPSILON * EPSILON {
        return SegmentProjection { point: a, t: 0.0 };
    }
    let t = (p - a).dot(ab) / len_sq;
    SegmentProjection {
        point: a + ab * t,
        t,
    }
}

/// Kürzeste Distanz eines Punkts zum Segment `a`–`b`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    closest_point_on_segment(p, a, b).point.distance(p)
}

/// Vorzeichenbehaftete Fläche (Shoelace). Positiv für Gegen-Uhrzeigersinn.
pub fn polygon_signed_area(polygon: &[Vec2]) -> f32 {
    let points = open_ring(polygon);
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Fläche eines einfachen Polygons (Shoelace, Betrag).
pub fn polygon_area(polygon: &[Vec2]) -> f32 {
    polygon_signed_area(polygon).abs()
}

/// Umfang eines implizit geschlossenen Polygons.
pub fn polygon_perimeter(polygon: &[Vec2]) -> f32 {
    let points = open_ring(polygon);
    if points.len() < 2 {
        return 0.0;
    }
    points
        .iter()
        .enumerate()
        .map(|(i, a)| a.distance(points[(i + 1) % points.len()]))
        .sum()
}

/// Schwerpunkt der Polygon-Eckpunkte.
///
/// Ein doppelter Schlusspunkt (erster == letzter) wird ignoriert.
pub fn polygon_centroid(polygon: &[Vec2]) -> Option<Vec2> {
    let points = open_ring(polygon);
    if points.is_empty() {
        return None;
    }
    let sum: Vec2 = points.iter().copied().sum();
    Some(sum / points.len() as f32)
}

/// Punkt-in-Polygon nach Ray-Casting (Even-Odd-Regel).
pub fn is_point_in_polygon(point: Vec2, polygon: &[Vec2]) -> bool {
    let points = open_ring(polygon);
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let pi = points[i];
        let pj = points[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Prüft ob sich zwei Segmente schneiden (Determinanten-Test).
///
/// Parallele Segmente (Determinante 0) liefern `false`.
pub fn segments_intersect(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    segment_intersection_point(a1, a2, b1, b2).is_some()
}

/// Schnittpunkt zweier Segmente, falls vorhanden.
pub fn segment_intersection_point(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Vec2> {
    let r = a2 - a1;
    let s = b2 - b1;
    let det = r.perp_dot(s);
    if det.abs() <= EPSILON {
        return None;
    }
    let qp = b1 - a1;
    let t = qp.perp_dot(s) / det;
    let u = qp.perp_dot(r) / det;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + r * t)
    } else {
        None
    }
}

/// Schnittpunkt zweier unendlicher Geraden (Punkt + Richtung).
pub fn line_intersection(p: Vec2, dir_p: Vec2, q: Vec2, dir_q: Vec2) -> Option<Vec2> {
    let det = dir_p.perp_dot(dir_q);
    if det.abs() <= EPSILON {
        return None;
    }
    let t = (q - p).perp_dot(dir_q) / det;
    Some(p + dir_p * t)
}

/// Rechteckiger Grundriss einer Wand (Start links, Ende links, Ende rechts, Start rechts).
pub fn wall_footprint(start: Vec2, end: Vec2, thickness: f32) -> [Vec2; 4] {
    let dir = (end - start).normalize_or_zero();
    let half = dir.perp() * (thickness * 0.5);
    [start + half, end + half, end - half, start - half]
}

/// Normalisiert einen Winkel (Radiant) auf `[-π, π)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU);
    wrapped - std::f32::consts::PI
}

/// Betrag der kleinsten Winkeldifferenz zweier Winkel (Radiant).
pub fn angle_difference(a: f32, b: f32) -> f32 {
    normalize_angle(a - b).abs()
}

/// Entfernt einen doppelten Schlusspunkt.
fn open_ring(polygon: &[Vec2]) -> &[Vec2] {
    match polygon {
        [first, .., last] if polygon.len() > 1 && first.distance(*last) <= EPSILON => {
            &polygon[..polygon.len() - 1]
        }
        _ => polygon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn closest_point_clamps_t() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);

        let mid = closest_point_on_segment(Vec2::new(4.0, 3.0), a, b);
        assert_relative_eq!(mid.point.x, 4.0, epsilon = 1e-6);
        assert_relative_eq!(mid.point.y, 0.0);
        assert_relative_eq!(mid.t, 0.4);

        let beyond = closest_point_on_segment(Vec2::new(15.0, 2.0), a, b);
        assert_eq!(beyond.point, b);
        assert_relative_eq!(beyond.t, 1.0);
    }

    #[test]
    fn closest_point_on_degenerate_segment_returns_start() {
        let a = Vec2::new(2.0, 2.0);
        let proj = closest_point_on_segment(Vec2::new(5.0, 5.0), a, a);
        assert_eq!(proj.point, a);
        assert_eq!(proj.t, 0.0);
        assert!(proj.point.is_finite());
    }

    #[test]
    fn line_projection_is_unclamped() {
        let proj = project_onto_line(
            Vec2::new(-5.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
        );
        assert_eq!(proj.point, Vec2::new(-5.0, 0.0));
        assert_relative_eq!(proj.t, -0.5);
    }

    #[test]
    fn area_perimeter_centroid_of_square() {
        let square = unit_square();
        assert_relative_eq!(polygon_area(&square), 1.0);
        assert_relative_eq!(polygon_perimeter(&square), 4.0);
        assert_eq!(polygon_centroid(&square), Some(Vec2::new(0.5, 0.5)));
    }

    #[test]
    fn area_is_orientation_independent() {
        let mut square = unit_square();
        square.reverse();
        assert_relative_eq!(polygon_signed_area(&square), -1.0);
        assert_relative_eq!(polygon_area(&square), 1.0);
    }

    #[test]
    fn centroid_ignores_duplicated_closing_vertex() {
        let mut closed = unit_square();
        closed.push(closed[0]);
        assert_eq!(polygon_centroid(&closed), Some(Vec2::new(0.5, 0.5)));
        assert_relative_eq!(polygon_perimeter(&closed), 4.0);
    }

    #[test]
    fn degenerate_polygons_have_zero_measures() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Vec2::ZERO, Vec2::X]), 0.0);
        assert_eq!(polygon_centroid(&[]), None);
    }

    #[test]
    fn point_in_polygon_even_odd() {
        let square = unit_square();
        assert!(is_point_in_polygon(Vec2::new(0.5, 0.5), &square));
        assert!(!is_point_in_polygon(Vec2::new(1.5, 0.5), &square));
        assert!(!is_point_in_polygon(Vec2::new(-0.1, 0.5), &square));
    }

    #[test]
    fn segments_intersect_crossing_and_parallel() {
        assert!(segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(2.0, 0.0),
        ));
        // Parallel: kein Schnitt, kein Absturz
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(2.0, 1.0),
        ));
        // Getrennt
        assert!(!segments_intersect(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        ));
    }

    #[test]
    fn line_intersection_of_perpendicular_lines() {
        let hit = line_intersection(
            Vec2::new(0.0, 0.1),
            Vec2::X,
            Vec2::new(3.9, 0.0),
            Vec2::Y,
        )
        .expect("Schnittpunkt erwartet");
        assert_relative_eq!(hit.x, 3.9);
        assert_relative_eq!(hit.y, 0.1);
        assert!(line_intersection(Vec2::ZERO, Vec2::X, Vec2::Y, Vec2::X).is_none());
    }

    #[test]
    fn footprint_is_offset_by_half_thickness() {
        let fp = wall_footprint(Vec2::ZERO, Vec2::new(4.0, 0.0), 0.2);
        assert_relative_eq!(fp[0].y, 0.1);
        assert_relative_eq!(fp[2].y, -0.1);
        assert_relative_eq!(polygon_area(&fp), 0.8, epsilon = 1e-5);
    }

    #[test]
    fn angle_helpers_wrap() {
        use std::f32::consts::PI;
        assert_relative_eq!(normalize_angle(2.5 * PI), 0.5 * PI, epsilon = 1e-5);
        assert_relative_eq!(normalize_angle(-2.5 * PI), -0.5 * PI, epsilon = 1e-5);
        assert_relative_eq!(angle_difference(0.1, -0.1), 0.2, epsilon = 1e-6);
        assert_relative_eq!(angle_difference(PI - 0.1, -PI + 0.1), 0.2, epsilon = 1e-5);
    }
}
