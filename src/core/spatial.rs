//! Spatial-Index (KD-Tree) für schnelle Knoten-Abfragen.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::arena::Arena;
use super::{Node, NodeId};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Knotens
    pub node_id: NodeId,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über allen Knoten eines Grundrisses.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    node_ids: Vec<NodeId>,
    positions: Vec<Vec2>,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            node_ids: Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den Knoten der Arena (Slot-Reihenfolge).
    pub fn from_nodes(nodes: &Arena<NodeId, Node>) -> Self {
        let mut node_ids = Vec::with_capacity(nodes.len());
        let mut positions = Vec::with_capacity(nodes.len());
        for (id, node) in nodes.iter() {
            node_ids.push(id);
            positions.push(node.position);
        }

        let entries: Vec<[f64; 2]> = positions
            .iter()
            .map(|p| [p.x as f64, p.y as f64])
            .collect();
        let tree: KdTree<f64, 2> = (&entries).into();

        Self {
            tree,
            node_ids,
            positions,
        }
    }

    /// Gibt die Anzahl indexierter Knoten zurück.
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Knoten im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Findet den nächsten Knoten zur gegebenen Weltposition.
    pub fn nearest(&self, query: Vec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let node_id = *self.node_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            node_id,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Findet alle Knoten innerhalb eines Radius, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], (radius * radius) as f64)
            .into_iter()
            .filter_map(|entry| {
                let node_id = *self.node_ids.get(entry.item as usize)?;
                Some(SpatialMatch {
                    node_id,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        // Gleichstand über die ID auflösen, damit das Ergebnis deterministisch bleibt
        results.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then_with(|| a.node_id.cmp(&b.node_id))
        });
        results
    }

    /// Findet alle Knoten innerhalb eines achsparallelen Rechtecks.
    ///
    /// Nutzt den KD-Tree mit einer umschließenden Kreisabfrage + Nachfilterung.
    pub fn within_rect(&self, min: Vec2, max: Vec2) -> Vec<NodeId> {
        if self.is_empty() {
            return Vec::new();
        }

        let center_x = (min.x + max.x) as f64 * 0.5;
        let center_y = (min.y + max.y) as f64 * 0.5;
        let half_w = (max.x - min.x) as f64 * 0.5;
        let half_h = (max.y - min.y) as f64 * 0.5;
        let radius_sq = half_w * half_w + half_h * half_h;

        self.tree
            .within::<SquaredEuclidean>(&[center_x, center_y], radius_sq)
            .into_iter()
            .filter_map(|entry| {
                let index = entry.item as usize;
                let pos = self.positions.get(index)?;
                if pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y {
                    self.node_ids.get(index).copied()
                } else {
                    None
                }
            })
            .collect()
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_nodes() -> (Arena<NodeId, Node>, [NodeId; 3]) {
        let mut nodes = Arena::new();
        let a = nodes.insert(Node::new(Vec2::new(0.0, 0.0)));
        let b = nodes.insert(Node::new(Vec2::new(10.0, 0.0)));
        let c = nodes.insert(Node::new(Vec2::new(4.0, 3.0)));
        (nodes, [a, b, c])
    }

    #[test]
    fn nearest_returns_expected_node() {
        let (nodes, [_, _, c]) = sample_nodes();
        let index = SpatialIndex::from_nodes(&nodes);
        let nearest = index
            .nearest(Vec2::new(3.9, 2.9))
            .expect("Treffer erwartet");

        assert_eq!(nearest.node_id, c);
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn radius_query_returns_sorted_matches() {
        let (nodes, [a, _, c]) = sample_nodes();
        let index = SpatialIndex::from_nodes(&nodes);
        let matches = index.within_radius(Vec2::new(0.0, 0.0), 6.0);

        let ids: Vec<NodeId> = matches.into_iter().map(|m| m.node_id).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn rect_query_returns_nodes_inside_bounds() {
        let (nodes, [a, _, c]) = sample_nodes();
        let index = SpatialIndex::from_nodes(&nodes);
        let mut ids = index.within_rect(Vec2::new(-1.0, -1.0), Vec2::new(5.0, 3.5));
        ids.sort_unstable();

        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(Vec2::new(0.0, 0.0)).is_none());
    }
}
