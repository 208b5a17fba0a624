//! Graph-Knoten: Wandendpunkt bzw. Wandverbindung.

use super::WallId;
use glam::Vec2;

/// Knoten des Wandgraphen
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Position in Weltkoordinaten
    pub position: Vec2,
    /// Angrenzende Wände in Einfügereihenfolge (ohne Duplikate)
    walls: Vec<WallId>,
}

impl Node {
    /// Erstellt einen Knoten ohne angrenzende Wände.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            walls: Vec::new(),
        }
    }

    /// Erstellt einen Knoten mit vorgegebener Adjazenz (Import).
    pub(crate) fn with_walls(position: Vec2, walls: Vec<WallId>) -> Self {
        Self { position, walls }
    }

    /// Angrenzende Wände.
    pub fn walls(&self) -> &[WallId] {
        &self.walls
    }

    /// Anzahl angrenzender Wände.
    pub fn degree(&self) -> usize {
        self.walls.len()
    }

    /// Ein Knoten ohne Wände ist verwaist und wird beim Aufräumen entfernt.
    pub fn is_orphan(&self) -> bool {
        self.walls.is_empty()
    }

    pub(crate) fn attach(&mut self, wall: WallId) {
        if !self.walls.contains(&wall) {
            self.walls.push(wall);
        }
    }

    pub(crate) fn detach(&mut self, wall: WallId) {
        self.walls.retain(|w| *w != wall);
    }

    /// Ersetzt eine Wand-ID an derselben Position der Adjazenzliste.
    pub(crate) fn replace_wall(&mut self, old: WallId, new: WallId) {
        if let Some(slot) = self.walls.iter_mut().find(|w| **w == old) {
            *slot = new;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_is_idempotent_and_detach_removes() {
        let mut node = Node::new(Vec2::ZERO);
        let w = WallId::new(0, 0);
        node.attach(w);
        node.attach(w);
        assert_eq!(node.degree(), 1);

        node.detach(w);
        assert!(node.is_orphan());
    }

    #[test]
    fn replace_keeps_order() {
        let (a, b, c) = (WallId::new(0, 0), WallId::new(1, 0), WallId::new(2, 0));
        let mut node = Node::new(Vec2::ZERO);
        node.attach(a);
        node.attach(b);
        node.replace_wall(a, c);
        assert_eq!(node.walls(), &[c, b]);
    }
}
