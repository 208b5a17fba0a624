//! Fehlertypen der Graph-Operationen.

use super::{LayerId, NodeId, OpeningId, RoomId, WallId};

/// Fehler einer Graph-Mutation. Bei jedem Fehler bleibt der Grundriss unverändert.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Referenz auf einen unbekannten Knoten
    #[error("unbekannter Knoten {0}")]
    UnknownNode(NodeId),
    /// Referenz auf eine unbekannte Wand
    #[error("unbekannte Wand {0}")]
    UnknownWall(WallId),
    /// Referenz auf eine unbekannte Öffnung
    #[error("unbekannte Öffnung {0}")]
    UnknownOpening(OpeningId),
    /// Referenz auf einen unbekannten Raum
    #[error("unbekannter Raum {0}")]
    UnknownRoom(RoomId),
    /// Referenz auf eine unbekannte Ebene
    #[error("unbekannte Ebene {0}")]
    UnknownLayer(LayerId),
    /// Start- und Endknoten sind identisch
    #[error("Wand mit identischem Start- und Endknoten {0}")]
    SelfLoop(NodeId),
    /// Start und Ende liegen aufeinander
    #[error("Wand der Länge 0 zwischen {0} und {1}")]
    ZeroLengthWall(NodeId, NodeId),
    /// Zwischen den Knoten existiert bereits eine Wand
    #[error("zwischen den Knoten existiert bereits Wand {0}")]
    DuplicateWall(WallId),
    /// Wandstärke nicht positiv oder nicht endlich
    #[error("ungültige Wandstärke {0}")]
    InvalidThickness(f32),
    /// Position enthält NaN oder Unendlich
    #[error("ungültige Position ({0}, {1})")]
    NonFinitePosition(f32, f32),
    /// Teilungspunkt fällt auf ein Wandende
    #[error("Teilungspunkt liegt auf einem Ende von Wand {0}")]
    SplitAtEndpoint(WallId),
    /// Öffnungsparameter ungültig (Position/Maße nicht endlich oder negativ)
    #[error("ungültige Öffnungsparameter")]
    InvalidOpening,
    /// Raumpolygon mit weniger als drei verschiedenen Eckpunkten
    #[error("Raumpolygon benötigt mindestens 3 verschiedene Eckpunkte")]
    DegenerateRoom,
    /// Import: dieselbe ID ist mehrfach vergeben
    #[error("ID {0} ist mehrfach vergeben")]
    IdCollision(String),
    /// Import: Slot-Index liegt weit jenseits der Anzahl der Einträge
    #[error("ID {0} liegt außerhalb des zulässigen Bereichs")]
    IdOutOfRange(String),
    /// Import: Adjazenzliste eines Knotens passt nicht zu den Wänden
    #[error("Adjazenz von Knoten {0} ist inkonsistent")]
    InconsistentAdjacency(NodeId),
}
