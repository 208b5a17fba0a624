//! Ebenen zur Gruppierung und Sichtbarkeitssteuerung von Wänden.

/// Eine Ebene des Grundrisses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    /// Anzeigename
    pub name: String,
    /// Sichtbarkeit (Renderer und Abfragen filtern danach)
    pub visible: bool,
    /// Gesperrte Ebenen sind sichtbar, aber nicht per Werkzeug editierbar
    pub locked: bool,
}

impl Layer {
    /// Erstellt eine sichtbare, nicht gesperrte Ebene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            locked: false,
        }
    }

    /// Editierbar = sichtbar und nicht gesperrt.
    pub fn is_editable(&self) -> bool {
        self.visible && !self.locked
    }
}
