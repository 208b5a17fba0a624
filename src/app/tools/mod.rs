//! Trait-basiertes Werkzeugsystem für die Grundriss-Bearbeitung.
//!
//! Jedes Werkzeug implementiert den `PlanTool`-Trait und wird beim
//! `ToolManager` registriert. Werkzeuge lesen Grundriss und Snap-Resolver,
//! erzeugen aber nur reine Daten (`ToolResponse`); die Mutation erfolgt
//! zentral in `use_cases::editing::apply_tool_response`.

/// Gemeinsame Hilfsfunktionen (Picking, Anker-Bestimmung).
pub mod common;
/// Tür- und Fenster-Werkzeug.
pub mod opening;
/// PlanTool-Trait — Schnittstelle für alle Werkzeuge.
mod plan_tool;
/// Raum-Werkzeug (Klick in geschlossene Fläche).
pub mod room;
/// Auswahl-Werkzeug mit Knoten-Drag.
pub mod select;
/// Wand-Werkzeug mit Kettenzeichnen.
pub mod wall;

pub use plan_tool::PlanTool;

use super::state::{EditorTool, SelectionItem};
use crate::core::{
    Camera2D, FloorPlan, NodeId, Opening, OpeningId, RoomDraft, RoomId, SnapContext, SnapKind,
    SnapResult, WallId, WallSpec,
};
use crate::shared::{EditorOptions, SnapMode};
use glam::Vec2;

// ── Typen ────────────────────────────────────────────────────────

/// Anker-Punkt einer Wand: bestehender Knoten, Punkt auf einer Wand
/// (wird beim Anwenden geteilt) oder freie Position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolAnchor {
    /// Snap auf existierenden Knoten
    ExistingNode(NodeId, Vec2),
    /// Punkt auf einer bestehenden Wand
    OnWall(WallId, Vec2),
    /// Freie Position (neuer Knoten wird erstellt oder gemergt)
    NewPosition(Vec2),
}

impl ToolAnchor {
    /// Gibt die Welt-Position des Ankers zurück.
    pub fn position(&self) -> Vec2 {
        match self {
            ToolAnchor::ExistingNode(_, pos) => *pos,
            ToolAnchor::OnWall(_, pos) => *pos,
            ToolAnchor::NewPosition(pos) => *pos,
        }
    }
}

/// Einzelne Grundriss-Mutation, von einem Werkzeug beschrieben.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEdit {
    /// Wand zwischen zwei Ankern anlegen
    AddWall {
        /// Start-Anker
        start: ToolAnchor,
        /// End-Anker
        end: ToolAnchor,
        /// Wandparameter
        spec: WallSpec,
    },
    /// Knoten verschieben
    MoveNode {
        /// Knoten
        node: NodeId,
        /// Zielposition
        position: Vec2,
    },
    /// Gezogenen Knoten in einen bestehenden Knoten überführen
    MergeNodes {
        /// Gezogener Knoten (entfällt)
        source: NodeId,
        /// Verbleibender Knoten
        target: NodeId,
    },
    /// Tür oder Fenster anlegen
    AddOpening(Opening),
    /// Raum aus einem Entwurf anlegen
    AddRoom {
        /// Entwurf aus der Raumerkennung
        draft: RoomDraft,
        /// Anzeigename
        name: String,
    },
}

impl ToolEdit {
    /// `true`, wenn die Mutation bei einem Fehler den Grundriss unverändert lässt.
    ///
    /// `AddWall` kann vor dem Fehlschlag bereits Knoten angelegt oder Wände
    /// geteilt haben.
    pub fn is_atomic(&self) -> bool {
        !matches!(self, ToolEdit::AddWall { .. })
    }
}

/// Transaktionsschritt einer Geste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionStep {
    /// Geste beginnt (Zustand vor der Geste merken)
    Begin,
    /// Geste abgeschlossen (genau ein History-Eintrag)
    Commit,
    /// Geste abgebrochen (Zustand vor der Geste wiederherstellen)
    Cancel,
}

/// Selektionsänderung durch ein Werkzeug
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    /// Selektion durch ein Element ersetzen
    Replace(SelectionItem),
    /// Element umschalten (additiv)
    Toggle(SelectionItem),
    /// Selektion aufheben
    Clear,
}

/// Antwort eines Werkzeugs auf ein Eingabe-Event — reine Daten, keine Mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolResponse {
    /// Selektionsänderung (vor allem anderen angewendet)
    pub selection: Option<SelectionChange>,
    /// Transaktionsschritt
    pub transaction: Option<TransactionStep>,
    /// Mutationen (Alles-oder-Nichts)
    pub edits: Vec<ToolEdit>,
    /// Statusnachricht für die UI
    pub status: Option<String>,
}

impl ToolResponse {
    /// Leere Antwort.
    pub fn none() -> Self {
        Self::default()
    }

    /// Antwort mit genau einer Mutation.
    pub fn edit(edit: ToolEdit) -> Self {
        Self {
            edits: vec![edit],
            ..Self::default()
        }
    }

    /// Antwort mit Statusnachricht.
    pub fn status(message: impl Into<String>) -> Self {
        Self {
            status: Some(message.into()),
            ..Self::default()
        }
    }

    /// Antwort mit Selektionsänderung.
    pub fn select(change: SelectionChange) -> Self {
        Self {
            selection: Some(change),
            ..Self::default()
        }
    }

    /// Gibt `true` zurück, wenn die Antwort nichts bewirkt.
    pub fn is_empty(&self) -> bool {
        self.selection.is_none()
            && self.transaction.is_none()
            && self.edits.is_empty()
            && self.status.is_none()
    }
}

/// Ergebnis einer angewendeten Antwort: erzeugte IDs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditOutcome {
    /// Neu erzeugte Knoten (inkl. Teilungsknoten)
    pub nodes: Vec<NodeId>,
    /// Neu erzeugte Wände in Reihenfolge
    pub walls: Vec<WallId>,
    /// Neu erzeugte Öffnungen
    pub openings: Vec<OpeningId>,
    /// Neu erzeugte Räume
    pub rooms: Vec<RoomId>,
}

/// Preview-Geometrie für das Rendering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolPreview {
    /// Vorschau-Segmente (z.B. die gerade gezogene Wand)
    pub segments: Vec<(Vec2, Vec2)>,
    /// Vorschau-Punkte
    pub points: Vec<Vec2>,
    /// Aktiver Snap-Indikator
    pub snap: Option<(Vec2, SnapKind)>,
}

/// Lesender Kontext für Werkzeuge
pub struct ToolContext<'a> {
    /// Grundriss
    pub plan: &'a FloorPlan,
    /// Kamera (für Pixel-Schwellen)
    pub camera: &'a Camera2D,
    /// Optionen
    pub options: &'a EditorOptions,
    /// Ebene für neue Wände (`None` = Standard-Ebene)
    pub active_layer: Option<crate::core::LayerId>,
}

impl ToolContext<'_> {
    /// Pick-Radius in Welteinheiten.
    pub fn pick_radius(&self) -> f32 {
        self.camera.px_to_world(self.options.selection_pick_radius_px)
    }

    /// Löst eine Snap-Position mit den Einstellungen des Modus auf.
    pub fn snap(&self, raw: Vec2, mode: SnapMode, context: &SnapContext) -> SnapResult {
        crate::core::resolve_snap(
            raw,
            self.plan,
            self.camera,
            &self.options.snap_settings(mode),
            &self.options.snap_thresholds,
            context,
        )
    }

    /// Wandparameter für neue Wände aus den Optionen.
    pub fn wall_spec(&self) -> WallSpec {
        let spec = WallSpec::new(self.options.wall_thickness_world())
            .with_kind(self.options.wall_kind)
            .with_height(self.options.wall_height_world());
        match self.active_layer {
            Some(layer) => spec.on_layer(layer),
            None => spec,
        }
    }
}

// ── ToolManager ──────────────────────────────────────────────────

/// Verwaltet die Werkzeug-Instanzen und das aktive Werkzeug.
pub struct ToolManager {
    tools: Vec<(EditorTool, Box<dyn PlanTool>)>,
    active_index: usize,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    /// Erstellt einen ToolManager mit allen Standard-Werkzeugen (Select aktiv).
    pub fn new() -> Self {
        let mut manager = Self {
            tools: Vec::new(),
            active_index: 0,
        };
        manager.register(EditorTool::Select, Box::new(select::SelectTool::new()));
        manager.register(EditorTool::Wall, Box::new(wall::WallTool::new()));
        manager.register(EditorTool::Door, Box::new(opening::OpeningTool::door()));
        manager.register(EditorTool::Window, Box::new(opening::OpeningTool::window()));
        manager.register(EditorTool::Room, Box::new(room::RoomTool::new()));
        manager
    }

    /// Registriert ein Werkzeug (ersetzt ein bestehendes derselben Art).
    pub fn register(&mut self, kind: EditorTool, tool: Box<dyn PlanTool>) {
        if let Some(entry) = self.tools.iter_mut().find(|(k, _)| *k == kind) {
            entry.1 = tool;
        } else {
            self.tools.push((kind, tool));
        }
    }

    /// Gibt die Anzahl registrierter Werkzeuge zurück.
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Gibt Art und Name aller registrierten Werkzeuge zurück.
    pub fn tool_names(&self) -> Vec<(EditorTool, &str)> {
        self.tools.iter().map(|(k, t)| (*k, t.name())).collect()
    }

    /// Aktiviert ein Werkzeug; das bisherige wird zurückgesetzt.
    pub fn set_active(&mut self, kind: EditorTool) -> bool {
        let Some(index) = self.tools.iter().position(|(k, _)| *k == kind) else {
            return false;
        };
        if index != self.active_index {
            self.tools[self.active_index].1.reset();
            self.active_index = index;
        }
        true
    }

    /// Art des aktiven Werkzeugs.
    pub fn active_kind(&self) -> EditorTool {
        self.tools
            .get(self.active_index)
            .map_or(EditorTool::Select, |(k, _)| *k)
    }

    /// Gibt eine Referenz auf das aktive Werkzeug zurück.
    pub fn active_tool(&self) -> Option<&dyn PlanTool> {
        self.tools.get(self.active_index).map(|(_, t)| t.as_ref())
    }

    /// Gibt eine mutable Referenz auf das aktive Werkzeug zurück.
    pub fn active_tool_mut(&mut self) -> Option<&mut (dyn PlanTool + 'static)> {
        self.tools
            .get_mut(self.active_index)
            .map(|(_, t)| t.as_mut())
    }

    /// Setzt alle Werkzeuge zurück.
    pub fn reset_all(&mut self) {
        for (_, tool) in &mut self.tools {
            tool.reset();
        }
    }
}
