//! Application State — zentrale Datenhaltung.

use super::autosave::AutosaveScheduler;
use super::history::{EditHistory, Snapshot};
use super::tools::ToolManager;
use super::CommandLog;
use crate::core::{Camera2D, FloorPlan, LayerId, NodeId, OpeningId, RoomId, WallId};
use crate::shared::EditorOptions;
use indexmap::IndexSet;
use std::sync::Arc;
use std::time::Duration;

/// Aktives Editor-Werkzeug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorTool {
    /// Standard: Elemente selektieren und Knoten verschieben
    #[default]
    Select,
    /// Wände als Kette zeichnen
    Wall,
    /// Türen auf Wände setzen
    Door,
    /// Fenster auf Wände setzen
    Window,
    /// Räume per Klick ableiten
    Room,
}

impl EditorTool {
    /// Alle Werkzeuge in Toolbar-Reihenfolge.
    pub const ALL: [EditorTool; 5] = [
        EditorTool::Select,
        EditorTool::Wall,
        EditorTool::Door,
        EditorTool::Window,
        EditorTool::Room,
    ];
}

/// Zustand des aktuellen Editor-Werkzeugs
pub struct EditorToolState {
    /// Aktives Werkzeug
    pub active_tool: EditorTool,
    /// Werkzeug-Instanzen
    pub tool_manager: ToolManager,
    /// Ebene für neue Wände (`None` = Standard-Ebene)
    pub active_layer: Option<LayerId>,
}

impl Default for EditorToolState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorToolState {
    /// Erstellt den Standard-Werkzeugzustand (Select-Tool aktiv).
    pub fn new() -> Self {
        Self {
            active_tool: EditorTool::Select,
            tool_manager: ToolManager::new(),
            active_layer: None,
        }
    }
}

/// Ein selektierbares Element des Grundrisses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionItem {
    /// Knoten
    Node(NodeId),
    /// Wand
    Wall(WallId),
    /// Tür oder Fenster
    Opening(OpeningId),
    /// Raum
    Room(RoomId),
}

/// Auswahlbezogener Anwendungszustand
///
/// Die Mengen liegen hinter `Arc`, damit Snapshots O(1) bleiben.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    /// Selektierte Knoten
    pub nodes: Arc<IndexSet<NodeId>>,
    /// Selektierte Wände
    pub walls: Arc<IndexSet<WallId>>,
    /// Selektierte Öffnungen
    pub openings: Arc<IndexSet<OpeningId>>,
    /// Selektierte Räume
    pub rooms: Arc<IndexSet<RoomId>>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gesamtzahl selektierter Elemente.
    pub fn len(&self) -> usize {
        self.nodes.len() + self.walls.len() + self.openings.len() + self.rooms.len()
    }

    /// Gibt `true` zurück, wenn nichts selektiert ist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hebt die Selektion auf.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            *self = Self::default();
        }
    }

    /// Prüft, ob ein Element selektiert ist.
    pub fn contains(&self, item: SelectionItem) -> bool {
        match item {
            SelectionItem::Node(id) => self.nodes.contains(&id),
            SelectionItem::Wall(id) => self.walls.contains(&id),
            SelectionItem::Opening(id) => self.openings.contains(&id),
            SelectionItem::Room(id) => self.rooms.contains(&id),
        }
    }

    /// Fügt ein Element hinzu (CoW: klont nur wenn nötig).
    pub fn insert(&mut self, item: SelectionItem) {
        match item {
            SelectionItem::Node(id) => {
                Arc::make_mut(&mut self.nodes).insert(id);
            }
            SelectionItem::Wall(id) => {
                Arc::make_mut(&mut self.walls).insert(id);
            }
            SelectionItem::Opening(id) => {
                Arc::make_mut(&mut self.openings).insert(id);
            }
            SelectionItem::Room(id) => {
                Arc::make_mut(&mut self.rooms).insert(id);
            }
        }
    }

    /// Entfernt ein Element.
    pub fn remove(&mut self, item: SelectionItem) {
        if !self.contains(item) {
            return;
        }
        match item {
            SelectionItem::Node(id) => {
                Arc::make_mut(&mut self.nodes).shift_remove(&id);
            }
            SelectionItem::Wall(id) => {
                Arc::make_mut(&mut self.walls).shift_remove(&id);
            }
            SelectionItem::Opening(id) => {
                Arc::make_mut(&mut self.openings).shift_remove(&id);
            }
            SelectionItem::Room(id) => {
                Arc::make_mut(&mut self.rooms).shift_remove(&id);
            }
        }
    }

    /// Ersetzt die Selektion durch genau ein Element.
    pub fn select_only(&mut self, item: SelectionItem) {
        self.clear();
        self.insert(item);
    }

    /// Schaltet ein Element um (additive Selektion).
    pub fn toggle(&mut self, item: SelectionItem) {
        if self.contains(item) {
            self.remove(item);
        } else {
            self.insert(item);
        }
    }

    /// Entfernt IDs, die im Grundriss nicht mehr existieren.
    pub fn retain_existing(&mut self, plan: &FloorPlan) {
        if self.nodes.iter().any(|id| plan.node(*id).is_none()) {
            Arc::make_mut(&mut self.nodes).retain(|id| plan.node(*id).is_some());
        }
        if self.walls.iter().any(|id| plan.wall(*id).is_none()) {
            Arc::make_mut(&mut self.walls).retain(|id| plan.wall(*id).is_some());
        }
        if self.openings.iter().any(|id| plan.opening(*id).is_none()) {
            Arc::make_mut(&mut self.openings).retain(|id| plan.opening(*id).is_some());
        }
        if self.rooms.iter().any(|id| plan.room(*id).is_none()) {
            Arc::make_mut(&mut self.rooms).retain(|id| plan.room(*id).is_some());
        }
    }
}

/// UI-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct UiState {
    /// Pfad der aktuell geladenen Datei (für Save ohne Pfadangabe)
    pub current_file_path: Option<String>,
    /// Temporäre Statusnachricht (z.B. fehlgeschlagene Raumerkennung)
    pub status_message: Option<String>,
}

impl UiState {
    /// Erstellt den Standard-UI-Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt die Statusnachricht.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }
}

/// View-bezogener Anwendungszustand
#[derive(Debug, Default)]
pub struct ViewState {
    /// 2D-Kamera für die Ansicht
    pub camera: Camera2D,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport_size: [f32; 2],
    /// Letzte Cursor-Position in Weltkoordinaten
    pub cursor_world: Option<glam::Vec2>,
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self {
            camera: Camera2D::new(),
            viewport_size: [0.0, 0.0],
            cursor_world: None,
        }
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Aktueller Grundriss (Arc für O(1)-Snapshots)
    pub plan: Arc<FloorPlan>,
    /// View-State
    pub view: ViewState,
    /// UI-State
    pub ui: UiState,
    /// Selection-State
    pub selection: SelectionState,
    /// Editor-Werkzeug-State
    pub editor: EditorToolState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Entprellter Autosave
    pub autosave: AutosaveScheduler,
    /// Signalisiert dem Host, die Anwendung kontrolliert zu beenden
    pub should_exit: bool,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standardoptionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den angegebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        let plan = Arc::new(FloorPlan::new(options.merge_threshold_world()));
        let selection = SelectionState::new();
        let history = EditHistory::new(
            Snapshot::new(plan.clone(), selection.clone()),
            options.history_depth,
        );
        let autosave =
            AutosaveScheduler::new(Duration::from_millis(options.autosave_debounce_ms));
        Self {
            plan,
            view: ViewState::new(),
            ui: UiState::new(),
            selection,
            editor: EditorToolState::new(),
            command_log: CommandLog::new(),
            history,
            options,
            autosave,
            should_exit: false,
        }
    }

    /// Mutabler Zugriff auf den Grundriss (CoW: klont nur, wenn ein Snapshot ihn teilt).
    #[inline]
    pub fn plan_mut(&mut self) -> &mut FloorPlan {
        Arc::make_mut(&mut self.plan)
    }

    /// Ersetzt den Grundriss und beginnt einen neuen Verlauf.
    pub fn replace_plan(&mut self, plan: FloorPlan) {
        self.plan = Arc::new(plan);
        self.selection.clear();
        self.editor.tool_manager.reset_all();
        self.editor.active_layer = None;
        self.history.reset(Snapshot::from_state(self));
    }

    /// Gibt die Anzahl der Knoten zurück (für UI-Anzeige)
    pub fn node_count(&self) -> usize {
        self.plan.node_count()
    }

    /// Gibt die Anzahl der Wände zurück (für UI-Anzeige)
    pub fn wall_count(&self) -> usize {
        self.plan.wall_count()
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Nimmt den aktuellen Zustand als bestätigten History-Eintrag auf.
    /// Während einer Transaktion wirkungslos.
    pub fn record_history(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record(snap);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
