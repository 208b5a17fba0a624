use super::super::state::EditorTool;
use crate::core::{LayerId, RoomId};
use crate::shared::EditorOptions;

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Leeren Grundriss beginnen (Verlauf wird verworfen)
    NewPlan,
    /// Grundriss aus Datei laden
    LoadFile { path: String },
    /// Speichern (`None` = aktueller Pfad)
    SaveFile { path: Option<String> },
    /// Anwendung beenden
    RequestExit,

    /// Kamera zurücksetzen
    ResetCamera,
    /// Hineinzoomen
    ZoomIn,
    /// Herauszoomen
    ZoomOut,
    /// Kamera auf Grundriss einpassen
    ZoomToFit,
    /// Viewport-Größe setzen
    SetViewportSize { size: [f32; 2] },
    /// Kamera verschieben (Screen-Pixel)
    PanCamera { delta: glam::Vec2 },
    /// Kamera zoomen
    ZoomCamera {
        factor: f32,
        focus_screen: Option<glam::Vec2>,
    },

    /// Pointer-Down an das aktive Werkzeug
    ToolPointerDown {
        world_pos: glam::Vec2,
        additive: bool,
    },
    /// Pointer-Move an das aktive Werkzeug
    ToolPointerMoved { world_pos: glam::Vec2 },
    /// Pointer-Up an das aktive Werkzeug
    ToolPointerUp { world_pos: glam::Vec2 },
    /// Doppelklick an das aktive Werkzeug
    ToolDoubleClick { world_pos: glam::Vec2 },
    /// Laufende Geste des aktiven Werkzeugs abbrechen
    ToolEscape,
    /// Editor-Werkzeug wechseln
    SetEditorTool { tool: EditorTool },
    /// Winkel-Versatz des Wand-Werkzeugs ändern
    NudgeWallAngle { steps: i32 },

    /// Selektion kaskadierend löschen
    DeleteSelection,
    /// Selektion aufheben
    ClearSelection,
    /// Alle sichtbaren Elemente selektieren
    SelectAll,

    /// Rückgängig
    Undo,
    /// Wiederholen
    Redo,

    /// Ebene anlegen
    AddLayer { name: String },
    /// Sichtbarkeit einer Ebene setzen
    SetLayerVisibility { layer: LayerId, visible: bool },
    /// Sperre einer Ebene setzen
    SetLayerLocked { layer: LayerId, locked: bool },
    /// Ebene für neue Wände setzen
    SetActiveLayer { layer: Option<LayerId> },

    /// Räume neu abgleichen
    ResyncRooms,
    /// Raum umbenennen
    RenameRoom { room: RoomId, name: String },

    /// Optionen übernehmen und speichern
    ApplyOptions { options: Box<EditorOptions> },
    /// Optionen zurücksetzen und speichern
    ResetOptions,
}
