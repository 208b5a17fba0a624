use super::super::state::EditorTool;
use crate::core::{LayerId, RoomId};
use crate::shared::EditorOptions;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
/// Pointer-Positionen sind bereits in Weltkoordinaten umgerechnet.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Neuen, leeren Grundriss beginnen
    NewPlanRequested,
    /// Grundriss aus Datei laden
    OpenFileRequested { path: String },
    /// Unter aktuellem Pfad speichern
    SaveRequested,
    /// Unter neuem Pfad speichern
    SaveAsRequested { path: String },
    /// Anwendung beenden
    ExitRequested,

    /// Kamera auf Standard zurücksetzen
    ResetCameraRequested,
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Kamera auf den gesamten Grundriss einpassen
    ZoomToFitRequested,
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Kamera um Delta verschieben (Screen-Pixel)
    CameraPan { delta: glam::Vec2 },
    /// Kamera zoomen (optional auf einen Fokuspunkt in Screen-Pixeln)
    CameraZoom {
        factor: f32,
        focus_screen: Option<glam::Vec2>,
    },

    /// Pointer gedrückt
    PointerDown {
        world_pos: glam::Vec2,
        additive: bool,
    },
    /// Pointer bewegt
    PointerMoved { world_pos: glam::Vec2 },
    /// Pointer losgelassen
    PointerUp { world_pos: glam::Vec2 },
    /// Doppelklick (z.B. Wandzug beenden)
    DoubleClick { world_pos: glam::Vec2 },
    /// Escape gedrückt
    EscapePressed,
    /// Entf gedrückt
    DeletePressed,

    /// Rückgängig
    UndoRequested,
    /// Wiederholen
    RedoRequested,

    /// Werkzeug wechseln
    SetToolRequested { tool: EditorTool },
    /// Winkel-Versatz des Wand-Werkzeugs um Stufen ändern
    AngleNudgeRequested { steps: i32 },

    /// Alles selektieren
    SelectAllRequested,
    /// Selektion aufheben
    ClearSelectionRequested,

    /// Neue Ebene anlegen
    AddLayerRequested { name: String },
    /// Sichtbarkeit einer Ebene umschalten
    LayerVisibilityToggled { layer: LayerId },
    /// Sperre einer Ebene umschalten
    LayerLockToggled { layer: LayerId },
    /// Ebene für neue Wände wählen (`None` = Standard-Ebene)
    SetActiveLayerRequested { layer: Option<LayerId> },

    /// Alle Räume mit der aktuellen Wandgeometrie abgleichen
    ResyncRoomsRequested,
    /// Raum umbenennen
    RenameRoomRequested { room: RoomId, name: String },

    /// Optionen wurden geändert
    OptionsChanged { options: Box<EditorOptions> },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
