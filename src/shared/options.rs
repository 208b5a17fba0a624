//! Zentrale Konfiguration für den Grundriss-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Längen werden in Metern gespeichert und über die [`LinearUnit`] der
//! Engine-Instanz in Welteinheiten umgerechnet.

use crate::core::{SnapSettings, SnapThresholds, WallKind};
use serde::{Deserialize, Serialize};

// ── Wände ───────────────────────────────────────────────────────────

/// Standard-Wandstärke in Metern.
pub const WALL_THICKNESS_M: f32 = 0.2;
/// Standard-Wandhöhe in Metern.
pub const WALL_HEIGHT_M: f32 = 2.5;
/// Fangradius beim Zusammenführen von Knoten in Metern.
pub const MERGE_THRESHOLD_M: f32 = 0.05;
/// Rasterweite in Metern.
pub const GRID_SPACING_M: f32 = 0.5;

// ── Öffnungen ───────────────────────────────────────────────────────

/// Standard-Türbreite in Metern.
pub const DOOR_WIDTH_M: f32 = 0.9;
/// Standard-Türhöhe in Metern.
pub const DOOR_HEIGHT_M: f32 = 2.1;
/// Standard-Fensterbreite in Metern.
pub const WINDOW_WIDTH_M: f32 = 1.2;
/// Standard-Fensterhöhe in Metern.
pub const WINDOW_HEIGHT_M: f32 = 1.2;
/// Standard-Brüstungshöhe in Metern.
pub const WINDOW_SILL_HEIGHT_M: f32 = 0.9;

// ── Kamera / Selektion ──────────────────────────────────────────────

/// Zoom-Schritt bei stufenweisem Zoom (Shortcuts).
pub const CAMERA_ZOOM_STEP: f32 = 1.2;
/// Zoom-Schritt bei Mausrad-Scroll.
pub const CAMERA_SCROLL_ZOOM_STEP: f32 = 1.1;
/// Pick-Radius in Screen-Pixeln.
pub const SELECTION_PICK_RADIUS_PX: f32 = 12.0;

// ── History / Autosave ──────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;
/// Ruhezeit nach dem letzten Commit, bevor automatisch gespeichert wird.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 2000;

/// Längeneinheit einer Engine-Instanz
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LinearUnit {
    /// 1 Welteinheit = 1 m
    #[default]
    Meters,
    /// 1 Welteinheit = 1 mm
    Millimeters,
    /// Welteinheiten sind Bildpixel eines hinterlegten Plans
    Pixels {
        /// Pixel pro Meter
        pixels_per_meter: f32,
    },
}

impl LinearUnit {
    /// Welteinheiten pro Meter.
    pub fn units_per_meter(&self) -> f32 {
        match self {
            LinearUnit::Meters => 1.0,
            LinearUnit::Millimeters => 1000.0,
            LinearUnit::Pixels { pixels_per_meter } => *pixels_per_meter,
        }
    }

    /// Rechnet Meter in Welteinheiten um.
    pub fn from_meters(&self, meters: f32) -> f32 {
        meters * self.units_per_meter()
    }

    /// Rechnet Welteinheiten in Meter um.
    pub fn to_meters(&self, units: f32) -> f32 {
        units / self.units_per_meter()
    }

    /// Anzeigekürzel.
    pub fn suffix(&self) -> &'static str {
        match self {
            LinearUnit::Meters => "m",
            LinearUnit::Millimeters => "mm",
            LinearUnit::Pixels { .. } => "px",
        }
    }
}

/// Interaktionsmodus, für den Snap-Einstellungen gelten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapMode {
    /// Wände zeichnen
    WallDrawing,
    /// Knoten ziehen
    NodeDrag,
    /// Türen/Fenster platzieren
    OpeningPlacement,
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `floorplan_editor.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    // ── Wände ───────────────────────────────────────────────────
    /// Wandstärke neuer Wände (m)
    pub wall_thickness: f32,
    /// Wandhöhe neuer Wände (m)
    pub wall_height: f32,
    /// Konstruktionsart neuer Wände
    pub wall_kind: WallKind,
    /// Fangradius für das Zusammenführen von Knoten (m)
    pub merge_threshold: f32,

    // ── Öffnungen ───────────────────────────────────────────────
    /// Türbreite (m)
    pub door_width: f32,
    /// Türhöhe (m)
    pub door_height: f32,
    /// Fensterbreite (m)
    pub window_width: f32,
    /// Fensterhöhe (m)
    pub window_height: f32,
    /// Brüstungshöhe (m)
    pub window_sill_height: f32,

    // ── Kamera / Selektion ──────────────────────────────────────
    /// Zoom-Schritt bei Shortcuts
    pub camera_zoom_step: f32,
    /// Zoom-Schritt bei Mausrad-Scroll
    pub camera_scroll_zoom_step: f32,
    /// Pick-Radius für Klick-Selektion in Screen-Pixeln
    pub selection_pick_radius_px: f32,

    // ── History / Autosave ──────────────────────────────────────
    /// Maximale Anzahl Undo-Schritte
    pub history_depth: usize,
    /// Autosave-Ruhezeit in Millisekunden
    pub autosave_debounce_ms: u64,

    // ── Snapping ────────────────────────────────────────────────
    /// Fangschwellen (px / Grad)
    pub snap_thresholds: SnapThresholds,
    /// Snap-Strategien beim Wandzeichnen (Rasterweite in m)
    pub snap_wall_drawing: SnapSettings,
    /// Snap-Strategien beim Knotenziehen (Rasterweite in m)
    pub snap_node_drag: SnapSettings,
    /// Snap-Strategien beim Platzieren von Öffnungen (Rasterweite in m)
    pub snap_opening_placement: SnapSettings,

    // ── Einheit ─────────────────────────────────────────────────
    /// Längeneinheit der Welt
    pub unit: LinearUnit,
}

impl Default for EditorOptions {
    fn default() -> Self {
        let wall_drawing = SnapSettings {
            grid_spacing: GRID_SPACING_M,
            ..SnapSettings::default()
        };
        Self {
            wall_thickness: WALL_THICKNESS_M,
            wall_height: WALL_HEIGHT_M,
            wall_kind: WallKind::Structural,
            merge_threshold: MERGE_THRESHOLD_M,

            door_width: DOOR_WIDTH_M,
            door_height: DOOR_HEIGHT_M,
            window_width: WINDOW_WIDTH_M,
            window_height: WINDOW_HEIGHT_M,
            window_sill_height: WINDOW_SILL_HEIGHT_M,

            camera_zoom_step: CAMERA_ZOOM_STEP,
            camera_scroll_zoom_step: CAMERA_SCROLL_ZOOM_STEP,
            selection_pick_radius_px: SELECTION_PICK_RADIUS_PX,

            history_depth: HISTORY_DEPTH,
            autosave_debounce_ms: AUTOSAVE_DEBOUNCE_MS,

            snap_thresholds: SnapThresholds::default(),
            snap_wall_drawing: wall_drawing,
            snap_node_drag: SnapSettings {
                to_orthogonal: false,
                ..wall_drawing
            },
            snap_opening_placement: SnapSettings {
                grid_spacing: GRID_SPACING_M,
                to_perpendicular: true,
                to_midpoints: true,
                ..SnapSettings::disabled()
            },

            unit: LinearUnit::Meters,
        }
    }
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("floorplan_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("floorplan_editor.toml")
    }

    /// Wandstärke neuer Wände in Welteinheiten.
    pub fn wall_thickness_world(&self) -> f32 {
        self.unit.from_meters(self.wall_thickness)
    }

    /// Wandhöhe neuer Wände in Welteinheiten.
    pub fn wall_height_world(&self) -> f32 {
        self.unit.from_meters(self.wall_height)
    }

    /// Knoten-Fangradius in Welteinheiten.
    pub fn merge_threshold_world(&self) -> f32 {
        self.unit.from_meters(self.merge_threshold)
    }

    /// Snap-Einstellungen für einen Modus, Rasterweite in Welteinheiten.
    pub fn snap_settings(&self, mode: SnapMode) -> SnapSettings {
        let settings = match mode {
            SnapMode::WallDrawing => self.snap_wall_drawing,
            SnapMode::NodeDrag => self.snap_node_drag,
            SnapMode::OpeningPlacement => self.snap_opening_placement,
        };
        SnapSettings {
            grid_spacing: self.unit.from_meters(settings.grid_spacing),
            ..settings
        }
    }

    /// Breite und Höhe einer neuen Tür in Welteinheiten.
    pub fn door_size_world(&self) -> (f32, f32) {
        (
            self.unit.from_meters(self.door_width),
            self.unit.from_meters(self.door_height),
        )
    }

    /// Breite, Höhe und Brüstungshöhe eines neuen Fensters in Welteinheiten.
    pub fn window_size_world(&self) -> (f32, f32, f32) {
        (
            self.unit.from_meters(self.window_width),
            self.unit.from_meters(self.window_height),
            self.unit.from_meters(self.window_sill_height),
        )
    }
}
