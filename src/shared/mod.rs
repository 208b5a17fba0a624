//! Geteilte Typen für schichtübergreifende Verträge (Konfiguration, Einheiten).

pub mod options;

pub use options::{EditorOptions, LinearUnit, SnapMode};
