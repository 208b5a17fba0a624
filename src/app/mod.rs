//! Application-Layer: Controller, State, Events, History und Use-Cases.

pub mod autosave;
pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
mod intent_mapping;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (Grundriss, View, Werkzeuge, Verlauf).
pub mod state;
pub mod tools;
pub mod use_cases;

pub use crate::core::Camera2D;
pub use autosave::AutosaveScheduler;
pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use history::{EditHistory, Snapshot};
pub use state::{
    AppState, EditorTool, EditorToolState, SelectionItem, SelectionState, UiState, ViewState,
};
pub use tools::{EditOutcome, ToolPreview};
