//! Floor-Plan Editor Library.
//! Grundriss-Graph, Snapping, Raumerkennung und transaktionale History als
//! Library exportiert für Tests, Benchmarks und Host-Anwendungen.

pub mod app;
pub mod core;
pub mod format;
pub mod shared;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, EditorTool, EditorToolState, SelectionItem,
    SelectionState, UiState, ViewState,
};
pub use core::{
    extract_region, resolve_snap, Camera2D, FloorPlan, GraphError, LayerId, NodeId, Opening,
    OpeningId, OpeningKind, RegionError, Room, RoomDraft, RoomId, SnapContext, SnapKind,
    SnapResult, SpatialIndex, SpatialMatch, SwingSide, WallId, WallKind, WallSpec,
};
pub use format::{
    from_document, parse_plan_document, to_document, write_plan_document, DocumentError,
    PlanDocument,
};
pub use shared::{EditorOptions, LinearUnit, SnapMode};
