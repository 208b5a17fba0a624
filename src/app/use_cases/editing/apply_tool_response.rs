//! Use-Case: Antwort eines Werkzeugs anwenden (Selektion, Transaktion, Mutationen).

use crate::app::history::Snapshot;
use crate::app::tools::{EditOutcome, SelectionChange, ToolAnchor, ToolEdit, ToolResponse, TransactionStep};
use crate::app::AppState;
use crate::core::{FloorPlan, GraphError, NodeId};
use glam::Vec2;

/// Maximaler Abstand, ab dem ein Punkt noch als "auf der Wand" gilt.
const ON_WALL_TOLERANCE: f32 = 1e-3;

/// Wendet eine `ToolResponse` auf den AppState an.
///
/// Reihenfolge: Selektion, Transaktionsbeginn/-abbruch, Mutationen,
/// History-Eintrag bzw. Commit, Statusnachricht. Die Mutationen sind
/// Alles-oder-Nichts: schlägt eine fehl, wird der Grundriss auf den Stand
/// vor der Antwort zurückgesetzt.
///
/// Gibt die erzeugten IDs zurück, wenn Mutationen erfolgreich angewendet wurden.
pub fn apply_tool_response(state: &mut AppState, response: ToolResponse) -> Option<EditOutcome> {
    let ToolResponse {
        selection,
        transaction,
        edits,
        status,
    } = response;

    if let Some(change) = selection {
        apply_selection_change(state, change);
    }

    match transaction {
        Some(TransactionStep::Begin) => {
            let before = Snapshot::from_state(state);
            state.history.begin_transaction(before);
        }
        Some(TransactionStep::Cancel) => {
            if let Some(before) = state.history.cancel_transaction() {
                before.apply_to(state);
                log::info!("Geste abgebrochen, Zustand wiederhergestellt");
            }
        }
        _ => {}
    }

    let mut outcome = None;
    if !edits.is_empty() {
        // Eine einzelne atomare Mutation braucht keine Sicherung; ein zusätzlicher
        // Arc-Verweis würde `plan_mut` zur tiefen Kopie zwingen.
        let backup = match edits.as_slice() {
            [edit] if edit.is_atomic() => None,
            _ => Some(state.plan.clone()),
        };
        let mut created = EditOutcome::default();
        let result = {
            let plan = state.plan_mut();
            edits
                .into_iter()
                .try_for_each(|edit| apply_edit(plan, edit, &mut created))
        };
        match result {
            Ok(()) => {
                state.selection.retain_existing(&state.plan);
                if !state.history.in_transaction() {
                    state.record_history();
                }
                log_outcome(&created);
                outcome = Some(created);
            }
            Err(e) => {
                if let Some(backup) = backup {
                    state.plan = backup;
                }
                log::warn!("Werkzeug-Änderung verworfen: {}", e);
                state.ui.set_status(format!("Änderung nicht möglich: {e}"));
            }
        }
    }

    if transaction == Some(TransactionStep::Commit) {
        let after = Snapshot::from_state(state);
        if state.history.commit_transaction(after) {
            log::info!("Geste als ein Schritt übernommen");
        }
    }

    if let Some(message) = status {
        state.ui.set_status(message);
    }

    outcome
}

fn apply_selection_change(state: &mut AppState, change: SelectionChange) {
    match change {
        SelectionChange::Replace(item) => state.selection.select_only(item),
        SelectionChange::Toggle(item) => state.selection.toggle(item),
        SelectionChange::Clear => state.selection.clear(),
    }
}

fn apply_edit(
    plan: &mut FloorPlan,
    edit: ToolEdit,
    outcome: &mut EditOutcome,
) -> Result<(), GraphError> {
    match edit {
        ToolEdit::AddWall { start, end, spec } => {
            let start = resolve_anchor(plan, start, outcome)?;
            let end = resolve_anchor(plan, end, outcome)?;
            let wall = plan.add_wall(start, end, spec)?;
            outcome.walls.push(wall);
        }
        ToolEdit::MoveNode { node, position } => plan.move_node(node, position)?,
        ToolEdit::MergeNodes { source, target } => {
            let merge = plan.merge_nodes(source, target)?;
            log::info!(
                "Knoten {} in {} überführt ({} Wände entfernt)",
                source,
                target,
                merge.removed_walls.len()
            );
        }
        ToolEdit::AddOpening(opening) => {
            let id = plan.add_opening(opening)?;
            outcome.openings.push(id);
        }
        ToolEdit::AddRoom { draft, name } => {
            let id = plan.add_room(draft, name)?;
            outcome.rooms.push(id);
        }
    }
    Ok(())
}

/// Löst einen Anker in einen Knoten auf.
///
/// Punkte auf einer Wand teilen diese. Hat sich die Wand seit dem Erzeugen
/// des Ankers verändert (z.B. durch eine vorherige Teilung in derselben
/// Antwort), wird die Wand unter dem Punkt neu gesucht.
fn resolve_anchor(
    plan: &mut FloorPlan,
    anchor: ToolAnchor,
    outcome: &mut EditOutcome,
) -> Result<NodeId, GraphError> {
    match anchor {
        ToolAnchor::ExistingNode(node, position) => {
            if plan.node(node).is_some() {
                Ok(node)
            } else {
                add_or_merge(plan, position, outcome)
            }
        }
        ToolAnchor::OnWall(wall, position) => {
            let on_given_wall = plan
                .wall_endpoints(wall)
                .map(|(a, b)| crate::core::geometry::distance_to_segment(position, a, b))
                .is_some_and(|d| d <= ON_WALL_TOLERANCE);
            let target = if on_given_wall {
                Some(wall)
            } else {
                plan.nearest_wall(position)
                    .filter(|hit| hit.distance <= ON_WALL_TOLERANCE)
                    .map(|hit| hit.wall_id)
            };
            let Some(target) = target else {
                return add_or_merge(plan, position, outcome);
            };
            match plan.split_wall(target, position) {
                Ok(split) => {
                    outcome.nodes.push(split.new_node);
                    outcome.walls.push(split.new_wall);
                    Ok(split.new_node)
                }
                Err(GraphError::SplitAtEndpoint(_)) => add_or_merge(plan, position, outcome),
                Err(e) => Err(e),
            }
        }
        ToolAnchor::NewPosition(position) => add_or_merge(plan, position, outcome),
    }
}

fn add_or_merge(
    plan: &mut FloorPlan,
    position: Vec2,
    outcome: &mut EditOutcome,
) -> Result<NodeId, GraphError> {
    let before = plan.node_count();
    let node = plan.add_node(position)?;
    if plan.node_count() > before {
        outcome.nodes.push(node);
    }
    Ok(node)
}

fn log_outcome(outcome: &EditOutcome) {
    if !outcome.walls.is_empty() {
        log::info!(
            "Wand erstellt: {} Wände, {} neue Knoten",
            outcome.walls.len(),
            outcome.nodes.len()
        );
    }
    if !outcome.openings.is_empty() {
        log::info!("Öffnung erstellt: {:?}", outcome.openings);
    }
    if !outcome.rooms.is_empty() {
        log::info!("Raum erstellt: {:?}", outcome.rooms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::SelectionItem;
    use crate::core::WallSpec;

    fn anchor(x: f32, y: f32) -> ToolAnchor {
        ToolAnchor::NewPosition(Vec2::new(x, y))
    }

    #[test]
    fn add_wall_records_one_history_step() {
        let mut state = AppState::new();

        let outcome = apply_tool_response(
            &mut state,
            ToolResponse::edit(ToolEdit::AddWall {
                start: anchor(0.0, 0.0),
                end: anchor(4.0, 0.0),
                spec: WallSpec::new(0.2),
            }),
        )
        .expect("Wand sollte angelegt werden");

        assert_eq!(outcome.walls.len(), 1);
        assert_eq!(outcome.nodes.len(), 2);
        assert_eq!(state.plan.wall_count(), 1);
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn on_wall_anchor_splits_the_wall() {
        let mut state = AppState::new();
        let plan = state.plan_mut();
        let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
        let b = plan.add_node(Vec2::new(4.0, 0.0)).expect("Knoten");
        let wall = plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");

        let outcome = apply_tool_response(
            &mut state,
            ToolResponse::edit(ToolEdit::AddWall {
                start: ToolAnchor::OnWall(wall, Vec2::new(2.0, 0.0)),
                end: anchor(2.0, 3.0),
                spec: WallSpec::new(0.2),
            }),
        )
        .expect("Wand sollte angelegt werden");

        assert_eq!(state.plan.wall_count(), 3);
        assert_eq!(state.plan.node_count(), 4);
        assert_eq!(outcome.walls.len(), 2);
    }

    #[test]
    fn failing_edit_rolls_back_everything() {
        let mut state = AppState::new();
        let before = state.plan.clone();

        let response = ToolResponse {
            edits: vec![
                ToolEdit::AddWall {
                    start: anchor(0.0, 0.0),
                    end: anchor(4.0, 0.0),
                    spec: WallSpec::new(0.2),
                },
                ToolEdit::AddWall {
                    start: anchor(0.0, 0.0),
                    end: anchor(4.0, 0.0),
                    spec: WallSpec::new(0.2),
                },
            ],
            ..ToolResponse::default()
        };

        assert!(apply_tool_response(&mut state, response).is_none());
        assert_eq!(*state.plan, *before);
        assert_eq!(state.history.len(), 1);
        assert!(state.ui.status_message.is_some());
    }

    #[test]
    fn cancel_restores_state_before_begin() {
        let mut state = AppState::new();
        let node = state.plan_mut().add_node(Vec2::ZERO).expect("Knoten");
        let before = state.plan.clone();

        apply_tool_response(
            &mut state,
            ToolResponse {
                selection: Some(SelectionChange::Replace(SelectionItem::Node(node))),
                transaction: Some(TransactionStep::Begin),
                ..ToolResponse::default()
            },
        );
        apply_tool_response(
            &mut state,
            ToolResponse::edit(ToolEdit::MoveNode {
                node,
                position: Vec2::new(3.0, 3.0),
            }),
        );
        assert_eq!(state.history.len(), 1);

        apply_tool_response(
            &mut state,
            ToolResponse {
                transaction: Some(TransactionStep::Cancel),
                ..ToolResponse::default()
            },
        );

        assert_eq!(*state.plan, *before);
        assert!(!state.history.in_transaction());
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn drag_moves_reuse_the_live_plan_without_copying() {
        let mut state = AppState::new();
        let plan = state.plan_mut();
        let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
        let b = plan.add_node(Vec2::new(4.0, 0.0)).expect("Knoten");
        plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");
        state.record_history();

        let move_b = |x: f32| {
            ToolResponse::edit(ToolEdit::MoveNode {
                node: b,
                position: Vec2::new(x, 0.0),
            })
        };
        apply_tool_response(
            &mut state,
            ToolResponse {
                transaction: Some(TransactionStep::Begin),
                ..ToolResponse::default()
            },
        );
        apply_tool_response(&mut state, move_b(5.0));
        let live = std::sync::Arc::as_ptr(&state.plan);

        apply_tool_response(&mut state, move_b(6.0));
        assert_eq!(std::sync::Arc::as_ptr(&state.plan), live);

        // Fehlschlag lässt die letzte gültige Position stehen
        assert!(apply_tool_response(&mut state, move_b(0.0)).is_none());
        assert_eq!(state.plan.node(b).map(|n| n.position), Some(Vec2::new(6.0, 0.0)));
        assert!(state.history.in_transaction());
        assert_eq!(std::sync::Arc::as_ptr(&state.plan), live);
    }
}
