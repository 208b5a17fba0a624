use floorplan_editor::app::{EditHistory, Snapshot};
use floorplan_editor::{FloorPlan, SelectionState, WallSpec};
use glam::Vec2;
use std::sync::Arc;

fn snapshot(plan: &FloorPlan) -> Snapshot {
    Snapshot::new(Arc::new(plan.clone()), SelectionState::new())
}

fn plan_with_nodes(count: usize) -> FloorPlan {
    let mut plan = FloorPlan::default();
    for i in 0..count {
        plan.add_node(Vec2::new(i as f32, 0.0)).expect("Knoten");
    }
    plan
}

#[test]
fn test_committed_transaction_is_exactly_one_entry() {
    let base = plan_with_nodes(2);
    let mut history = EditHistory::new(snapshot(&base), 50);

    history.begin_transaction(snapshot(&base));
    let mut live = base.clone();
    let node = live.nodes().map(|(id, _)| id).next().expect("Knoten");
    for step in 1..=10 {
        live.move_node(node, Vec2::new(step as f32, 3.0))
            .expect("Verschieben");
        // Einzelschritte während der Geste werden unterdrückt
        assert!(!history.record(snapshot(&live)));
    }
    assert!(history.commit_transaction(snapshot(&live)));

    assert_eq!(history.len(), 2);
    assert!(history.can_undo());
    let before = history.undo().expect("Undo");
    assert_eq!(*before.plan, base);
}

#[test]
fn test_cancelled_transaction_leaves_history_untouched() {
    let base = plan_with_nodes(3);
    let mut history = EditHistory::new(snapshot(&base), 50);
    let revision = history.revision();

    history.begin_transaction(snapshot(&base));
    assert!(!history.can_undo());
    assert!(!history.can_redo());

    let restored = history.cancel_transaction().expect("offene Transaktion");
    assert_eq!(*restored.plan, base);
    assert_eq!(history.len(), 1);
    assert_eq!(history.revision(), revision);
    assert!(!history.in_transaction());
}

#[test]
fn test_commit_without_change_creates_no_entry() {
    let base = plan_with_nodes(1);
    let mut history = EditHistory::new(snapshot(&base), 50);

    history.begin_transaction(snapshot(&base));
    assert!(!history.commit_transaction(snapshot(&base)));
    assert_eq!(history.len(), 1);
    assert!(!history.in_transaction());
}

#[test]
fn test_new_record_discards_redo_future() {
    let mut history = EditHistory::new(snapshot(&plan_with_nodes(0)), 50);
    history.record(snapshot(&plan_with_nodes(1)));
    history.record(snapshot(&plan_with_nodes(2)));

    history.undo().expect("Undo");
    assert!(history.can_redo());

    history.record(snapshot(&plan_with_nodes(5)));
    assert!(!history.can_redo());
    assert_eq!(history.len(), 3);
    assert_eq!(history.current().plan.node_count(), 5);
}

#[test]
fn test_depth_limit_drops_oldest_entries() {
    let mut history = EditHistory::new(snapshot(&plan_with_nodes(0)), 3);
    for count in 1..=6 {
        history.record(snapshot(&plan_with_nodes(count)));
    }

    assert_eq!(history.len(), 4);
    let mut undone = 0;
    while let Some(snap) = history.undo() {
        undone += 1;
        if !history.can_undo() {
            assert_eq!(snap.plan.node_count(), 3);
        }
    }
    assert_eq!(undone, 3);
}

#[test]
fn test_undo_at_boundary_returns_none() {
    let mut plan = FloorPlan::default();
    let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
    let b = plan.add_node(Vec2::new(3.0, 0.0)).expect("Knoten");
    let mut history = EditHistory::new(snapshot(&plan), 10);
    assert!(history.undo().is_none());

    plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");
    history.record(snapshot(&plan));

    assert!(history.redo().is_none());
    let first = history.undo().expect("Undo");
    assert_eq!(first.plan.wall_count(), 0);
    assert!(history.undo().is_none());
    let again = history.redo().expect("Redo");
    assert_eq!(again.plan.wall_count(), 1);
}
