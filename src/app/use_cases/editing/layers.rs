//! Use-Case: Ebenen anlegen, ein-/ausblenden, sperren und aktivieren.

use crate::app::state::SelectionItem;
use crate::app::AppState;
use crate::core::LayerId;

/// Legt eine neue Ebene an und macht sie zur aktiven Ebene.
pub fn add_layer(state: &mut AppState, name: &str) -> LayerId {
    let name = if name.trim().is_empty() {
        format!("Ebene {}", state.plan.layer_count() + 1)
    } else {
        name.trim().to_string()
    };
    let id = state.plan_mut().add_layer(name.as_str());
    state.editor.active_layer = Some(id);
    state.record_history();
    log::info!("Ebene '{}' angelegt ({})", name, id);
    id
}

/// Setzt die Sichtbarkeit einer Ebene.
///
/// Ausgeblendete Elemente werden aus der Selektion entfernt.
pub fn set_layer_visibility(state: &mut AppState, layer: LayerId, visible: bool) {
    if state.plan.layer(layer).is_some_and(|l| l.visible == visible) {
        return;
    }
    if let Err(e) = state.plan_mut().set_layer_visibility(layer, visible) {
        log::warn!("Sichtbarkeit nicht geändert: {}", e);
        return;
    }
    if !visible {
        drop_hidden_from_selection(state);
    }
    state.record_history();
    log::info!(
        "Ebene {} {}",
        layer,
        if visible { "eingeblendet" } else { "ausgeblendet" }
    );
}

/// Sperrt oder entsperrt eine Ebene.
pub fn set_layer_locked(state: &mut AppState, layer: LayerId, locked: bool) {
    if state.plan.layer(layer).is_some_and(|l| l.locked == locked) {
        return;
    }
    if let Err(e) = state.plan_mut().set_layer_locked(layer, locked) {
        log::warn!("Sperre nicht geändert: {}", e);
        return;
    }
    state.record_history();
    log::info!(
        "Ebene {} {}",
        layer,
        if locked { "gesperrt" } else { "entsperrt" }
    );
}

/// Wählt die Ebene für neue Wände (`None` = Standard-Ebene).
pub fn set_active_layer(state: &mut AppState, layer: Option<LayerId>) {
    match layer {
        Some(id) if state.plan.layer(id).is_none() => {
            log::warn!("Unbekannte Ebene {} kann nicht aktiviert werden", id);
            state.ui.set_status("Ebene existiert nicht");
        }
        _ => state.editor.active_layer = layer,
    }
}

fn drop_hidden_from_selection(state: &mut AppState) {
    let plan = &state.plan;
    let hidden: Vec<_> = state
        .selection
        .walls
        .iter()
        .filter(|w| !plan.is_wall_visible(**w))
        .map(|w| SelectionItem::Wall(*w))
        .chain(
            state
                .selection
                .openings
                .iter()
                .filter(|o| !plan.is_opening_visible(**o))
                .map(|o| SelectionItem::Opening(*o)),
        )
        .chain(
            state
                .selection
                .nodes
                .iter()
                .filter(|n| !plan.is_node_visible(**n))
                .map(|n| SelectionItem::Node(*n)),
        )
        .collect();
    for item in hidden {
        state.selection.remove(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WallSpec;
    use glam::Vec2;

    #[test]
    fn add_layer_becomes_active() {
        let mut state = AppState::new();

        let id = add_layer(&mut state, "  Obergeschoss ");

        assert_eq!(state.editor.active_layer, Some(id));
        assert_eq!(
            state.plan.layer(id).map(|l| l.name.as_str()),
            Some("Obergeschoss")
        );
        assert!(state.can_undo());
    }

    #[test]
    fn hiding_a_layer_deselects_its_walls() {
        let mut state = AppState::new();
        let layer = state.plan.default_layer();
        let plan = state.plan_mut();
        let a = plan.add_node(Vec2::new(0.0, 0.0)).expect("Knoten");
        let b = plan.add_node(Vec2::new(4.0, 0.0)).expect("Knoten");
        let wall = plan.add_wall(a, b, WallSpec::new(0.2)).expect("Wand");
        state.selection.insert(SelectionItem::Wall(wall));

        set_layer_visibility(&mut state, layer, false);

        assert!(!state.plan.is_wall_visible(wall));
        assert!(state.selection.is_empty());
    }

    #[test]
    fn unknown_active_layer_is_rejected() {
        let mut state = AppState::new();
        let layer = state.plan_mut().add_layer("temp");
        state.replace_plan(crate::core::FloorPlan::default());

        set_active_layer(&mut state, Some(layer));

        assert_eq!(state.editor.active_layer, None);
        assert!(state.ui.status_message.is_some());
    }
}
