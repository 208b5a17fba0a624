//! Use-Case-Funktionen für die Selektion.

use crate::app::state::SelectionItem;
use crate::app::AppState;

/// Hebt die Selektion auf.
pub fn clear_selection(state: &mut AppState) {
    if state.selection.is_empty() {
        return;
    }
    state.selection.clear();
    log::debug!("Selektion aufgehoben");
}

/// Selektiert alle sichtbaren Elemente.
pub fn select_all(state: &mut AppState) {
    let plan = &state.plan;
    let items: Vec<SelectionItem> = plan
        .visible_nodes()
        .map(|(id, _)| SelectionItem::Node(id))
        .chain(plan.visible_walls().map(|(id, _)| SelectionItem::Wall(id)))
        .chain(
            plan.visible_openings()
                .map(|(id, _)| SelectionItem::Opening(id)),
        )
        .chain(plan.visible_rooms().map(|(id, _)| SelectionItem::Room(id)))
        .collect();

    state.selection.clear();
    for item in items {
        state.selection.insert(item);
    }
    log::info!("{} Elemente selektiert", state.selection.len());
}
