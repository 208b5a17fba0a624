use super::SelectionState;
use crate::core::FloorPlan;
use std::sync::Arc;
use std::time::Instant;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1),
/// der Klon des Grundrisses findet erst beim nächsten `Arc::make_mut()` in
/// einem Use-Case statt. Gespeicherte Snapshots bleiben dadurch unberührt,
/// egal was danach am Live-Zustand geändert wird.
#[derive(Clone)]
pub struct Snapshot {
    /// Grundriss (Arc-Klon für O(1)-Snapshot)
    pub plan: Arc<FloorPlan>,
    /// Selektionszustand zum Zeitpunkt des Snapshots
    pub selection: SelectionState,
    /// Erstellungszeitpunkt
    pub timestamp: Instant,
}

impl Snapshot {
    /// Erstellt einen Snapshot aus Grundriss und Selektion.
    pub fn new(plan: Arc<FloorPlan>, selection: SelectionState) -> Self {
        Self {
            plan,
            selection,
            timestamp: Instant::now(),
        }
    }

    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &crate::app::AppState) -> Self {
        Self::new(state.plan.clone(), state.selection.clone())
    }

    /// Stellt den Snapshot wieder her (O(1) Arc-Zuweisung).
    pub fn apply_to(self, state: &mut crate::app::AppState) {
        state.plan = self.plan;
        state.selection = self.selection;
    }

    /// Prüft, ob beide Snapshots denselben Modellzustand tragen.
    pub fn same_plan(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.plan, &other.plan) || *self.plan == *other.plan
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("nodes", &self.plan.node_count())
            .field("walls", &self.plan.wall_count())
            .field("selection", &self.selection.len())
            .finish()
    }
}

/// Undo/Redo-Manager: Snapshot-Liste mit Cursor.
///
/// Der Eintrag unter dem Cursor ist immer der zuletzt bestätigte Zustand.
/// Während einer Transaktion (z.B. Drag-Geste) werden `record`-Aufrufe
/// unterdrückt; `commit_transaction` legt genau einen Eintrag an.
pub struct EditHistory {
    snapshots: Vec<Snapshot>,
    cursor: usize,
    max_depth: usize,
    transaction: Option<Snapshot>,
    revision: u64,
}

impl EditHistory {
    /// Erstellt einen History-Manager, initialisiert mit dem Ausgangszustand.
    pub fn new(initial: Snapshot, max_depth: usize) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            max_depth: max_depth.max(1),
            transaction: None,
            revision: 0,
        }
    }

    /// Verwirft den gesamten Verlauf und beginnt mit `initial` neu (z.B. nach Laden).
    pub fn reset(&mut self, initial: Snapshot) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
        self.transaction = None;
        self.revision += 1;
    }

    /// Nimmt einen bestätigten Zustand auf.
    ///
    /// Verwirft die Redo-Zukunft und entfernt den ältesten Eintrag, sobald
    /// `max_depth` überschritten ist. Gibt `false` zurück, wenn eine
    /// Transaktion offen ist und der Aufruf unterdrückt wurde.
    pub fn record(&mut self, snapshot: Snapshot) -> bool {
        if self.transaction.is_some() {
            log::debug!("History: record während Transaktion unterdrückt");
            return false;
        }
        self.push(snapshot);
        true
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
        // max_depth Undo-Schritte plus Ausgangszustand
        while self.snapshots.len() > self.max_depth + 1 {
            self.snapshots.remove(0);
            self.cursor -= 1;
        }
        self.revision += 1;
    }

    /// Öffnet eine Transaktion und merkt sich den Zustand vor der Geste.
    ///
    /// Eine bereits offene Transaktion bleibt bestehen.
    pub fn begin_transaction(&mut self, before: Snapshot) {
        if self.transaction.is_some() {
            log::warn!("History: Transaktion bereits offen");
            return;
        }
        self.transaction = Some(before);
    }

    /// Schließt die Transaktion ab.
    ///
    /// Gibt `true` zurück, wenn ein Eintrag angelegt wurde. Unveränderter
    /// Zustand erzeugt keinen Eintrag.
    pub fn commit_transaction(&mut self, after: Snapshot) -> bool {
        let Some(before) = self.transaction.take() else {
            log::debug!("History: commit ohne offene Transaktion");
            return false;
        };
        if before.same_plan(&after) {
            log::debug!("History: Transaktion ohne Änderung");
            return false;
        }
        self.push(after);
        true
    }

    /// Bricht die Transaktion ab und liefert den Zustand vor der Geste.
    pub fn cancel_transaction(&mut self) -> Option<Snapshot> {
        self.transaction.take()
    }

    /// Einen Schritt zurück. Liefert den wiederherzustellenden Snapshot.
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.revision += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Einen Schritt vorwärts. Liefert den wiederherzustellenden Snapshot.
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.revision += 1;
        Some(self.snapshots[self.cursor].clone())
    }

    /// Zuletzt bestätigter Zustand (Grundlage für Autosave).
    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.cursor]
    }

    /// Anzahl gespeicherter Snapshots inkl. Ausgangszustand.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Immer `false`: der Ausgangszustand ist stets vorhanden.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Position des aktuellen Snapshots.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Maximale Anzahl Undo-Schritte.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        self.transaction.is_none() && self.cursor > 0
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        self.transaction.is_none() && self.cursor + 1 < self.snapshots.len()
    }

    /// Ist gerade eine Transaktion offen?
    pub fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Zähler, der sich bei jeder Änderung des bestätigten Zustands erhöht.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
