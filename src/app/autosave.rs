//! Entprellter Autosave: liefert ein Plan-Dokument, sobald der bestätigte
//! Zustand eine Weile unverändert geblieben ist.
//!
//! Der Scheduler beobachtet die History-Revision. Jede neue Revision startet
//! die Wartezeit neu; während einer offenen Transaktion wird nie gespeichert.
//! Der Transport (Datei, Netzwerk) liegt beim Aufrufer.

use super::history::EditHistory;
use crate::core::Camera2D;
use crate::format::{to_document, PlanDocument};
use crate::shared::LinearUnit;
use std::time::{Duration, Instant};

/// Entprellungs-Zustand für den Autosave
#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    debounce: Duration,
    observed_revision: u64,
    saved_revision: u64,
    changed_at: Option<Instant>,
}

impl AutosaveScheduler {
    /// Erstellt einen Scheduler; der Ausgangszustand gilt als gespeichert.
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            observed_revision: 0,
            saved_revision: 0,
            changed_at: None,
        }
    }

    /// Ändert die Wartezeit.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// Aktuelle Wartezeit.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Gibt es ungespeicherte, bestätigte Änderungen?
    pub fn is_dirty(&self) -> bool {
        self.observed_revision != self.saved_revision
    }

    /// Markiert eine Revision als gespeichert (z.B. nach Laden oder explizitem Speichern).
    pub fn mark_saved(&mut self, revision: u64) {
        self.observed_revision = revision;
        self.saved_revision = revision;
        self.changed_at = None;
    }

    /// Prüft, ob gespeichert werden soll, und liefert dann das Dokument des
    /// zuletzt bestätigten Zustands.
    pub fn poll(
        &mut self,
        history: &EditHistory,
        unit: LinearUnit,
        camera: &Camera2D,
        now: Instant,
    ) -> Option<PlanDocument> {
        let revision = history.revision();
        if revision != self.observed_revision {
            self.observed_revision = revision;
            self.changed_at = Some(now);
        }
        if !self.is_dirty() || history.in_transaction() {
            return None;
        }

        let changed_at = self.changed_at?;
        if now.saturating_duration_since(changed_at) < self.debounce {
            return None;
        }

        let document = to_document(&history.current().plan, unit, camera);
        self.mark_saved(revision);
        log::info!("Autosave: Revision {} bereitgestellt", revision);
        Some(document)
    }
}
